// ==========================================
// LOB 排位填充系统 - 行游标
// ==========================================
// 状态机: Scanning → Placing → Scanning ... → RowFull
// 红线: 游标只前进不回退，同一行内后续到货不会回收已扫描过的列
// ==========================================

use crate::domain::capacity::Cell;
use std::fmt;

/// 游标状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    Scanning, // 正在寻找下一个空位
    Placing,  // 停在一个空位上，等待写入
    RowFull,  // 本行已无空位（终态）
}

impl fmt::Display for CursorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorState::Scanning => write!(f, "SCANNING"),
            CursorState::Placing => write!(f, "PLACING"),
            CursorState::RowFull => write!(f, "ROW_FULL"),
        }
    }
}

// ==========================================
// SlotCursor - 单行游标
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCursor {
    position: usize,
    state: CursorState,
}

impl SlotCursor {
    /// 从第 0 列开始
    pub fn new() -> Self {
        Self {
            position: 0,
            state: CursorState::Scanning,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    /// 前进到下一个可放置格
    ///
    /// # 参数
    /// - `cells`: 本行单元格（整个游标生命周期内必须是同一行）
    ///
    /// # 返回
    /// - `Some(col)`: 可放置的列下标，状态转为 Placing
    /// - `None`: 本行已满，状态转为 RowFull
    pub fn seek(&mut self, cells: &[Cell]) -> Option<usize> {
        match self.state {
            CursorState::RowFull => return None,
            CursorState::Placing => return Some(self.position),
            CursorState::Scanning => {}
        }

        while self.position < cells.len() && !cells[self.position].is_empty() {
            self.position += 1;
        }

        if self.position >= cells.len() {
            self.state = CursorState::RowFull;
            None
        } else {
            self.state = CursorState::Placing;
            Some(self.position)
        }
    }

    /// 当前格已写入，越过它继续扫描
    pub fn advance(&mut self) {
        if self.state == CursorState::Placing {
            self.position += 1;
            self.state = CursorState::Scanning;
        }
    }
}

impl Default for SlotCursor {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// LOB 排位填充系统 - 填充结果领域模型
// ==========================================
// 职责: 余料报告、忽略集合、未放置报告、放置记录
// 红线: 全部使用有序容器，保证同一输入输出逐字节一致
// ==========================================

use crate::domain::capacity::{CapacityTable, Marker};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// LeftoverReport - 余料报告（仅套装模式）
// ==========================================
// rowKey -> 不足一套的剩余件数（同行多次到货累加）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeftoverReport(BTreeMap<String, f64>);

impl LeftoverReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加余料，pieces <= 0 时不产生条目
    pub fn add(&mut self, row_key: &str, pieces: f64) {
        if pieces > 0.0 {
            *self.0.entry(row_key.to_string()).or_insert(0.0) += pieces;
        }
    }

    pub fn get(&self, row_key: &str) -> Option<f64> {
        self.0.get(row_key).copied()
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

// ==========================================
// UnplacedReport - 行已满未放置报告
// ==========================================
// rowKey -> 因无可用格而未放置的格数（与余料是两种不同结果）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnplacedReport(BTreeMap<String, u64>);

impl UnplacedReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, row_key: &str, slots: u64) {
        if slots > 0 {
            let entry = self.0.entry(row_key.to_string()).or_insert(0);
            *entry = entry.saturating_add(slots);
        }
    }

    pub fn get(&self, row_key: &str) -> Option<u64> {
        self.0.get(row_key).copied()
    }

    /// 所有行的未放置格数合计（饱和）
    pub fn total(&self) -> u64 {
        self.0.values().fold(0u64, |acc, v| acc.saturating_add(*v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

// ==========================================
// IgnoredSet - 表中不存在的行键
// ==========================================
// 去重 + 字典序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IgnoredSet(BTreeSet<String>);

impl IgnoredSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, row_key: &str) {
        self.0.insert(row_key.to_string());
    }

    pub fn contains(&self, row_key: &str) -> bool {
        self.0.contains(row_key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for IgnoredSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(|s| s.as_ref().to_string()).collect())
    }
}

// ==========================================
// Placement - 单次放置记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub row_key: String,
    pub column_key: String,
    pub column_index: usize,
    pub input_index: usize, // 对应到货记录在输入中的位置
    pub marker: Marker,
}

// ==========================================
// AllocationSummary - 汇总统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationSummary {
    pub shipments_total: usize,
    pub shipments_usable: usize,
    pub shipments_ignored: usize,
    pub slots_requested: u64,
    pub slots_placed: u64,
    pub slots_unplaced: u64,
    pub leftover_pieces: f64,
}

// ==========================================
// AllocationResult - 一次填充的完整结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationResult {
    pub table: CapacityTable,
    pub leftovers: LeftoverReport,
    pub ignored: IgnoredSet,
    pub unplaced: UnplacedReport,
    pub placements: Vec<Placement>,
    pub summary: AllocationSummary,
}

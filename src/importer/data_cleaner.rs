// ==========================================
// LOB 排位填充系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 件数、实数、日期解析
// ==========================================

use crate::importer::importer_trait::DataCleaner as DataCleanerTrait;
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// 支持的日期格式（按优先级）
///
/// %Y 可匹配 1~4 位数字，所以两位年份的 %m/%d/%y 必须排在 %m/%d/%Y 之前
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%m/%d/%y", "%m/%d/%Y", "%Y/%m/%d", "%d-%b-%Y"];

/// 支持的日期时间格式（取日期部分）
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"];

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    fn parse_quantity(&self, value: &str) -> Option<i64> {
        let trimmed = value.trim();
        if let Ok(v) = trimmed.parse::<i64>() {
            return Some(v);
        }
        // Excel 数值常带小数（例如 "4.0"）
        self.parse_real(trimmed).map(|v| v.trunc() as i64)
    }

    fn parse_real(&self, value: &str) -> Option<f64> {
        value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

    fn parse_date(&self, value: &str) -> Option<NaiveDate> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }

        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
                return Some(date);
            }
        }
        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
                return Some(dt.date());
            }
        }

        // Excel 日期序列号（1900 日期系统）
        excel_serial_to_date(trimmed)
    }
}

/// Excel 序列号 → 日期（基准 1899-12-30，合理区间 1..=2958465）
fn excel_serial_to_date(value: &str) -> Option<NaiveDate> {
    let serial = value.parse::<f64>().ok()?;
    if !serial.is_finite() || !(1.0..=2_958_465.0).contains(&serial) {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(Duration::days(serial.trunc() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_quantity() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_quantity(" 12 "), Some(12));
        assert_eq!(cleaner.parse_quantity("4.0"), Some(4));
        assert_eq!(cleaner.parse_quantity("4.9"), Some(4));
        assert_eq!(cleaner.parse_quantity("-3"), Some(-3));
        assert_eq!(cleaner.parse_quantity("abc"), None);
        assert_eq!(cleaner.parse_quantity(""), None);
    }

    #[test]
    fn test_parse_real() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_real("2.5"), Some(2.5));
        assert_eq!(cleaner.parse_real("NaN"), None);
        assert_eq!(cleaner.parse_real("inf"), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_date("2025-01-02"), Some(d(2025, 1, 2)));
        assert_eq!(cleaner.parse_date("20250102"), Some(d(2025, 1, 2)));
        assert_eq!(cleaner.parse_date("01/02/2025"), Some(d(2025, 1, 2)));
        assert_eq!(cleaner.parse_date("01/02/25"), Some(d(2025, 1, 2)));
        assert_eq!(cleaner.parse_date("2025/01/02"), Some(d(2025, 1, 2)));
        assert_eq!(cleaner.parse_date("2025-01-02 08:30:00"), Some(d(2025, 1, 2)));
        assert_eq!(cleaner.parse_date("2025-01-02T08:30:00"), Some(d(2025, 1, 2)));
    }

    #[test]
    fn test_parse_date_excel_serial() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_date("45659"), Some(d(2025, 1, 2)));
        assert_eq!(cleaner.parse_date("0"), None);
    }

    #[test]
    fn test_parse_date_invalid() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_date("TBD"), None);
        assert_eq!(cleaner.parse_date(""), None);
        assert_eq!(cleaner.parse_date("2025-13-40"), None);
    }
}

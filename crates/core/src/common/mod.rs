use chrono::NaiveDate;
use thiserror::Error;

/// 日期区间构造错误。
#[derive(Error, Debug)]
pub enum DateRangeError {
    // 非法的 8 位日期字符串
    #[error("Invalid date string: {0}")]
    InvalidDate(String),
    // 起始日期晚于结束日期
    #[error("Inverted range: {start} > {end}")]
    Inverted { start: String, end: String },
}

/// # Summary
/// 闭区间日期范围实体，以 8 位日期字符串（YYYYMMDD）为外部表示。
///
/// # Invariants
/// - `start` 与 `end` 必须是合法交易日历日期且 `start <= end`。
/// - 区间为闭区间，天数统计包含首尾两端。
#[derive(Debug, Clone)]
pub struct DateRange {
    // 起始日期 (例如: 20240603)
    start: String,
    // 结束日期 (例如: 20240607)
    end: String,
    // 解析后的起始日
    start_date: NaiveDate,
    // 解析后的结束日
    end_date: NaiveDate,
}

impl DateRange {
    /// # Summary
    /// 从两个 8 位日期字符串构造闭区间。
    ///
    /// # Logic
    /// 1. 按 `%Y%m%d` 格式解析两端日期。
    /// 2. 校验 `start <= end`，否则拒绝构造。
    ///
    /// # Arguments
    /// * `start`: 起始日期字符串。
    /// * `end`: 结束日期字符串。
    ///
    /// # Returns
    /// 成功返回区间实体，失败返回 DateRangeError。
    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeError> {
        let start_date = NaiveDate::parse_from_str(start, "%Y%m%d")
            .map_err(|_| DateRangeError::InvalidDate(start.to_string()))?;
        let end_date = NaiveDate::parse_from_str(end, "%Y%m%d")
            .map_err(|_| DateRangeError::InvalidDate(end.to_string()))?;

        if start_date > end_date {
            return Err(DateRangeError::Inverted {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(Self {
            start: start.to_string(),
            end: end.to_string(),
            start_date,
            end_date,
        })
    }

    /// 起始日期的 8 位字符串形式
    pub fn start(&self) -> &str {
        &self.start
    }

    /// 结束日期的 8 位字符串形式
    pub fn end(&self) -> &str {
        &self.end
    }

    /// 行情表列标签，形如 `20240603_20240607`
    pub fn column_label(&self) -> String {
        format!("{}_{}", self.start, self.end)
    }

    /// 叙述文案中的区间写法，形如 `20240603-20240607`
    pub fn narrative_span(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }

    /// # Summary
    /// 闭区间包含的自然日天数，用于计算日均成交额与日均资金流。
    ///
    /// # Logic
    /// 1. 计算两端日期差值并加 1（闭区间）。
    ///
    /// # Returns
    /// 返回天数，构造校验保证其至少为 1。
    pub fn span_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_range() {
        let range = DateRange::parse("20240603", "20240607").unwrap();
        assert_eq!(range.start(), "20240603");
        assert_eq!(range.end(), "20240607");
        assert_eq!(range.column_label(), "20240603_20240607");
        assert_eq!(range.narrative_span(), "20240603-20240607");
        // 闭区间：周一到周五共 5 天
        assert_eq!(range.span_days(), 5);
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::parse("20240603", "20240603").unwrap();
        assert_eq!(range.span_days(), 1);
    }

    #[test]
    fn test_reject_malformed_date() {
        assert!(matches!(
            DateRange::parse("2024-06-03", "20240607"),
            Err(DateRangeError::InvalidDate(_))
        ));
        assert!(matches!(
            DateRange::parse("20240603", "202406"),
            Err(DateRangeError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_reject_inverted_range() {
        assert!(matches!(
            DateRange::parse("20240607", "20240603"),
            Err(DateRangeError::Inverted { .. })
        ));
    }
}

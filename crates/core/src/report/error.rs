use thiserror::Error;

use crate::common::DateRangeError;
use crate::config::ConfigError;
use crate::doc::error::DocError;
use crate::market::error::MarketError;

/// # Summary
/// 报告生成的聚合错误枚举，汇聚下层各域的失败。
/// 任何一个环节出错都会立刻终止本次生成，没有局部重试与降级输出。
#[derive(Error, Debug)]
pub enum ReportError {
    // 日期区间非法
    #[error("Invalid date range: {0}")]
    InvalidDate(#[from] DateRangeError),
    // 配置域失败
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    // 行情数据域失败
    #[error("Market data error: {0}")]
    Market(#[from] MarketError),
    // 文档输出域失败
    #[error("Document error: {0}")]
    Doc(#[from] DocError),
}

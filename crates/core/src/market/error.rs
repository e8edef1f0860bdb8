use thiserror::Error;

/// # Summary
/// 行情数据域错误枚举，处理网络、网关与数据缺失等问题。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug)]
pub enum MarketError {
    // 网络层错误，包含底层 HTTP 客户端错误信息
    #[error("Network error: {0}")]
    Network(String),
    // 数据商网关返回的业务错误码
    #[error("Gateway error {code}: {message}")]
    Gateway { code: i64, message: String },
    // 响应解析错误，如 JSON 结构不匹配
    #[error("Parse error: {0}")]
    Parse(String),
    // 请求的标的在响应中缺失数据
    #[error("Missing data for instrument: {0}")]
    MissingData(String),
}

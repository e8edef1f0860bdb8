use std::time::Duration;

use async_trait::async_trait;
use chenhui_core::common::DateRange;
use chenhui_core::market::entity::PctChangeTable;
use chenhui_core::market::error::MarketError;
use chenhui_core::market::port::MarketDataProvider;
use reqwest::Client;
use serde::Deserialize;

// 区间涨跌幅字段，终端以百分比单位返回
const FIELD_PCT_CHG: &str = "pct_chg_per";
// 收盘价字段
const FIELD_CLOSE: &str = "close";
// 板块区间总成交额字段
const FIELD_SECTION_AMT: &str = "sec_pq_amt_sum";

/// # Summary
/// 万得终端 HTTP 网关行情提供者实现。
/// 网关把终端的 wss / wsee 查询暴露为同步 JSON 接口，
/// 会话登录由终端侧完成，本层只负责请求与解析。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯。
/// - 每次查询独立成一次请求，无本地缓存与重试。
#[derive(Clone)]
pub struct WindGatewayProvider {
    /// 内部使用的 HTTP 客户端
    client: Client,
    /// 网关根地址 (例如: http://127.0.0.1:8086)
    base_url: String,
}

impl WindGatewayProvider {
    /// # Summary
    /// 创建一个新的 WindGatewayProvider 实例。
    ///
    /// # Logic
    /// 1. 配置 10 秒请求超时。
    /// 2. 初始化 reqwest 客户端。
    ///
    /// # Arguments
    /// * `base_url`: 网关根地址。
    ///
    /// # Returns
    /// 成功返回初始化后的提供者，客户端构建失败返回 MarketError。
    pub fn new(base_url: impl Into<String>) -> Result<Self, MarketError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| MarketError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// # Summary
    /// 执行一次网关查询并完成通用错误归类。
    ///
    /// # Logic
    /// 1. 拼接端点 URL 并携带 codes / fields / options 三元组。
    /// 2. 非 2xx 归为网络错误。
    /// 3. 解析 JSON 后检查网关业务错误码。
    ///
    /// # Arguments
    /// * `endpoint`: 网关端点 (wss 或 wsee)。
    /// * `codes`: 逗号拼接的标的代码或板块标识。
    /// * `fields`: 查询字段名。
    /// * `options`: 终端参数字符串。
    ///
    /// # Returns
    /// 成功返回网关响应体。
    async fn query(
        &self,
        endpoint: &str,
        codes: &str,
        fields: &str,
        options: &str,
    ) -> Result<GatewayResponse, MarketError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let resp = self
            .client
            .get(&url)
            .query(&[("codes", codes), ("fields", fields), ("options", options)])
            .send()
            .await
            .map_err(|e| MarketError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(MarketError::Network(format!("HTTP {}", resp.status())));
        }

        let body: GatewayResponse = resp
            .json()
            .await
            .map_err(|e| MarketError::Parse(e.to_string()))?;

        if body.error_code != 0 {
            return Err(MarketError::Gateway {
                code: body.error_code,
                message: body.message.unwrap_or_default(),
            });
        }

        Ok(body)
    }
}

/// # Summary
/// 网关响应顶层结构。
///
/// # Invariants
/// - 映射自终端 API 的 ErrorCode / Codes / Fields / Data 约定。
/// - `data` 的每一行对应一个字段，列与 `codes` 一一对应。
#[derive(Deserialize, Debug)]
pub(crate) struct GatewayResponse {
    #[serde(rename = "ErrorCode")]
    error_code: i64,
    // 业务错误描述，成功时为空
    #[serde(rename = "Message", default)]
    message: Option<String>,
    #[serde(rename = "Codes", default)]
    codes: Vec<String>,
    #[serde(rename = "Data", default)]
    data: Vec<Vec<Option<f64>>>,
}

/// # Summary
/// 把网关响应的首个字段行装配为涨跌幅表。
///
/// # Logic
/// 1. 将响应中的代码列与数值列逐一配对，百分比单位除以 100 归一化。
/// 2. 数值为空的标的立即报 MissingData。
/// 3. 校验请求过的代码全部在表中出现。
///
/// # Arguments
/// * `resp`: 网关响应体。
/// * `requested`: 请求的代码集合。
/// * `column_label`: 表的列标签。
///
/// # Returns
/// 成功返回完整的涨跌幅表。
fn pct_table_from(
    resp: &GatewayResponse,
    requested: &[String],
    column_label: &str,
) -> Result<PctChangeTable, MarketError> {
    let row = resp
        .data
        .first()
        .ok_or_else(|| MarketError::Parse("empty data rows".to_string()))?;

    if row.len() != resp.codes.len() {
        return Err(MarketError::Parse(format!(
            "data width {} != codes width {}",
            row.len(),
            resp.codes.len()
        )));
    }

    let mut table = PctChangeTable::new(column_label);
    for (code, value) in resp.codes.iter().zip(row.iter()) {
        let pct = value.ok_or_else(|| MarketError::MissingData(code.clone()))?;
        // 终端返回百分比单位，领域内统一为小数
        table.insert(code.clone(), pct / 100.0);
    }

    for code in requested {
        if table.change_of(code).is_none() {
            return Err(MarketError::MissingData(code.clone()));
        }
    }

    Ok(table)
}

/// 取出响应中的单标量值 (Data[0][0])
fn scalar_from(resp: &GatewayResponse) -> Result<f64, MarketError> {
    resp.data
        .first()
        .and_then(|row| row.first())
        .copied()
        .flatten()
        .ok_or_else(|| MarketError::Parse("empty scalar response".to_string()))
}

#[async_trait]
impl MarketDataProvider for WindGatewayProvider {
    /// # Summary
    /// 查询一组标的在闭区间上的涨跌幅。
    ///
    /// # Logic
    /// 1. 以 `startDate=..;endDate=..` 参数串发起 wss 批量快照查询。
    /// 2. 响应按代码配对并归一化为小数单位。
    ///
    /// # Arguments
    /// * `codes`: 标的代码集合。
    /// * `range`: 查询闭区间。
    ///
    /// # Returns
    /// 成功返回涨跌幅表，失败返回 MarketError。
    async fn fetch_pct_change(
        &self,
        codes: &[String],
        range: &DateRange,
    ) -> Result<PctChangeTable, MarketError> {
        let options = format!("startDate={};endDate={}", range.start(), range.end());
        let joined = codes.join(",");

        tracing::debug!(count = codes.len(), %options, "fetching pct change");
        let resp = self.query("wss", &joined, FIELD_PCT_CHG, &options).await?;

        pct_table_from(&resp, codes, &range.column_label())
    }

    /// # Summary
    /// 查询单一标的在指定交易日的收盘价。
    ///
    /// # Logic
    /// 1. 以 `tradeDate=..;priceAdj=U;cycle=D` 参数串发起 wss 查询。
    /// 2. 取响应的单标量值。
    ///
    /// # Arguments
    /// * `code`: 标的代码。
    /// * `trade_date`: 8 位交易日字符串。
    ///
    /// # Returns
    /// 成功返回收盘点位。
    async fn fetch_close(&self, code: &str, trade_date: &str) -> Result<f64, MarketError> {
        let options = format!("tradeDate={};priceAdj=U;cycle=D", trade_date);
        let resp = self.query("wss", code, FIELD_CLOSE, &options).await?;
        scalar_from(&resp)
    }

    /// # Summary
    /// 查询市场板块在闭区间上的聚合标量。
    ///
    /// # Logic
    /// 1. 按字段拼接终端参数串：成交额查询额外携带单位与币种选项。
    /// 2. 发起 wsee 板块查询并取单标量值。
    ///
    /// # Arguments
    /// * `section_id`: 板块标识。
    /// * `field`: 聚合字段名。
    /// * `range`: 查询闭区间。
    ///
    /// # Returns
    /// 成功返回原始货币单位的聚合值。
    async fn fetch_section_sum(
        &self,
        section_id: &str,
        field: &str,
        range: &DateRange,
    ) -> Result<f64, MarketError> {
        // 成交额字段需要指定单位与币种，资金流字段只带区间
        let options = if field == FIELD_SECTION_AMT {
            format!(
                "unit=1;startDate={};endDate={};currencyType=Cur=CNY;DynamicTime=1",
                range.start(),
                range.end()
            )
        } else {
            format!(
                "startDate={};endDate={};DynamicTime=1",
                range.start(),
                range.end()
            )
        };

        let resp = self.query("wsee", section_id, field, &options).await?;
        scalar_from(&resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> GatewayResponse {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_pct_table_normalizes_units() {
        let resp = parse(
            r#"{"ErrorCode":0,"Codes":["000001.SH","399001.SZ"],"Data":[[2.31,-1.05]]}"#,
        );
        let requested = vec!["000001.SH".to_string(), "399001.SZ".to_string()];
        let table = pct_table_from(&resp, &requested, "20240603_20240607").unwrap();

        assert_eq!(table.change_of("000001.SH"), Some(0.0231));
        assert_eq!(table.change_of("399001.SZ"), Some(-0.0105));
    }

    #[test]
    fn test_missing_value_is_reported_per_code() {
        let resp = parse(r#"{"ErrorCode":0,"Codes":["000001.SH"],"Data":[[null]]}"#);
        let requested = vec!["000001.SH".to_string()];
        let err = pct_table_from(&resp, &requested, "x").unwrap_err();
        assert!(matches!(err, MarketError::MissingData(code) if code == "000001.SH"));
    }

    #[test]
    fn test_requested_code_absent_from_response() {
        let resp = parse(r#"{"ErrorCode":0,"Codes":["000001.SH"],"Data":[[2.31]]}"#);
        let requested = vec!["000001.SH".to_string(), "399006.SZ".to_string()];
        let err = pct_table_from(&resp, &requested, "x").unwrap_err();
        assert!(matches!(err, MarketError::MissingData(code) if code == "399006.SZ"));
    }

    #[test]
    fn test_width_mismatch_is_parse_error() {
        let resp = parse(r#"{"ErrorCode":0,"Codes":["000001.SH","399001.SZ"],"Data":[[2.31]]}"#);
        let requested = vec!["000001.SH".to_string()];
        assert!(matches!(
            pct_table_from(&resp, &requested, "x"),
            Err(MarketError::Parse(_))
        ));
    }

    #[test]
    fn test_scalar_extraction() {
        let resp = parse(r#"{"ErrorCode":0,"Codes":["a001010100000000"],"Data":[[8.5e12]]}"#);
        let value = scalar_from(&resp).unwrap();
        assert!((value - 8.5e12).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_data_is_parse_error() {
        let resp = parse(r#"{"ErrorCode":0,"Codes":[],"Data":[]}"#);
        assert!(matches!(scalar_from(&resp), Err(MarketError::Parse(_))));
    }

    #[test]
    fn test_gateway_error_shape_deserializes() {
        let resp = parse(r#"{"ErrorCode":-40522017,"Message":"invalid windcode"}"#);
        assert_eq!(resp.error_code, -40522017);
        assert_eq!(resp.message.as_deref(), Some("invalid windcode"));
        assert!(resp.codes.is_empty());
    }
}

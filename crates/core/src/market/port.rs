use async_trait::async_trait;

use crate::common::DateRange;
use crate::market::entity::PctChangeTable;
use crate::market::error::MarketError;

/// # Summary
/// 行情数据提供者接口（原始数据源）。
/// 晨会周报的所有外部数据均经由本端口获取。
///
/// # Invariants
/// - 每次调用都是离散的阻塞式请求，实现者不得引入本地重试或降级。
/// - 涨跌幅一律以小数（非百分比）单位返回。
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// # Summary
    /// 查询一组标的在闭区间上的涨跌幅。
    ///
    /// # Logic
    /// 1. 构建数据源批量快照请求。
    /// 2. 执行网络请求并解析响应数据。
    /// 3. 将百分比单位归一化为小数单位。
    ///
    /// # Arguments
    /// * `codes`: 标的代码集合。
    /// * `range`: 查询闭区间。
    ///
    /// # Returns
    /// 成功返回涨跌幅表，请求过的代码必须全部在表中。
    async fn fetch_pct_change(
        &self,
        codes: &[String],
        range: &DateRange,
    ) -> Result<PctChangeTable, MarketError>;

    /// # Summary
    /// 查询单一标的在指定交易日的收盘价。
    ///
    /// # Arguments
    /// * `code`: 标的代码。
    /// * `trade_date`: 8 位交易日字符串。
    ///
    /// # Returns
    /// 成功返回收盘点位。
    async fn fetch_close(&self, code: &str, trade_date: &str) -> Result<f64, MarketError>;

    /// # Summary
    /// 查询市场板块在闭区间上的聚合标量（总成交额、净资金流等）。
    ///
    /// # Arguments
    /// * `section_id`: 数据商的板块标识。
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
    ) -> Result<f64, MarketError>;
}

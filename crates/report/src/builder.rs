use std::path::{Path, PathBuf};
use std::sync::Arc;

use chenhui_core::common::DateRange;
use chenhui_core::config::{self, ConfigError, ReportUniverse, StockGroup};
use chenhui_core::doc::port::DocumentRenderer;
use chenhui_core::market::entity::PctChangeTable;
use chenhui_core::market::port::MarketDataProvider;
use chenhui_core::report::entity::ReportBlock;
use chenhui_core::report::error::ReportError;
use tracing::info;

use crate::describe;

// 全部 A 股板块标识 (日均成交额)
const SECTION_A_SHARE: &str = "a001010100000000";
// 北向资金板块标识
const SECTION_NORTHBOUND: &str = "1000025141000000";
// 南向资金板块标识
const SECTION_SOUTHBOUND: &str = "1000011937000000";
// 板块区间总成交额字段
const FIELD_AMT_SUM: &str = "sec_pq_amt_sum";
// 板块区间净资金流字段
const FIELD_NET_INFLOW: &str = "sec_pq_ncashinflow_sum_chn";
// 概念榜单的固定深度
const WIND_TOP_N: usize = 15;
// 亿元换算基数
const YI: f64 = 1e8;

/// # Summary
/// 晨会周报生成器，单次运行的线性管线。
/// 配置加载一次后只读，所有行情逐次阻塞获取，任何失败立即终止。
///
/// # Invariants
/// - 相同输入与相同行情响应下，两次装配产出完全一致的段落序列。
/// - 段落顺序固定：A 股、港股、美股、署名行。
pub struct MorningTalkWeekly {
    // 报告覆盖的闭区间
    range: DateRange,
    // 报告宇宙配置
    universe: ReportUniverse,
    // 文档输出目录
    output_dir: PathBuf,
    // 行情数据端口
    provider: Arc<dyn MarketDataProvider>,
    // 文档渲染端口
    renderer: Arc<dyn DocumentRenderer>,
}

impl MorningTalkWeekly {
    /// # Summary
    /// 从配置文件路径构造生成器。
    ///
    /// # Logic
    /// 1. 解析并校验 8 位日期区间。
    /// 2. 加载类型化报告宇宙配置，缺键在此即失败。
    ///
    /// # Arguments
    /// * `start`: 起始日期 (YYYYMMDD)。
    /// * `end`: 结束日期 (YYYYMMDD)。
    /// * `config_path`: 配置文件路径。
    /// * `output_dir`: 输出目录。
    /// * `provider`: 行情数据端口实现。
    /// * `renderer`: 文档渲染端口实现。
    ///
    /// # Returns
    /// 成功返回生成器实例。
    pub fn new(
        start: &str,
        end: &str,
        config_path: &Path,
        output_dir: impl Into<PathBuf>,
        provider: Arc<dyn MarketDataProvider>,
        renderer: Arc<dyn DocumentRenderer>,
    ) -> Result<Self, ReportError> {
        let range = DateRange::parse(start, end)?;
        let universe = ReportUniverse::load(config_path)?;
        Ok(Self::from_parts(
            range, universe, output_dir, provider, renderer,
        ))
    }

    /// 以既有的区间与配置直接装配生成器
    pub fn from_parts(
        range: DateRange,
        universe: ReportUniverse,
        output_dir: impl Into<PathBuf>,
        provider: Arc<dyn MarketDataProvider>,
        renderer: Arc<dyn DocumentRenderer>,
    ) -> Self {
        Self {
            range,
            universe,
            output_dir: output_dir.into(),
            provider,
            renderer,
        }
    }

    /// # Summary
    /// 生成并落盘一份晨会周报。
    ///
    /// # Logic
    /// 1. 依固定顺序装配全部段落。
    /// 2. 交由渲染端口写出文档。
    ///
    /// # Returns
    /// 成功返回写出的文件路径，任何环节失败立即返回错误。
    pub async fn generate(&self) -> Result<PathBuf, ReportError> {
        info!(span = %self.range.narrative_span(), "assembling morning talk weekly");
        let blocks = self.build_blocks().await?;

        let path = self.renderer.render(&blocks, &self.output_dir)?;
        info!(path = %path.display(), "morning talk weekly written");
        Ok(path)
    }

    /// # Summary
    /// 装配固定顺序的段落序列。
    ///
    /// # Logic
    /// 1. A 股：旗舰指数叙述、行业榜单、概念榜单。
    /// 2. 港股：旗舰指数叙述、分组个股描述。
    /// 3. 美股：三大股指叙述、分组个股描述。
    /// 4. 固定署名占位行收尾。
    ///
    /// # Returns
    /// 成功返回段落序列，序列只依赖取回的行情数据。
    pub async fn build_blocks(&self) -> Result<Vec<ReportBlock>, ReportError> {
        // 旗舰指数表同时服务 A 股与港股叙述段
        let headline_codes = config::codes_of(&self.universe.index_codes);
        let headline = self
            .provider
            .fetch_pct_change(&headline_codes, &self.range)
            .await?;

        let a_narrative = self.a_share_narrative(&headline).await?;
        let sector_text = self.sector_description().await?;
        let wind_text = self.wind_description().await?;
        let hk_narrative = self.hk_narrative(&headline).await?;
        let hk_groups_text = self.grouped_stocks(&self.universe.hk_groups).await?;
        let us_narrative = self.us_narrative().await?;
        let us_groups_text = self.grouped_stocks(&self.universe.us_groups).await?;

        Ok(vec![
            ReportBlock::heading("1、A股市场"),
            ReportBlock::body(a_narrative),
            ReportBlock::body(sector_text),
            ReportBlock::body(wind_text),
            ReportBlock::heading("2、港股市场"),
            ReportBlock::body(hk_narrative),
            ReportBlock::body(hk_groups_text),
            ReportBlock::heading("3、美股市场"),
            ReportBlock::body(us_narrative),
            ReportBlock::body(us_groups_text),
            ReportBlock::body("（汇报人：）"),
        ])
    }

    /// 在旗舰指数表中按配置名称取符号化描述
    fn index_label(&self, table: &PctChangeTable, name: &str) -> Result<String, ReportError> {
        let code = self.universe.index_code(name)?;
        let change = table
            .change_of(code)
            .ok_or_else(|| ConfigError::CodeNotInTable(code.to_string()))?;
        Ok(describe::sign_label(change))
    }

    /// # Summary
    /// 装配 A 股叙述段：旗舰指数、收盘点位、日均成交额与北向资金。
    ///
    /// # Logic
    /// 1. 七大指数描述取自旗舰指数表。
    /// 2. 上证收盘点位按区间末日单独查询。
    /// 3. 成交额与北向资金按板块聚合后折算为日均亿元。
    async fn a_share_narrative(&self, headline: &PctChangeTable) -> Result<String, ReportError> {
        let szzz = self.index_label(headline, "上证指数")?;
        let szcz = self.index_label(headline, "深证成指")?;
        let cybz = self.index_label(headline, "创业板指")?;
        let kc50 = self.index_label(headline, "科创50")?;
        let zz500 = self.index_label(headline, "中证500")?;
        let zz1000 = self.index_label(headline, "中证1000")?;
        let zz2000 = self.index_label(headline, "中证2000")?;

        let sh_close = self
            .provider
            .fetch_close(self.universe.index_code("上证指数")?, self.range.end())
            .await?;

        let days = self.range.span_days() as f64;
        let turnover = self
            .provider
            .fetch_section_sum(SECTION_A_SHARE, FIELD_AMT_SUM, &self.range)
            .await?
            / YI
            / days;
        let northbound = self
            .provider
            .fetch_section_sum(SECTION_NORTHBOUND, FIELD_NET_INFLOW, &self.range)
            .await?
            / YI
            / days;

        Ok(format!(
            "上周（{}），A股三大股指__。截至收盘，沪指{}，报{:.2}点，深证成指{}，创业板指{}，\
             科创50{}，中证500{}，中证1000{}，中证2000{}。\
             市场日均成交额{:.2}亿元，北向资金{:.2}亿元。",
            self.range.narrative_span(),
            szzz,
            sh_close,
            szcz,
            cybz,
            kc50,
            zz500,
            zz1000,
            zz2000,
            turnover,
            northbound
        ))
    }

    /// 装配申万行业榜单句对
    async fn sector_description(&self) -> Result<String, ReportError> {
        let codes = config::codes_of(&self.universe.sw_sectors);
        let table = self.provider.fetch_pct_change(&codes, &self.range).await?;
        let rows = describe::derive_rows(&table, &self.universe.sw_sectors)?;
        Ok(describe::describe_sectors(&rows))
    }

    /// 装配 wind 热门概念榜单句对
    async fn wind_description(&self) -> Result<String, ReportError> {
        let codes = config::codes_of(&self.universe.wind_indices);
        let table = self.provider.fetch_pct_change(&codes, &self.range).await?;
        let rows = describe::derive_rows(&table, &self.universe.wind_indices)?;
        Ok(describe::describe_wind_indices(&rows, WIND_TOP_N))
    }

    /// # Summary
    /// 装配港股叙述段：三大股指、恒指收盘点位与南向资金。
    async fn hk_narrative(&self, headline: &PctChangeTable) -> Result<String, ReportError> {
        let hszs = self.index_label(headline, "恒生指数")?;
        let hskj = self.index_label(headline, "恒生科技指数")?;
        let hsgq = self.index_label(headline, "恒生国企指数")?;

        let hsi_close = self
            .provider
            .fetch_close(self.universe.index_code("恒生指数")?, self.range.end())
            .await?;

        let days = self.range.span_days() as f64;
        let southbound = self
            .provider
            .fetch_section_sum(SECTION_SOUTHBOUND, FIELD_NET_INFLOW, &self.range)
            .await?
            / YI
            / days;

        Ok(format!(
            "上周（{}），港股三大股指__。截至收盘，恒生指数{}，报{:.2}点，\
             恒生科技指数{}，恒生国企指数{}。南向资金{:.2}亿港元。",
            self.range.narrative_span(),
            hszs,
            hsi_close,
            hskj,
            hsgq,
            southbound
        ))
    }

    /// 装配美股叙述段：三大股指描述，无收盘点位与资金流
    async fn us_narrative(&self) -> Result<String, ReportError> {
        let codes = config::codes_of(&self.universe.us_index_codes);
        let table = self.provider.fetch_pct_change(&codes, &self.range).await?;

        let us_label = |name: &str| -> Result<String, ReportError> {
            let code = self.universe.us_index_code(name)?;
            let change = table
                .change_of(code)
                .ok_or_else(|| ConfigError::CodeNotInTable(code.to_string()))?;
            Ok(describe::sign_label(change))
        };

        Ok(format!(
            "上周（{}），美股三大股指__。截至收盘，道指{}，标普500指数{}，纳指{}。",
            self.range.narrative_span(),
            us_label("道琼斯工业指数")?,
            us_label("标普500指数")?,
            us_label("纳斯达克指数")?
        ))
    }

    /// 取回分组成分股行情并装配分组描述
    async fn grouped_stocks(&self, groups: &[StockGroup]) -> Result<String, ReportError> {
        let codes = config::group_codes(groups);
        let table = self.provider.fetch_pct_change(&codes, &self.range).await?;
        Ok(describe::describe_groups(groups, &table)?)
    }
}

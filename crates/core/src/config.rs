use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 配置域错误枚举，覆盖文件读取、解析与键查找失败。
#[derive(Error, Debug)]
pub enum ConfigError {
    // 配置文件不可读
    #[error("Config io error: {0}")]
    Io(String),
    // YAML 结构不符合类型化定义
    #[error("Config parse error: {0}")]
    Parse(String),
    // 按名称查找标的失败
    #[error("Missing instrument in config: {0}")]
    MissingKey(String),
    // 行情表中缺少配置引用的代码
    #[error("Code absent from fetched table: {0}")]
    CodeNotInTable(String),
}

/// # Summary
/// 具名标的记录，将展示名称绑定到数据商标的代码。
///
/// # Invariants
/// - `code` 必须是数据商可识别的标的代码。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedInstrument {
    // 展示名称 (例如: 上证指数)
    pub name: String,
    // 标的代码 (例如: 000001.SH)
    pub code: String,
}

/// # Summary
/// 个股分组记录，一个子板块下的有序成分股列表。
///
/// # Invariants
/// - `stocks` 的顺序即配置顺序，不参与重排。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockGroup {
    // 分组标题 (例如: 港股科技股)
    pub name: String,
    // 成分股列表
    pub stocks: Vec<NamedInstrument>,
}

/// # Summary
/// 报告宇宙配置，晨会周报覆盖的全部标的集合。
/// 每个列表的出现顺序就是渲染顺序，配置一次加载后全程只读。
///
/// # Invariants
/// - 全部顶层键必须存在，缺失在解析期即失败。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportUniverse {
    // A 股与港股旗舰指数 (叙述段落用)
    pub index_codes: Vec<NamedInstrument>,
    // 美股三大股指
    pub us_index_codes: Vec<NamedInstrument>,
    // 申万一级行业指数
    pub sw_sectors: Vec<NamedInstrument>,
    // wind 热门概念指数
    pub wind_indices: Vec<NamedInstrument>,
    // 港股个股分组
    pub hk_groups: Vec<StockGroup>,
    // 美股个股分组
    pub us_groups: Vec<StockGroup>,
}

impl ReportUniverse {
    /// # Summary
    /// 从 YAML 文件加载并类型化校验报告宇宙。
    ///
    /// # Logic
    /// 1. 读取文件全文。
    /// 2. 经 serde_yaml 反序列化，任何缺键或结构错误立即失败。
    ///
    /// # Arguments
    /// * `path`: 配置文件路径。
    ///
    /// # Returns
    /// 成功返回配置实体，失败返回 ConfigError。
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        serde_yaml::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 在旗舰指数列表中按展示名称查找代码
    pub fn index_code(&self, name: &str) -> Result<&str, ConfigError> {
        Self::code_of(&self.index_codes, name)
    }

    /// 在美股指数列表中按展示名称查找代码
    pub fn us_index_code(&self, name: &str) -> Result<&str, ConfigError> {
        Self::code_of(&self.us_index_codes, name)
    }

    fn code_of<'a>(list: &'a [NamedInstrument], name: &str) -> Result<&'a str, ConfigError> {
        list.iter()
            .find(|item| item.name == name)
            .map(|item| item.code.as_str())
            .ok_or_else(|| ConfigError::MissingKey(name.to_string()))
    }
}

/// 抽取一个具名标的列表的全部代码，保持配置顺序
pub fn codes_of(list: &[NamedInstrument]) -> Vec<String> {
    list.iter().map(|item| item.code.clone()).collect()
}

/// 抽取分组列表下所有成分股代码，按分组顺序展平
pub fn group_codes(groups: &[StockGroup]) -> Vec<String> {
    groups
        .iter()
        .flat_map(|group| group.stocks.iter().map(|stock| stock.code.clone()))
        .collect()
}

use serde::{Deserialize, Serialize};

/// # Summary
/// 报告段落实体，最终文档中的一个段落单元。
///
/// # Invariants
/// - `bold` 仅对市场小节标题置位。
/// - 文本中允许内嵌 `\n   ` 软换行，由渲染端转为段内换行。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportBlock {
    // 段落文本
    pub text: String,
    // 是否加粗 (市场小节标题)
    pub bold: bool,
}

impl ReportBlock {
    /// 普通正文段落
    pub fn body(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    /// 加粗的小节标题段落
    pub fn heading(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// # Summary
/// 派生行实体，一条带符号描述与展示名称的涨跌幅记录。
///
/// # Invariants
/// - `label` 的方向必须与 `change` 的符号严格一致，0 对应"平收"。
#[derive(Debug, Clone)]
pub struct MoverRow {
    // 标的代码
    pub code: String,
    // 展示名称 (中文简称)
    pub name: String,
    // 小数涨跌幅
    pub change: f64,
    // 带符号的涨跌描述 (例如: 涨2.31%)
    pub label: String,
}

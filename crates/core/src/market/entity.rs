use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// # Summary
/// 区间涨跌幅表实体，一次行情查询的结果快照。
/// 每个标的代码对应整个闭区间上的一个小数涨跌幅（非百分比单位）。
///
/// # Invariants
/// - 请求过的代码必须全部在表中出现。
/// - 内部使用有序映射，迭代顺序与哈希无关。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PctChangeTable {
    // 表的列标签 (例如: 20240603_20240607)
    column_label: String,
    // 代码到小数涨跌幅的映射
    rows: BTreeMap<String, f64>,
}

impl PctChangeTable {
    /// 以列标签创建空表
    pub fn new(column_label: impl Into<String>) -> Self {
        Self {
            column_label: column_label.into(),
            rows: BTreeMap::new(),
        }
    }

    /// 表的列标签
    pub fn column_label(&self) -> &str {
        &self.column_label
    }

    /// 写入一个标的的区间涨跌幅
    pub fn insert(&mut self, code: impl Into<String>, change: f64) {
        self.rows.insert(code.into(), change);
    }

    /// 按代码读取区间涨跌幅，缺失返回 None
    pub fn change_of(&self, code: &str) -> Option<f64> {
        self.rows.get(code).copied()
    }

    /// 表中标的数量
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 表是否为空
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

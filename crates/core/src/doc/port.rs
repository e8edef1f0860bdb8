use std::path::{Path, PathBuf};

use crate::doc::error::DocError;
use crate::report::entity::ReportBlock;

/// # Summary
/// 文档渲染端口，把有序段落序列写成一份二进制文档。
///
/// # Invariants
/// - 单次调用写出且仅写出一个文件；失败时不得留下部分写入的产物。
/// - 样式规则是静态的，不随段落内容变化。
pub trait DocumentRenderer: Send + Sync {
    /// # Summary
    /// 渲染并落盘一份晨会纪要文档。
    ///
    /// # Logic
    /// 1. 应用固定标题、日期行与段落样式。
    /// 2. 以生成日期推导文件名并写入输出目录。
    ///
    /// # Arguments
    /// * `blocks`: 有序段落序列。
    /// * `output_dir`: 输出目录。
    ///
    /// # Returns
    /// 成功返回写出的文件路径，失败返回 DocError。
    fn render(&self, blocks: &[ReportBlock], output_dir: &Path) -> Result<PathBuf, DocError>;
}

//! # `chenhui-doc` - 文档渲染适配层
//!
//! 本 crate 实现 `chenhui-core` 的 `DocumentRenderer` 端口，
//! 用 `docx-rs` 按固定样式规则把段落序列写成晨会纪要 Word 文档。
//! 样式是静态模板：楷体、固定字号、首行缩进与 1.5 倍行距。

pub mod docx;

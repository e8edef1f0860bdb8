use std::io::Cursor;
use std::path::{Path, PathBuf};

use chenhui_core::doc::error::DocError;
use chenhui_core::doc::port::DocumentRenderer;
use chenhui_core::report::entity::ReportBlock;
use chrono::Local;
use docx_rs::{
    AlignmentType, BreakType, Docx, LineSpacing, LineSpacingType, Paragraph, Run, RunFonts,
    SpecialIndentType,
};
use tracing::info;

// 全文统一使用楷体
const FONT_EAST_ASIA: &str = "楷体";
// 标题字号 (半磅单位, 14pt)
const SIZE_TITLE: usize = 28;
// 正文字号 (半磅单位, 12pt)
const SIZE_BODY: usize = 24;
// 首行缩进 2 字符, 0.74cm 对应的缇值
const FIRST_LINE_INDENT: i32 = 420;

/// # Summary
/// 晨会纪要的 Word 渲染器实现。
/// 样式规则全部是静态的：居中加粗标题、右对齐日期行、
/// "市场概况"小节头与统一的正文段落样式。
///
/// # Invariants
/// - 文档先在内存中打包完成，再一次性落盘；
///   渲染失败不会在目标目录留下部分写入的文件。
#[derive(Default)]
pub struct DocxRenderer;

impl DocxRenderer {
    /// 创建一个新的 DocxRenderer 实例
    pub fn new() -> Self {
        Self
    }

    /// 统一字体的文字 run
    fn styled_run(text: &str, size: usize) -> Run {
        Self::text_with_breaks(Run::new(), text)
            .size(size)
            .fonts(
                RunFonts::new()
                    .ascii(FONT_EAST_ASIA)
                    .east_asia(FONT_EAST_ASIA),
            )
    }

    /// # Summary
    /// 把内嵌 `\n` 软换行的文本展开为带段内换行的 run。
    ///
    /// # Logic
    /// 1. 按 `\n` 切分文本。
    /// 2. 首段直接写入，后续每段先插入换行符再写入，
    ///    保留原文的悬挂空格。
    fn text_with_breaks(mut run: Run, text: &str) -> Run {
        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                run = run.add_break(BreakType::TextWrapping);
            }
            run = run.add_text(segment);
        }
        run
    }

    /// 推导当日的文档文件名
    fn file_name() -> String {
        format!(
            "某险资权益投资部晨会纪要（{}）.docx",
            Local::now().format("%Y%m%d")
        )
    }

    /// 组装完整文档
    fn assemble(blocks: &[ReportBlock]) -> Docx {
        let mut doc = Docx::new()
            // 居中加粗标题
            .add_paragraph(
                Paragraph::new()
                    .add_run(Self::styled_run("__权益投资部晨会纪要", SIZE_TITLE).bold().color("000000"))
                    .align(AlignmentType::Center),
            )
            // 右对齐的生成日期行
            .add_paragraph(
                Paragraph::new()
                    .add_run(Self::styled_run(
                        &Local::now().format("%Y年%m月%d日").to_string(),
                        SIZE_BODY,
                    ))
                    .align(AlignmentType::Right),
            )
            // 空行
            .add_paragraph(Paragraph::new())
            // "市场概况" 小节头
            .add_paragraph(
                Paragraph::new()
                    .add_run(Self::styled_run("市场概况", SIZE_TITLE).bold())
                    .line_spacing(
                        // 1.5 倍行距 (240 的 1.5 倍)
                        LineSpacing::new().line_rule(LineSpacingType::Auto).line(360),
                    ),
            );

        for block in blocks {
            let mut run = Self::styled_run(&block.text, SIZE_BODY);
            if block.bold {
                run = run.bold();
            }
            doc = doc.add_paragraph(
                Paragraph::new()
                    .add_run(run)
                    .indent(
                        None,
                        Some(SpecialIndentType::FirstLine(FIRST_LINE_INDENT)),
                        None,
                        None,
                    )
                    .line_spacing(
                        // 1.5 倍行距，段后间距归零
                        LineSpacing::new()
                            .line_rule(LineSpacingType::Auto)
                            .line(360)
                            .after(0),
                    ),
            );
        }

        doc
    }
}

impl DocumentRenderer for DocxRenderer {
    /// # Summary
    /// 渲染并落盘一份晨会纪要文档。
    ///
    /// # Logic
    /// 1. 按静态样式规则组装全部段落。
    /// 2. 在内存缓冲中打包 docx。
    /// 3. 以当日日期推导文件名后一次性写入输出目录。
    ///
    /// # Arguments
    /// * `blocks`: 有序段落序列。
    /// * `output_dir`: 输出目录。
    ///
    /// # Returns
    /// 成功返回写出的文件路径，失败返回 DocError。
    fn render(&self, blocks: &[ReportBlock], output_dir: &Path) -> Result<PathBuf, DocError> {
        let mut buffer = Cursor::new(Vec::new());
        Self::assemble(blocks)
            .build()
            .pack(&mut buffer)
            .map_err(|e| DocError::Render(e.to_string()))?;

        let path = output_dir.join(Self::file_name());
        std::fs::write(&path, buffer.into_inner())
            .map_err(|e| DocError::Io(format!("{}: {}", path.display(), e)))?;

        info!(path = %path.display(), blocks = blocks.len(), "docx written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_blocks() -> Vec<ReportBlock> {
        vec![
            ReportBlock::heading("1、A股市场"),
            ReportBlock::body("上周（20240603-20240607），A股三大股指__。"),
            ReportBlock::body("wind热门概念全部下跌。\n   仅2个概念下跌，茅指数跌2.00%。"),
            ReportBlock::body("（汇报人：）"),
        ]
    }

    #[test]
    fn test_render_writes_dated_docx() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = DocxRenderer::new();

        let path = renderer.render(&sample_blocks(), dir.path()).unwrap();
        let name = path.file_name().unwrap().to_string_lossy();

        assert!(name.starts_with("某险资权益投资部晨会纪要（"));
        assert!(name.ends_with("）.docx"));
        let today = Local::now().format("%Y%m%d").to_string();
        assert!(name.contains(&today));

        // docx 本质是 zip 包，写出的文件必须非空且带 PK 头
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_unwritable_destination_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-subdir");
        let renderer = DocxRenderer::new();

        let err = renderer.render(&sample_blocks(), &missing).unwrap_err();
        assert!(matches!(err, DocError::Io(_)));
        assert!(!missing.exists());
    }
}

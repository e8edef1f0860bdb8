use thiserror::Error;

/// 文档输出域错误枚举。
#[derive(Error, Debug)]
pub enum DocError {
    // 输出目录不可写或文件创建失败
    #[error("Document io error: {0}")]
    Io(String),
    // 文档构建或打包失败
    #[error("Document render error: {0}")]
    Render(String),
}

use std::path::PathBuf;
use std::sync::Arc;

use chenhui_doc::docx::DocxRenderer;
use chenhui_feed::wind::WindGatewayProvider;
use chenhui_report::builder::MorningTalkWeekly;
use clap::Parser;
use tracing::info;

/// 晨会周报命令行参数
#[derive(Parser, Debug)]
#[command(name = "chenhui")]
#[command(version = "0.1.0")]
#[command(about = "权益投资部晨会周报生成器", long_about = None)]
struct Cli {
    /// 起始日期 (YYYYMMDD)
    #[arg(long)]
    start: String,

    /// 结束日期 (YYYYMMDD)
    #[arg(long)]
    end: String,

    /// 报告宇宙配置文件路径
    #[arg(long, default_value = "config/mt_weekly.yaml")]
    config: PathBuf,

    /// 文档输出目录
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// 万得终端网关根地址
    #[arg(long, default_value = "http://127.0.0.1:8086")]
    gateway: String,
}

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化行情与渲染适配器并注入 MorningTalkWeekly。
///
/// # Logic
/// 1. 初始化全局日志。
/// 2. 实例化基础设施层（Feed、Doc）。
/// 3. 构造报告生成器并执行一次生成。
/// 4. 任意环节失败即以非零码退出。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 初始化日志
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    info!(start = %cli.start, end = %cli.end, "Chenhui weekly starting...");

    // 2. 实例化基础设施层
    let provider = Arc::new(WindGatewayProvider::new(&cli.gateway)?);
    let renderer = Arc::new(DocxRenderer::new());

    // 3. 构造报告生成器（注入 Core Trait 抽象）
    let weekly = MorningTalkWeekly::new(
        &cli.start,
        &cli.end,
        &cli.config,
        &cli.output_dir,
        provider,
        renderer,
    )?;

    // 4. 单次线性生成，完成即退出
    let path = weekly.generate().await?;
    info!(path = %path.display(), "Morning talk weekly generated.");

    Ok(())
}

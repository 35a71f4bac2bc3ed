//! # Screen Text - 无头宿主
//!
//! 加载配置与指令时间轴，以 60 帧每秒驱动文本框系统，
//! 结束后输出最终的文本框状态（JSON）或渲染表面样式表（CSS）。
//!
//! ```text
//! screen-text --script timeline.json [--config config.json] [--frames N] [--realtime] [--format css]
//! ```

mod timeline;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{Level, debug, info};

use screen_text::{FRAME_INTERVAL, Overlay, ScreenText, ScreenTextConfig};
use timeline::Timeline;

/// 未指定帧数时的帧数上限
const MAX_FRAMES: u64 = 60 * 60 * 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// 文本框状态（JSON）
    Json,
    /// 渲染表面样式表
    Css,
}

#[derive(Debug, Parser)]
#[command(name = "screen-text", about = "无头运行文本框指令时间轴")]
struct Args {
    /// 指令时间轴（JSON）
    #[arg(long)]
    script: PathBuf,

    /// 配置文件（JSON），缺省时使用默认配置
    #[arg(long)]
    config: Option<PathBuf>,

    /// 运行的帧数；缺省时运行到最后一条指令执行完且所有动画结束
    #[arg(long)]
    frames: Option<u64>,

    /// 按真实时间（60 帧每秒）推进
    #[arg(long)]
    realtime: bool,

    /// 输出格式
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => ScreenTextConfig::load(path),
        None => ScreenTextConfig::default(),
    };
    let timeline = Timeline::load(&args.script)?;
    info!(steps = timeline.steps.len(), "时间轴加载成功");

    let mut screen = ScreenText::headless(config);
    let frames = run(&timeline, &mut screen, args.frames, args.realtime).await;
    info!(frames = frames, overlays = screen.overlays().count(), "运行结束");

    let output = match args.format {
        OutputFormat::Json => {
            let mut overlays: Vec<&Overlay> = screen.overlays().collect();
            overlays.sort_by(|a, b| a.key.cmp(&b.key));
            serde_json::to_string_pretty(&overlays)?
        }
        OutputFormat::Css => screen.surface().to_stylesheet(),
    };
    println!("{output}");

    Ok(())
}

/// 逐帧执行时间轴，返回运行的帧数
async fn run(
    timeline: &Timeline,
    screen: &mut ScreenText,
    frames: Option<u64>,
    realtime: bool,
) -> u64 {
    let mut interval = tokio::time::interval(FRAME_INTERVAL);
    let last_frame = timeline.last_frame();
    let mut frame = 0;

    loop {
        let done = match frames {
            Some(limit) => frame >= limit,
            None => {
                (frame > last_frame && !screen.has_active_animations()) || frame >= MAX_FRAMES
            }
        };
        if done {
            break;
        }

        if realtime {
            interval.tick().await;
        }

        let executed = timeline.run_frame(frame, screen);
        if executed > 0 {
            debug!(frame = frame, commands = executed, "执行指令");
        }
        screen.tick();
        frame += 1;
    }

    frame
}

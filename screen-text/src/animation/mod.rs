//! # Animation 模块
//!
//! 文本框的移动/淡入淡出/旋转动画。
//!
//! ## 核心设计
//!
//! - 按帧计数，固定 60 帧每秒，由宿主调用 `tick` 驱动
//! - 只有线性插值
//! - 起点取自文本框的视觉状态记录，不回读渲染结果
//! - 同一文本框同一时刻最多一个任务，新任务替换旧任务
//! - 文本框被擦除后，其任务在下一帧被丢弃
//!
//! ## 状态流转
//!
//! ```text
//! animate() ──► Running ──tick (elapsed < duration)──► Running
//!                  │
//!                  └──tick (elapsed >= duration)──► Completed（丢弃）
//! ```

mod engine;
mod task;

use std::time::Duration;

pub use engine::{AnimationEngine, resolve_duration};
pub use task::{AnimationTask, ColorTrack, TaskState};

/// 每秒帧数
pub const FRAME_RATE: u32 = 60;

/// 帧间隔（约 16.67ms）
pub const FRAME_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

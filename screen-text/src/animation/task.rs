//! # Task 模块
//!
//! 单次移动动画实例。
//!
//! 动画按帧计数而不是按真实时间：每次 `advance` 前进一帧，
//! `progress = elapsed / duration`，并被限制在 0.0 - 1.0。

use crate::key::OverlayKey;
use crate::style::{ColorMode, Rgba};
use crate::surface::StylePatch;
use crate::transform::VisualState;

/// 动画状态
///
/// 任务创建即进入 `Running`，没有暂停或取消状态；
/// 取消由引擎直接丢弃任务完成。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskState {
    /// 正在播放
    #[default]
    Running,
    /// 已完成
    Completed,
}

/// 颜色轨道
#[derive(Debug, Clone, PartialEq)]
pub enum ColorTrack {
    /// 不修改颜色
    Unchanged,
    /// 每帧直接写入目标颜色
    Hold(String),
    /// 逐通道插值，末帧写入目标颜色字符串
    Interpolate { from: Rgba, to: Rgba, target: String },
}

impl ColorTrack {
    /// 根据模式构建颜色轨道
    ///
    /// 插值模式下任一端颜色无法解析时退化为 `Hold`。
    pub fn new(mode: ColorMode, current: &str, target: Option<&str>) -> Self {
        let Some(target) = target else {
            return Self::Unchanged;
        };

        match mode {
            ColorMode::Hold => Self::Hold(target.to_string()),
            ColorMode::Interpolate => match (Rgba::parse(current), Rgba::parse(target)) {
                (Some(from), Some(to)) => Self::Interpolate {
                    from,
                    to,
                    target: target.to_string(),
                },
                _ => Self::Hold(target.to_string()),
            },
        }
    }

    /// 计算给定进度下的颜色
    pub fn at(&self, progress: f32) -> Option<String> {
        match self {
            Self::Unchanged => None,
            Self::Hold(target) => Some(target.clone()),
            Self::Interpolate { target, .. } if progress >= 1.0 => Some(target.clone()),
            Self::Interpolate { from, to, .. } => {
                Some(from.lerp(*to, progress.clamp(0.0, 1.0)).to_css())
            }
        }
    }
}

/// 移动动画任务
#[derive(Debug, Clone)]
pub struct AnimationTask {
    /// 目标文本框
    pub key: OverlayKey,
    /// 起点快照
    pub start: VisualState,
    /// 终点快照
    pub target: VisualState,
    pub color: ColorTrack,
    /// 总帧数（至少为 1）
    duration: u32,
    /// 已播放帧数
    elapsed: u32,
    state: TaskState,
}

impl AnimationTask {
    pub fn new(
        key: OverlayKey,
        start: VisualState,
        target: VisualState,
        color: ColorTrack,
        duration: u32,
    ) -> Self {
        Self {
            key,
            start,
            target,
            color,
            duration: duration.max(1),
            elapsed: 0,
            state: TaskState::Running,
        }
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == TaskState::Completed
    }

    /// 当前进度 (0.0 - 1.0)
    pub fn progress(&self) -> f32 {
        (self.elapsed as f32 / self.duration as f32).clamp(0.0, 1.0)
    }

    /// 计算给定进度下的样式补丁
    pub fn frame_at(&self, progress: f32) -> StylePatch {
        StylePatch {
            state: Some(self.start.lerp(&self.target, progress)),
            color: self.color.at(progress),
        }
    }

    /// 前进一帧并返回该帧的样式补丁
    ///
    /// 已完成的任务不再前进，重复返回终点补丁。
    pub fn advance(&mut self) -> StylePatch {
        if self.state == TaskState::Running {
            self.elapsed += 1;
            if self.elapsed >= self.duration {
                self.state = TaskState::Completed;
            }
        }
        self.frame_at(self.progress())
    }
}

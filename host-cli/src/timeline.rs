//! # Timeline 模块
//!
//! 无头运行的指令时间轴：在指定帧执行指令。
//!
//! ```json
//! {
//!   "steps": [
//!     { "frame": 0,  "command": { "showTextBox": { "id": "hp", "text": "100", "x": 10, "y": 20 } } },
//!     { "frame": 10, "command": { "moveTextBox": { "id": "hp", "x": 50, "y": 60, "duration": 30 } } }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use screen_text::{Command, RenderSurface, ScreenText};

/// 时间轴中的一步
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// 执行帧（在该帧的 tick 之前执行）
    #[serde(default)]
    pub frame: u64,
    pub command: Command,
}

/// 指令时间轴
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Timeline {
    /// 从 JSON 文件加载，步骤按帧排序（同帧保持原顺序）
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取时间轴失败: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("解析时间轴失败: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut timeline: Self = serde_json::from_str(content)?;
        timeline.steps.sort_by_key(|step| step.frame);
        Ok(timeline)
    }

    /// 最后一条指令所在的帧
    pub fn last_frame(&self) -> u64 {
        self.steps.last().map(|step| step.frame).unwrap_or(0)
    }

    /// 执行所有属于 `frame` 的指令，返回执行的条数
    pub fn run_frame<S: RenderSurface>(&self, frame: u64, screen: &mut ScreenText<S>) -> usize {
        let mut executed = 0;
        for step in self.steps.iter().filter(|step| step.frame == frame) {
            screen.execute(&step.command);
            executed += 1;
        }
        executed
    }
}

//! # Screen Text
//!
//! 游戏画面上的临时文本框：带样式的显示、擦除，以及按帧驱动的
//! 移动/淡入淡出/旋转动画。
//!
//! ## 架构概述
//!
//! `screen-text` 是纯逻辑核心，不依赖任何渲染引擎。
//! 宿主通过 [`RenderSurface`] 提供"创建带样式元素"和"应用样式补丁"的能力，
//! 并以 60 帧每秒调用 [`ScreenText::tick`]：
//!
//! ```text
//! Host                               ScreenText
//!   │                                    │
//!   │──── show / move / erase ─────────►│ OverlayRegistry / AnimationEngine
//!   │                                    │
//!   │──── tick() (60 Hz) ──────────────►│
//!   │◄─── RenderSurface::apply_patch ───│
//! ```
//!
//! ## 使用示例
//!
//! ```ignore
//! use screen_text::{MoveOptions, ScreenText, ScreenTextConfig, ShowOptions};
//!
//! let mut screen = ScreenText::headless(ScreenTextConfig::default());
//! screen.show_text_box("hp", "100", 10.0, 20.0, &ShowOptions::default());
//! screen.move_text_box("hp", 50.0, 60.0, &MoveOptions {
//!     duration: Some(30),
//!     ..Default::default()
//! });
//!
//! while screen.has_active_animations() {
//!     screen.tick();
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`screen`]：会话对象与宿主 API
//! - [`registry`]：文本框注册表
//! - [`animation`]：动画引擎与动画任务
//! - [`style`]：样式模型与默认值回退
//! - [`surface`]：渲染表面抽象与内存 CSS 实现
//! - [`config`]：默认值配置
//! - [`command`]：可序列化的指令

pub mod animation;
pub mod command;
pub mod config;
pub mod error;
pub mod flicker;
pub mod key;
pub mod overlay;
pub mod registry;
pub mod screen;
pub mod style;
pub mod surface;
pub mod transform;

// 重导出核心类型
pub use animation::{AnimationEngine, AnimationTask, FRAME_INTERVAL, FRAME_RATE, TaskState};
pub use command::Command;
pub use config::ScreenTextConfig;
pub use error::{ConfigError, SurfaceError, SurfaceResult};
pub use flicker::{FLICKER, FlickerEffect};
pub use key::OverlayKey;
pub use overlay::Overlay;
pub use registry::OverlayRegistry;
pub use screen::ScreenText;
pub use style::{ColorMode, MoveOptions, Origin, OverlayStyle, ShowOptions, Viewport};
pub use surface::{CssElement, CssSurface, ElementSpec, RenderSurface, StylePatch};
pub use transform::{Scale, Vec2, VisualState};

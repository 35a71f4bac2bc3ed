//! # Screen 模块
//!
//! [`ScreenText`] 是文本框系统的会话对象，持有配置、注册表、动画引擎和渲染表面，
//! 生命周期与所属画面绑定。
//!
//! 所有操作立即返回、从不报错：未知标识符、缺失参数、渲染表面失败
//! 都退化为空操作或默认值，并写入日志。持续的工作通过宿主每帧调用
//! [`ScreenText::tick`] 完成。

use tracing::debug;

use crate::animation::AnimationEngine;
use crate::command::Command;
use crate::config::ScreenTextConfig;
use crate::key::OverlayKey;
use crate::overlay::Overlay;
use crate::registry::OverlayRegistry;
use crate::style::{MoveOptions, ShowOptions};
use crate::surface::{CssSurface, RenderSurface};
use crate::transform::Vec2;

/// 文本框会话
#[derive(Debug)]
pub struct ScreenText<S: RenderSurface = CssSurface> {
    config: ScreenTextConfig,
    registry: OverlayRegistry,
    engine: AnimationEngine,
    surface: S,
    /// 已推进的帧数
    frame: u64,
}

impl ScreenText<CssSurface> {
    /// 使用内存 CSS 渲染表面创建会话
    pub fn headless(config: ScreenTextConfig) -> Self {
        Self::new(config, CssSurface::new())
    }
}

impl<S: RenderSurface> ScreenText<S> {
    pub fn new(config: ScreenTextConfig, surface: S) -> Self {
        Self {
            config,
            registry: OverlayRegistry::new(),
            engine: AnimationEngine::new(),
            surface,
            frame: 0,
        }
    }

    /// 显示文本框（`showTextBox`）
    pub fn show_text_box(
        &mut self,
        id: impl Into<OverlayKey>,
        text: impl Into<String>,
        x: f32,
        y: f32,
        options: &ShowOptions,
    ) {
        let key = id.into();
        // 旧文本框上的动画不会延续到新文本框
        self.engine.cancel(&key);
        self.registry
            .show(key, text, x, y, options, &self.config, &mut self.surface);
    }

    /// 擦除文本框（`eraseTextBox`），同时取消其动画
    pub fn erase_text_box(&mut self, id: impl Into<OverlayKey>) {
        let key = id.into();
        if self.engine.cancel(&key) {
            debug!(key = %key, "擦除时取消移动动画");
        }
        self.registry.erase(&key, &mut self.surface);
    }

    /// 移动文本框（`moveTextBox`）
    pub fn move_text_box(
        &mut self,
        id: impl Into<OverlayKey>,
        x: f32,
        y: f32,
        options: &MoveOptions,
    ) {
        let key = id.into();
        self.engine
            .animate(&self.registry, &key, x, y, options, &self.config);
    }

    /// 执行指令
    pub fn execute(&mut self, command: &Command) {
        match command {
            Command::ShowTextBox {
                id,
                text,
                x,
                y,
                options,
            } => self.show_text_box(id, text.as_str(), *x, *y, options),
            Command::EraseTextBox { id } => self.erase_text_box(id),
            Command::MoveTextBox { id, x, y, options } => {
                self.move_text_box(id, *x, *y, options)
            }
        }
    }

    /// 推进一帧（宿主以 60 帧每秒调用）
    pub fn tick(&mut self) {
        self.frame += 1;
        self.engine.tick(&mut self.registry, &mut self.surface);
    }

    // ========== 查询方法 ==========

    pub fn overlay(&self, id: impl Into<OverlayKey>) -> Option<&Overlay> {
        self.registry.get(&id.into())
    }

    pub fn overlays(&self) -> impl Iterator<Item = &Overlay> {
        self.registry.iter()
    }

    /// 文本框在视口中的实际像素位置
    pub fn resolved_position(&self, id: impl Into<OverlayKey>) -> Option<Vec2> {
        self.overlay(id)
            .map(|overlay| overlay.resolved_position(self.config.viewport))
    }

    pub fn is_animating(&self, id: impl Into<OverlayKey>) -> bool {
        self.engine.is_animating(&id.into())
    }

    /// 是否有进行中的动画
    pub fn has_active_animations(&self) -> bool {
        self.engine.active_count() > 0
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn config(&self) -> &ScreenTextConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

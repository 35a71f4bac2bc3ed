//! # Registry 模块
//!
//! 文本框注册表：标识符到文本框实例的映射。
//!
//! 同一标识符任何时刻最多只有一个文本框；重复 `show` 先销毁旧的再创建新的
//! （替换，不合并）。

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::config::ScreenTextConfig;
use crate::flicker::FLICKER;
use crate::key::OverlayKey;
use crate::overlay::Overlay;
use crate::style::ShowOptions;
use crate::surface::{ElementSpec, RenderSurface};

/// 文本框注册表
#[derive(Debug, Default)]
pub struct OverlayRegistry {
    overlays: HashMap<OverlayKey, Overlay>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 显示文本框
    ///
    /// 已存在同名文本框时先擦除。未提供的样式字段按
    /// 参数 → 配置 → 内置默认值 的顺序回退。
    pub fn show<S: RenderSurface + ?Sized>(
        &mut self,
        key: OverlayKey,
        text: impl Into<String>,
        x: f32,
        y: f32,
        options: &ShowOptions,
        config: &ScreenTextConfig,
        surface: &mut S,
    ) -> &Overlay {
        self.erase(&key, surface);

        let (style, state) = options.resolve(x, y, config);
        let overlay = Overlay::new(key.clone(), text, style, state);

        let flicker = if overlay.style.flicker {
            ensure_pulse_definition(surface);
            Some(FLICKER)
        } else {
            None
        };

        let spec = ElementSpec {
            id: overlay.element_id(),
            text: overlay.text.clone(),
            style: overlay.style.clone(),
            state: overlay.state,
            flicker,
        };
        if let Err(e) = surface.create_element(&spec) {
            warn!(key = %key, error = %e, "创建文本框元素失败");
        }

        debug!(key = %key, x = x, y = y, flicker = overlay.style.flicker, "显示文本框");
        self.overlays.entry(key).or_insert(overlay)
    }

    /// 擦除文本框
    ///
    /// 不存在时什么也不做，返回 `false`。
    pub fn erase<S: RenderSurface + ?Sized>(&mut self, key: &OverlayKey, surface: &mut S) -> bool {
        let Some(overlay) = self.overlays.remove(key) else {
            return false;
        };

        if let Err(e) = surface.remove_element(&overlay.element_id()) {
            warn!(key = %key, error = %e, "移除文本框元素失败");
        }
        debug!(key = %key, "擦除文本框");
        true
    }

    pub fn get(&self, key: &OverlayKey) -> Option<&Overlay> {
        self.overlays.get(key)
    }

    pub fn get_mut(&mut self, key: &OverlayKey) -> Option<&mut Overlay> {
        self.overlays.get_mut(key)
    }

    pub fn contains(&self, key: &OverlayKey) -> bool {
        self.overlays.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.values()
    }
}

/// 闪烁定义在渲染表面上只注入一次
fn ensure_pulse_definition<S: RenderSurface + ?Sized>(surface: &mut S) {
    if surface.has_pulse_definition(FLICKER.name) {
        return;
    }
    match surface.define_pulse(&FLICKER) {
        Ok(()) => debug!(name = FLICKER.name, "注入闪烁定义"),
        Err(e) => warn!(error = %e, "注入闪烁定义失败"),
    }
}

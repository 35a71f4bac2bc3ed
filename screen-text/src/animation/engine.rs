//! # Engine 模块
//!
//! 动画引擎：管理所有进行中的移动任务，每帧推进并把结果写回文本框。

use std::collections::HashMap;
use tracing::{debug, warn};

use super::task::{AnimationTask, ColorTrack};
use crate::config::ScreenTextConfig;
use crate::key::OverlayKey;
use crate::registry::OverlayRegistry;
use crate::style::{MoveOptions, finite_or, normalize_opacity};
use crate::surface::RenderSurface;
use crate::transform::{Vec2, VisualState};

/// 动画引擎
///
/// 每个文本框最多一个进行中的任务：对同一文本框再次 `animate`
/// 会直接替换旧任务。
#[derive(Debug, Default)]
pub struct AnimationEngine {
    tasks: HashMap<OverlayKey, AnimationTask>,
}

impl AnimationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// 启动移动动画
    ///
    /// 起点取自文本框当前的视觉状态。文本框不存在时忽略请求并返回 `false`。
    ///
    /// - `opacity` 为 0 - 255，缺省时保持当前透明度
    /// - `rotation` 缺省时回到 0 度
    /// - `color` 缺省时保持当前颜色
    /// - 缩放保持不变
    pub fn animate(
        &mut self,
        registry: &OverlayRegistry,
        key: &OverlayKey,
        x: f32,
        y: f32,
        options: &MoveOptions,
        config: &ScreenTextConfig,
    ) -> bool {
        let Some(overlay) = registry.get(key) else {
            debug!(key = %key, "文本框不存在，忽略移动请求");
            return false;
        };

        let start = overlay.state;
        let target = VisualState {
            position: Vec2::new(finite_or(x, start.position.x), finite_or(y, start.position.y)),
            opacity: options
                .opacity
                .filter(|o| o.is_finite())
                .map(normalize_opacity)
                .unwrap_or(start.opacity),
            rotation: options.rotation.map(|r| finite_or(r, 0.0)).unwrap_or(0.0),
            scale: start.scale,
        };
        let color = ColorTrack::new(
            config.color_mode,
            &overlay.style.color,
            options.color.as_deref().filter(|c| !c.trim().is_empty()),
        );
        let duration = resolve_duration(options.duration, config.default_duration);

        let task = AnimationTask::new(key.clone(), start, target, color, duration);
        if self.tasks.insert(key.clone(), task).is_some() {
            debug!(key = %key, "替换进行中的移动动画");
        }
        debug!(key = %key, frames = duration, "开始移动文本框");
        true
    }

    /// 推进一帧
    ///
    /// 文本框已被擦除的任务直接丢弃，不再写入渲染表面。
    pub fn tick<S: RenderSurface + ?Sized>(
        &mut self,
        registry: &mut OverlayRegistry,
        surface: &mut S,
    ) {
        self.tasks.retain(|key, task| {
            let Some(overlay) = registry.get_mut(key) else {
                debug!(key = %key, "文本框已擦除，丢弃移动动画");
                return false;
            };

            let patch = task.advance();
            if let Some(state) = patch.state {
                overlay.state = state;
            }
            if let Some(color) = &patch.color {
                overlay.style.color.clone_from(color);
            }

            if let Err(e) = surface.apply_patch(&overlay.element_id(), &patch) {
                warn!(key = %key, error = %e, "应用文本框样式失败");
            }

            if task.is_finished() {
                debug!(key = %key, frames = task.duration(), "移动动画完成");
                false
            } else {
                true
            }
        });
    }

    /// 取消文本框的动画，当前状态保持在最后一帧
    pub fn cancel(&mut self, key: &OverlayKey) -> bool {
        self.tasks.remove(key).is_some()
    }

    pub fn is_animating(&self, key: &OverlayKey) -> bool {
        self.tasks.contains_key(key)
    }

    pub fn task(&self, key: &OverlayKey) -> Option<&AnimationTask> {
        self.tasks.get(key)
    }

    /// 进行中的任务数量
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    /// 清空所有任务
    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

/// 解析动画帧数
///
/// 缺省或为 0 时使用默认值；结果至少为 1 帧。
pub fn resolve_duration(requested: Option<i64>, default: i64) -> u32 {
    let frames = match requested {
        Some(frames) if frames != 0 => frames,
        _ => default,
    };
    frames.clamp(1, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::TaskState;
    use crate::style::{ColorMode, ShowOptions};
    use crate::surface::CssSurface;

    struct Fixture {
        registry: OverlayRegistry,
        engine: AnimationEngine,
        surface: CssSurface,
        config: ScreenTextConfig,
    }

    impl Fixture {
        fn new(config: ScreenTextConfig) -> Self {
            Self {
                registry: OverlayRegistry::new(),
                engine: AnimationEngine::new(),
                surface: CssSurface::new(),
                config,
            }
        }

        fn show(&mut self, key: &str, x: f32, y: f32) {
            self.registry.show(
                key.into(),
                "text",
                x,
                y,
                &ShowOptions::default(),
                &self.config,
                &mut self.surface,
            );
        }

        fn animate(&mut self, key: &str, x: f32, y: f32, options: MoveOptions) -> bool {
            self.engine
                .animate(&self.registry, &key.into(), x, y, &options, &self.config)
        }

        fn tick(&mut self, frames: usize) {
            for _ in 0..frames {
                self.engine.tick(&mut self.registry, &mut self.surface);
            }
        }

        fn state(&self, key: &str) -> VisualState {
            self.registry.get(&key.into()).unwrap().state
        }
    }

    #[test]
    fn test_resolve_duration() {
        assert_eq!(resolve_duration(None, 30), 30);
        assert_eq!(resolve_duration(Some(0), 30), 30);
        assert_eq!(resolve_duration(Some(12), 30), 12);
        assert_eq!(resolve_duration(Some(-5), 30), 1);
        assert_eq!(resolve_duration(None, 0), 1);
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let mut fx = Fixture::new(ScreenTextConfig::default());
        assert!(!fx.animate("ghost", 1.0, 1.0, MoveOptions::default()));
        assert_eq!(fx.engine.active_count(), 0);
    }

    #[test]
    fn test_interpolates_linearly() {
        let mut fx = Fixture::new(ScreenTextConfig::default());
        fx.show("a", 0.0, 0.0);
        fx.animate("a", 100.0, 40.0, MoveOptions {
            duration: Some(4),
            rotation: Some(90.0),
            ..Default::default()
        });

        fx.tick(2);
        let mid = fx.state("a");
        assert_eq!(mid.position, Vec2::new(50.0, 20.0));
        assert_eq!(mid.rotation, 45.0);
        assert!(fx.engine.is_animating(&"a".into()));

        fx.tick(2);
        let end = fx.state("a");
        assert_eq!(end.position, Vec2::new(100.0, 40.0));
        assert_eq!(end.rotation, 90.0);
        assert!(!fx.engine.is_animating(&"a".into()));
    }

    #[test]
    fn test_omitted_fields() {
        let mut fx = Fixture::new(ScreenTextConfig::default());
        fx.registry.show(
            "a".into(),
            "text",
            0.0,
            0.0,
            &ShowOptions {
                opacity: Some(51.0),
                rotation: Some(30.0),
                scale_x: Some(200.0),
                ..Default::default()
            },
            &fx.config,
            &mut fx.surface,
        );

        fx.animate("a", 10.0, 10.0, MoveOptions {
            duration: Some(1),
            ..Default::default()
        });
        fx.tick(1);

        let state = fx.state("a");
        // 透明度保持，旋转回到 0，缩放不变
        assert_eq!(state.opacity, 51.0 / 255.0);
        assert_eq!(state.rotation, 0.0);
        assert_eq!(state.scale.x, 2.0);
        let overlay = fx.registry.get(&"a".into()).unwrap();
        assert_eq!(overlay.style.color, fx.config.default_text_color);
    }

    #[test]
    fn test_hold_color_from_first_tick() {
        let config = ScreenTextConfig {
            color_mode: ColorMode::Hold,
            ..ScreenTextConfig::default()
        };
        let mut fx = Fixture::new(config);
        fx.show("a", 0.0, 0.0);
        fx.animate("a", 0.0, 0.0, MoveOptions {
            color: Some("#ff0000".to_string()),
            duration: Some(10),
            ..Default::default()
        });

        fx.tick(1);
        let element = fx.surface.element("textBox_a").unwrap();
        assert_eq!(element.get("color"), Some("#ff0000"));
    }

    #[test]
    fn test_second_animation_replaces_first() {
        let mut fx = Fixture::new(ScreenTextConfig::default());
        fx.show("a", 0.0, 0.0);
        fx.animate("a", 100.0, 0.0, MoveOptions {
            duration: Some(10),
            ..Default::default()
        });
        fx.tick(5);
        assert_eq!(fx.state("a").position.x, 50.0);

        // 第二个动画从当前位置出发，第一个被丢弃
        fx.animate("a", 0.0, 0.0, MoveOptions {
            duration: Some(5),
            ..Default::default()
        });
        assert_eq!(fx.engine.active_count(), 1);

        fx.tick(1);
        assert!((fx.state("a").position.x - 40.0).abs() < 1e-4);
        fx.tick(4);
        assert_eq!(fx.state("a").position.x, 0.0);

        fx.tick(10);
        assert_eq!(fx.state("a").position.x, 0.0);
        assert_eq!(fx.engine.active_count(), 0);
    }

    #[test]
    fn test_different_keys_run_together() {
        let mut fx = Fixture::new(ScreenTextConfig::default());
        fx.show("a", 0.0, 0.0);
        fx.show("b", 0.0, 0.0);
        fx.animate("a", 10.0, 0.0, MoveOptions {
            duration: Some(2),
            ..Default::default()
        });
        fx.animate("b", 0.0, 30.0, MoveOptions {
            duration: Some(3),
            ..Default::default()
        });

        fx.tick(1);
        assert_eq!(fx.state("a").position.x, 5.0);
        assert!((fx.state("b").position.y - 10.0).abs() < 1e-4);
        assert_eq!(fx.engine.active_count(), 2);

        fx.tick(2);
        assert_eq!(fx.state("a").position.x, 10.0);
        assert_eq!(fx.state("b").position.y, 30.0);
        assert_eq!(fx.engine.active_count(), 0);
    }

    #[test]
    fn test_non_finite_move_holds_current_state() {
        let mut fx = Fixture::new(ScreenTextConfig::default());
        fx.registry.show(
            "a".into(),
            "text",
            10.0,
            20.0,
            &ShowOptions {
                opacity: Some(51.0),
                rotation: Some(30.0),
                ..Default::default()
            },
            &fx.config,
            &mut fx.surface,
        );
        fx.animate("a", f32::NAN, f32::INFINITY, MoveOptions {
            opacity: Some(f32::NAN),
            rotation: Some(f32::NAN),
            duration: Some(1),
            ..Default::default()
        });

        let task = fx.engine.task(&"a".into()).unwrap();
        assert_eq!(task.duration(), 1);
        assert_eq!(task.state(), TaskState::Running);

        fx.tick(1);
        let element = fx.surface.element("textBox_a").unwrap();
        assert_eq!(element.get("left"), Some("10px"));
        assert_eq!(element.get("top"), Some("20px"));
        assert_eq!(element.get("opacity"), Some("0.2"));
        assert_eq!(element.get("transform"), Some("scale(1, 1) rotate(0deg)"));
    }

    #[test]
    fn test_clear_stops_all_tasks() {
        let mut fx = Fixture::new(ScreenTextConfig::default());
        fx.show("a", 0.0, 0.0);
        fx.show("b", 0.0, 0.0);
        fx.animate("a", 10.0, 0.0, MoveOptions::default());
        fx.animate("b", 10.0, 0.0, MoveOptions::default());

        fx.engine.clear();
        fx.tick(1);

        assert_eq!(fx.engine.active_count(), 0);
        assert!(fx.engine.task(&"a".into()).is_none());
        assert_eq!(fx.state("a").position.x, 0.0);
    }

    #[test]
    fn test_erased_overlay_drops_task() {
        let mut fx = Fixture::new(ScreenTextConfig::default());
        fx.show("a", 0.0, 0.0);
        fx.animate("a", 10.0, 0.0, MoveOptions::default());

        fx.registry.erase(&"a".into(), &mut fx.surface);
        fx.tick(1);

        assert_eq!(fx.engine.active_count(), 0);
        assert!(fx.surface.element("textBox_a").is_none());
    }
}

//! # Transform 模块
//!
//! 文本框的视觉状态：位置、透明度、旋转和缩放。
//!
//! 视觉状态是"当前状态"的唯一来源，`show` 和动画引擎都直接修改它，
//! 动画开始时从这里读取起点，而不是回读渲染结果。

use serde::{Deserialize, Serialize};

/// 二维向量
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// 创建新的向量
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// 零向量
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// 线性插值
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: lerp(self.x, other.x, t),
            y: lerp(self.y, other.y, t),
        }
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// 缩放因子（1.0 = 100%）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Scale {
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };

    /// 由百分比创建，`100` 为原始大小
    pub fn from_percent(x: f32, y: f32) -> Self {
        let factor = |v: f32| if v.is_finite() { v / 100.0 } else { 1.0 };
        Self {
            x: factor(x),
            y: factor(y),
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// 视觉状态
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualState {
    /// 位置偏移（像素，含义取决于定位原点）
    pub position: Vec2,
    /// 透明度 (0.0 - 1.0)
    pub opacity: f32,
    /// 旋转角度（度）
    pub rotation: f32,
    /// 缩放，动画不会修改
    pub scale: Scale,
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            opacity: 1.0,
            rotation: 0.0,
            scale: Scale::IDENTITY,
        }
    }
}

impl VisualState {
    /// 线性插值到另一个状态
    ///
    /// `t` 会被限制在 0.0 - 1.0；缩放始终取自 `self`。
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            position: self.position.lerp(other.position, t),
            opacity: lerp(self.opacity, other.opacity, t),
            rotation: lerp(self.rotation, other.rotation, t),
            scale: self.scale,
        }
    }

    /// CSS `transform`，例如 `scale(1, 1) rotate(45deg)`
    pub fn transform_css(&self) -> String {
        format!(
            "scale({}, {}) rotate({}deg)",
            self.scale.x, self.scale.y, self.rotation
        )
    }
}

/// `t = 0` 时精确返回 `a`，`t = 1` 时精确返回 `b`
pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

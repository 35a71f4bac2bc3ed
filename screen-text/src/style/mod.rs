//! # Style 模块
//!
//! 文本框的样式模型与样式解析。
//!
//! ## 默认值回退
//!
//! `show` 的每个样式字段独立回退：
//!
//! 1. 调用参数（最高）
//! 2. 配置默认值 ([`ScreenTextConfig`])
//! 3. 字段内置默认值（最低）
//!
//! 空字符串视为"未提供"。被替换掉的旧文本框的样式**从不**参与回退。

mod color;

pub use color::Rgba;

use serde::{Deserialize, Serialize};

use crate::config::ScreenTextConfig;
use crate::transform::{Scale, Vec2, VisualState};

/// 文本框层级（高于游戏画面）
pub const OVERLAY_Z_INDEX: i32 = 999;

/// 内置默认值：边框线型
pub const DEFAULT_BORDER_STYLE: &str = "none";
/// 内置默认值：背景
pub const DEFAULT_BACKGROUND: &str = "transparent";
/// 内置默认值：文字阴影
pub const DEFAULT_TEXT_SHADOW: &str = "1px 2px 4px darkmagenta";
/// 内置默认值：缩放百分比
pub const DEFAULT_SCALE_PERCENT: f32 = 100.0;

/// 定位原点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Origin {
    /// 左上角绝对定位（模式 0）
    #[default]
    TopLeft,
    /// 以视口中心为基准（模式 1），变换支点同时移到元素中心
    Center,
}

impl Origin {
    /// 由模式编号创建，`1` 为中心定位，其余均为左上角
    pub fn from_code(code: i64) -> Self {
        if code == 1 { Self::Center } else { Self::TopLeft }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::TopLeft => 0,
            Self::Center => 1,
        }
    }

    /// CSS `transform-origin`
    pub fn transform_origin(self) -> &'static str {
        match self {
            Self::TopLeft => "0 0",
            Self::Center => "50% 50%",
        }
    }

    /// 将偏移量解析为视口内的像素坐标
    pub fn resolve(self, offset: Vec2, viewport: Viewport) -> Vec2 {
        match self {
            Self::TopLeft => offset,
            Self::Center => Vec2::new(
                viewport.width / 2.0 + offset.x,
                viewport.height / 2.0 + offset.y,
            ),
        }
    }
}

impl From<i64> for Origin {
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}

impl From<Origin> for i64 {
    fn from(origin: Origin) -> Self {
        origin.code()
    }
}

/// 视口尺寸（像素）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 816.0,
            height: 624.0,
        }
    }
}

/// 颜色动画模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// 逐通道线性插值，末帧精确落到目标颜色字符串
    #[default]
    Interpolate,
    /// 从第一帧起直接使用目标颜色（兼容模式）
    Hold,
}

/// 字体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    /// 字号（像素）
    pub size: f32,
    pub italic: bool,
}

impl FontSpec {
    /// CSS `font` 简写，例如 `italic 28px GameFont`
    pub fn to_css(&self) -> String {
        let italic = if self.italic { "italic " } else { "" };
        format!("{italic}{}px {}", self.size, self.family)
    }
}

/// 已解析的文本框样式
///
/// 只包含动画不会改动的部分；位置、透明度、旋转、缩放属于 [`VisualState`]。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayStyle {
    pub font: FontSpec,
    /// 文字颜色（CSS 颜色字符串）
    pub color: String,
    /// 边框简写，例如 `2px solid #000000`
    pub border: String,
    pub border_style: String,
    pub background: String,
    pub text_shadow: String,
    pub origin: Origin,
    pub flicker: bool,
    pub z_index: i32,
}

/// `show` 的可选参数
///
/// 字段与宿主 API `showTextBox` 的可选参数一一对应。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShowOptions {
    pub font: Option<String>,
    pub size: Option<f32>,
    pub color: Option<String>,
    pub border_color: Option<String>,
    pub border_width: Option<f32>,
    /// 透明度（0 - 255）
    pub opacity: Option<f32>,
    pub italic: Option<bool>,
    /// 水平缩放（百分比）
    pub scale_x: Option<f32>,
    /// 垂直缩放（百分比）
    pub scale_y: Option<f32>,
    pub origin: Option<Origin>,
    pub flicker: Option<bool>,
    /// 完整边框简写，提供时忽略 `border_color` / `border_width`
    pub border: Option<String>,
    pub background: Option<String>,
    pub text_shadow: Option<String>,
    /// 旋转角度（度）
    pub rotation: Option<f32>,
    pub border_style: Option<String>,
}

/// `move` 的可选参数
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MoveOptions {
    /// 目标文字颜色，缺省时保持当前颜色
    pub color: Option<String>,
    /// 目标透明度（0 - 255），缺省时保持当前透明度
    pub opacity: Option<f32>,
    /// 动画帧数，缺省或为 0 时使用配置默认值
    pub duration: Option<i64>,
    /// 目标旋转角度（度），缺省时回到 0
    pub rotation: Option<f32>,
}

impl ShowOptions {
    /// 解析样式与初始视觉状态
    pub fn resolve(
        &self,
        x: f32,
        y: f32,
        config: &ScreenTextConfig,
    ) -> (OverlayStyle, VisualState) {
        let family = non_empty(&self.font).unwrap_or(&config.default_font);
        let color = non_empty(&self.color).unwrap_or(&config.default_text_color);
        let border_color = non_empty(&self.border_color).unwrap_or(&config.default_border_color);
        let border_width = finite_or(
            self.border_width.unwrap_or(config.default_border_width),
            config.default_border_width,
        );

        let border = match non_empty(&self.border) {
            Some(border) => border.to_string(),
            None => format!("{border_width}px solid {border_color}"),
        };

        let style = OverlayStyle {
            font: FontSpec {
                family: family.to_string(),
                size: finite_or(
                    self.size.unwrap_or(config.default_font_size),
                    config.default_font_size,
                ),
                italic: self.italic.unwrap_or(config.default_italic),
            },
            color: color.to_string(),
            border,
            border_style: non_empty(&self.border_style)
                .unwrap_or(DEFAULT_BORDER_STYLE)
                .to_string(),
            background: non_empty(&self.background)
                .unwrap_or(DEFAULT_BACKGROUND)
                .to_string(),
            text_shadow: non_empty(&self.text_shadow)
                .unwrap_or(DEFAULT_TEXT_SHADOW)
                .to_string(),
            origin: self.origin.unwrap_or_default(),
            flicker: self.flicker.unwrap_or(config.enable_flicker),
            z_index: OVERLAY_Z_INDEX,
        };

        let opacity = self.opacity.unwrap_or(config.default_opacity);
        let state = VisualState {
            position: Vec2::new(finite_or(x, 0.0), finite_or(y, 0.0)),
            opacity: normalize_opacity(opacity),
            rotation: finite_or(self.rotation.unwrap_or(0.0), 0.0),
            scale: Scale::from_percent(
                self.scale_x.unwrap_or(DEFAULT_SCALE_PERCENT),
                self.scale_y.unwrap_or(DEFAULT_SCALE_PERCENT),
            ),
        };

        (style, state)
    }
}

/// 将 0 - 255 的透明度归一化到 0.0 - 1.0
pub fn normalize_opacity(value: f32) -> f32 {
    (finite_or(value, 255.0) / 255.0).clamp(0.0, 1.0)
}

pub(crate) fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

//! # Config 模块
//!
//! 文本框的默认值配置。
//!
//! ## 配置来源
//!
//! 1. 配置文件 (JSON)，键名与插件参数同名（`defaultFont` 等）
//! 2. 插件参数表（全部为字符串，按字段类型转换）
//! 3. 默认值（最低）
//!
//! 除类型转换外不做任何校验。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::style::{ColorMode, Viewport};

/// 文本框配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenTextConfig {
    /// 默认字体
    #[serde(default = "default_font")]
    pub default_font: String,

    /// 默认字号（像素）
    #[serde(default = "default_font_size")]
    pub default_font_size: f32,

    /// 默认文字颜色
    #[serde(default = "default_text_color")]
    pub default_text_color: String,

    /// 默认边框颜色
    #[serde(default = "default_border_color")]
    pub default_border_color: String,

    /// 默认边框宽度（像素）
    #[serde(default)]
    pub default_border_width: f32,

    /// 默认透明度（0 - 255）
    #[serde(default = "default_opacity")]
    pub default_opacity: f32,

    /// 默认是否斜体
    #[serde(default)]
    pub default_italic: bool,

    /// 默认动画帧数
    #[serde(default = "default_duration")]
    pub default_duration: i64,

    /// 是否默认开启闪烁效果
    #[serde(default)]
    pub enable_flicker: bool,

    /// 颜色动画模式
    #[serde(default)]
    pub color_mode: ColorMode,

    /// 视口尺寸，用于解析中心定位
    #[serde(default)]
    pub viewport: Viewport,
}

// 默认值函数
fn default_font() -> String {
    "GameFont".to_string()
}

fn default_font_size() -> f32 {
    28.0
}

fn default_text_color() -> String {
    "#ffffff".to_string()
}

fn default_border_color() -> String {
    "#000000".to_string()
}

fn default_opacity() -> f32 {
    255.0
}

fn default_duration() -> i64 {
    60
}

impl Default for ScreenTextConfig {
    fn default() -> Self {
        Self {
            default_font: default_font(),
            default_font_size: default_font_size(),
            default_text_color: default_text_color(),
            default_border_color: default_border_color(),
            default_border_width: 0.0,
            default_opacity: default_opacity(),
            default_italic: false,
            default_duration: default_duration(),
            enable_flicker: false,
            color_mode: ColorMode::default(),
            viewport: Viewport::default(),
        }
    }
}

impl ScreenTextConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并输出警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = ?path, "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match Self::try_load(path) {
            Ok(config) => {
                info!(path = ?path, "配置文件加载成功");
                config
            }
            Err(e) => {
                warn!(path = ?path, error = %e, "配置文件加载失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 加载配置文件，失败时返回错误
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// 由插件参数表创建配置
    ///
    /// 参数值均为字符串：布尔值仅 `"true"` 为真，数字按十进制解析，
    /// 缺失或无法解析的项使用默认值。
    pub fn from_parameters(params: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str, fallback: String| {
            params
                .get(key)
                .filter(|v| !v.trim().is_empty())
                .cloned()
                .unwrap_or(fallback)
        };
        let flag = |key: &str, fallback: bool| {
            params
                .get(key)
                .map(|v| v.trim() == "true")
                .unwrap_or(fallback)
        };

        let color_mode = match params.get("colorMode").map(|v| v.trim()) {
            Some("hold") => ColorMode::Hold,
            Some("interpolate") => ColorMode::Interpolate,
            _ => defaults.color_mode,
        };

        Self {
            default_font: text("defaultFont", defaults.default_font),
            default_font_size: finite(params, "defaultFontSize", defaults.default_font_size),
            default_text_color: text("defaultTextColor", defaults.default_text_color),
            default_border_color: text("defaultBorderColor", defaults.default_border_color),
            default_border_width: finite(
                params,
                "defaultBorderWidth",
                defaults.default_border_width,
            ),
            default_opacity: finite(params, "defaultOpacity", defaults.default_opacity),
            default_italic: flag("defaultItalic", defaults.default_italic),
            default_duration: number(params, "defaultDuration", defaults.default_duration),
            enable_flicker: flag("enableFlicker", defaults.enable_flicker),
            color_mode,
            viewport: defaults.viewport,
        }
    }
}

fn number<T: FromStr>(params: &HashMap<String, String>, key: &str, fallback: T) -> T {
    params
        .get(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(fallback)
}

/// 浮点参数，非有限值（`NaN`、`inf`）视为未提供
fn finite(params: &HashMap<String, String>, key: &str, fallback: f32) -> f32 {
    Some(number(params, key, fallback))
        .filter(|v| v.is_finite())
        .unwrap_or(fallback)
}

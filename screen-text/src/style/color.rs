//! # Color 模块
//!
//! CSS 颜色的解析、插值与格式化。
//!
//! 文本框的颜色以 CSS 字符串形式保存（调用方传什么就存什么），
//! 只有在颜色插值时才解析为 [`Rgba`]。

/// RGBA 颜色
///
/// 通道取值范围：`r/g/b` 为 0.0 - 255.0，`a` 为 0.0 - 1.0。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// 支持的颜色名称
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("lime", (0, 255, 0)),
    ("green", (0, 128, 0)),
    ("blue", (0, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("cyan", (0, 255, 255)),
    ("aqua", (0, 255, 255)),
    ("magenta", (255, 0, 255)),
    ("fuchsia", (255, 0, 255)),
    ("darkmagenta", (139, 0, 139)),
    ("purple", (128, 0, 128)),
    ("orange", (255, 165, 0)),
    ("pink", (255, 192, 203)),
    ("gold", (255, 215, 0)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("silver", (192, 192, 192)),
    ("navy", (0, 0, 128)),
    ("maroon", (128, 0, 0)),
];

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 解析 CSS 颜色
    ///
    /// 支持 `#rgb`、`#rgba`、`#rrggbb`、`#rrggbbaa`、`rgb(...)`、`rgba(...)`
    /// 以及常用颜色名。无法识别时返回 `None`。
    pub fn parse(input: &str) -> Option<Self> {
        let s = input.trim().to_ascii_lowercase();
        if s.is_empty() {
            return None;
        }

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }

        if let Some(body) = s
            .strip_prefix("rgba(")
            .or_else(|| s.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_functional(body);
        }

        if s == "transparent" {
            return Some(Self::TRANSPARENT);
        }

        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, (r, g, b))| Self::new(*r as f32, *g as f32, *b as f32, 1.0))
    }

    /// 逐通道线性插值
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: lerp(self.r, other.r, t),
            g: lerp(self.g, other.g, t),
            b: lerp(self.b, other.b, t),
            a: lerp(self.a, other.a, t),
        }
    }

    /// 格式化为 CSS 颜色
    ///
    /// 完全不透明时输出 `#rrggbb`，否则输出 `rgba(r, g, b, a)`。
    pub fn to_css(self) -> String {
        let r = channel(self.r);
        let g = channel(self.g);
        let b = channel(self.b);
        if self.a >= 1.0 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            let a = (self.a.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
            format!("rgba({r}, {g}, {b}, {a})")
        }
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

fn channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    let (r, g, b, a) = match hex.len() {
        3 => (nibble(0)?, nibble(1)?, nibble(2)?, 255),
        4 => (nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?),
        6 => (byte(0)?, byte(2)?, byte(4)?, 255),
        8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
        _ => return None,
    };

    Some(Rgba::new(r as f32, g as f32, b as f32, a as f32 / 255.0))
}

fn parse_functional(body: &str) -> Option<Rgba> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let component = |s: &str| -> Option<f32> {
        match s.strip_suffix('%') {
            Some(pct) => pct.trim().parse::<f32>().ok().map(|p| p * 2.55),
            None => s.parse::<f32>().ok(),
        }
    };

    let r = component(parts[0])?;
    let g = component(parts[1])?;
    let b = component(parts[2])?;
    let a = match parts.get(3) {
        Some(a) => a.parse::<f32>().ok()?,
        None => 1.0,
    };

    Some(Rgba::new(
        r.clamp(0.0, 255.0),
        g.clamp(0.0, 255.0),
        b.clamp(0.0, 255.0),
        a.clamp(0.0, 1.0),
    ))
}

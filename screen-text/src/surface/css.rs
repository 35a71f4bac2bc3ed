//! # CSS Surface
//!
//! 内存中的类 DOM 渲染表面：每个元素保存为一组有序的 CSS 声明，
//! 脉冲定义保存为 `@keyframes` 块。

use serde::Serialize;
use std::collections::BTreeMap;

use super::{ElementSpec, RenderSurface, StylePatch};
use crate::error::{SurfaceError, SurfaceResult};
use crate::flicker::FlickerEffect;
use crate::style::Origin;
use crate::transform::{Scale, VisualState};

/// 一个元素的 CSS 表达
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CssElement {
    pub id: String,
    pub text: String,
    /// 按写入顺序排列的声明
    pub declarations: Vec<(String, String)>,
    #[serde(skip)]
    origin: Origin,
}

impl CssElement {
    fn from_spec(spec: &ElementSpec) -> Self {
        let style = &spec.style;
        let mut element = Self {
            id: spec.id.clone(),
            text: spec.text.clone(),
            declarations: Vec::new(),
            origin: style.origin,
        };

        element.set("position", "absolute");
        element.set("font", style.font.to_css());
        element.set("color", style.color.as_str());
        element.set("border", style.border.as_str());
        element.set("border-style", style.border_style.as_str());
        element.set("opacity", spec.state.opacity.to_string());
        element.set("z-index", style.z_index.to_string());
        element.set("background", style.background.as_str());
        element.set("text-shadow", style.text_shadow.as_str());
        element.write_state(&spec.state);
        element.set("transform-origin", style.origin.transform_origin());
        element.set("transform", spec.state.transform_css());
        if let Some(flicker) = &spec.flicker {
            element.set("animation", flicker.animation_css());
        }
        element
    }

    /// 读取声明值
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    /// 写入声明，已存在时原地替换
    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        match self.declarations.iter_mut().find(|(name, _)| name == property) {
            Some(slot) => slot.1 = value,
            None => self.declarations.push((property.to_string(), value)),
        }
    }

    /// 从 `transform` 读回的旋转角度（度）
    pub fn rotation(&self) -> f32 {
        self.get("transform").map(parse_rotation).unwrap_or(0.0)
    }

    /// 从 `transform` 读回的缩放
    pub fn scale(&self) -> Scale {
        self.get("transform").map(parse_scale).unwrap_or_default()
    }

    fn write_state(&mut self, state: &VisualState) {
        let (left, top) = match self.origin {
            Origin::TopLeft => (
                format!("{}px", state.position.x),
                format!("{}px", state.position.y),
            ),
            Origin::Center => (
                format!("calc(50% + {}px)", state.position.x),
                format!("calc(50% + {}px)", state.position.y),
            ),
        };
        self.set("left", left);
        self.set("top", top);
    }

    fn apply(&mut self, patch: &StylePatch) {
        if let Some(state) = &patch.state {
            self.write_state(state);
            self.set("opacity", state.opacity.to_string());
            self.set("transform", state.transform_css());
        }
        if let Some(color) = &patch.color {
            self.set("color", color.as_str());
        }
    }

    fn to_css(&self) -> String {
        let mut css = format!("#{} {{\n", self.id);
        for (name, value) in &self.declarations {
            css.push_str(&format!("    {name}: {value};\n"));
        }
        css.push('}');
        css
    }
}

/// 内存 CSS 渲染表面
#[derive(Debug, Default, Clone)]
pub struct CssSurface {
    /// 渲染树（按插入顺序）
    elements: Vec<CssElement>,
    /// 已注入的 keyframes（名称 -> CSS）
    keyframes: BTreeMap<String, String>,
}

impl CssSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(&self, id: &str) -> Option<&CssElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn elements(&self) -> &[CssElement] {
        &self.elements
    }

    /// 渲染树中 id 为 `id` 的元素个数
    pub fn count(&self, id: &str) -> usize {
        self.elements.iter().filter(|e| e.id == id).count()
    }

    pub fn keyframes(&self) -> impl Iterator<Item = &str> {
        self.keyframes.keys().map(String::as_str)
    }

    /// 输出完整样式表：先 keyframes，再按渲染顺序输出元素
    pub fn to_stylesheet(&self) -> String {
        self.keyframes
            .values()
            .cloned()
            .chain(self.elements.iter().map(CssElement::to_css))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl RenderSurface for CssSurface {
    fn create_element(&mut self, spec: &ElementSpec) -> SurfaceResult<()> {
        if self.element(&spec.id).is_some() {
            return Err(SurfaceError::DuplicateElement {
                id: spec.id.clone(),
            });
        }
        self.elements.push(CssElement::from_spec(spec));
        Ok(())
    }

    fn remove_element(&mut self, id: &str) -> SurfaceResult<()> {
        let index = self
            .elements
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| SurfaceError::ElementNotFound { id: id.to_string() })?;
        self.elements.remove(index);
        Ok(())
    }

    fn apply_patch(&mut self, id: &str, patch: &StylePatch) -> SurfaceResult<()> {
        let element = self
            .elements
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| SurfaceError::ElementNotFound { id: id.to_string() })?;
        element.apply(patch);
        Ok(())
    }

    fn has_pulse_definition(&self, name: &str) -> bool {
        self.keyframes.contains_key(name)
    }

    fn define_pulse(&mut self, effect: &FlickerEffect) -> SurfaceResult<()> {
        self.keyframes
            .entry(effect.name.to_string())
            .or_insert_with(|| effect.keyframes_css());
        Ok(())
    }
}

/// 从 CSS `transform` 中提取旋转角度，找不到时为 0
pub fn parse_rotation(transform: &str) -> f32 {
    function_args(transform, "rotate(")
        .and_then(|args| args.trim().strip_suffix("deg"))
        .and_then(|deg| deg.trim().parse::<f32>().ok())
        .filter(|deg| deg.is_finite())
        .unwrap_or(0.0)
}

/// 从 CSS `transform` 中提取缩放，找不到时为 `1, 1`
pub fn parse_scale(transform: &str) -> Scale {
    let Some(args) = function_args(transform, "scale(") else {
        return Scale::IDENTITY;
    };

    let values: Vec<f32> = args
        .split(',')
        .filter_map(|v| v.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .collect();

    match values.as_slice() {
        [uniform] => Scale {
            x: *uniform,
            y: *uniform,
        },
        [x, y] => Scale { x: *x, y: *y },
        _ => Scale::IDENTITY,
    }
}

fn function_args<'a>(transform: &'a str, function: &str) -> Option<&'a str> {
    let start = transform.find(function)? + function.len();
    let rest = &transform[start..];
    let end = rest.find(')')?;
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScreenTextConfig;
    use crate::flicker::FLICKER;
    use crate::style::ShowOptions;

    fn spec(id: &str, options: ShowOptions) -> ElementSpec {
        let (style, state) = options.resolve(10.0, 20.0, &ScreenTextConfig::default());
        ElementSpec {
            id: id.to_string(),
            text: "100".to_string(),
            style,
            state,
            flicker: None,
        }
    }

    #[test]
    fn test_element_css() {
        let mut surface = CssSurface::new();
        surface.create_element(&spec("textBox_hp", ShowOptions::default())).unwrap();

        insta::assert_snapshot!(surface.to_stylesheet(), @r"
        #textBox_hp {
            position: absolute;
            font: 28px GameFont;
            color: #ffffff;
            border: 0px solid #000000;
            border-style: none;
            opacity: 1;
            z-index: 999;
            background: transparent;
            text-shadow: 1px 2px 4px darkmagenta;
            left: 10px;
            top: 20px;
            transform-origin: 0 0;
            transform: scale(1, 1) rotate(0deg);
        }
        ");
    }

    #[test]
    fn test_center_origin_uses_calc() {
        let mut surface = CssSurface::new();
        let options = ShowOptions {
            origin: Some(Origin::Center),
            ..Default::default()
        };
        surface.create_element(&spec("textBox_c", options)).unwrap();

        let element = surface.element("textBox_c").unwrap();
        assert_eq!(element.get("left"), Some("calc(50% + 10px)"));
        assert_eq!(element.get("top"), Some("calc(50% + 20px)"));
        assert_eq!(element.get("transform-origin"), Some("50% 50%"));
    }

    #[test]
    fn test_duplicate_and_missing_elements() {
        let mut surface = CssSurface::new();
        let spec = spec("textBox_a", ShowOptions::default());
        surface.create_element(&spec).unwrap();

        assert_eq!(
            surface.create_element(&spec),
            Err(SurfaceError::DuplicateElement {
                id: "textBox_a".to_string()
            })
        );
        assert!(surface.remove_element("textBox_a").is_ok());
        assert!(matches!(
            surface.remove_element("textBox_a"),
            Err(SurfaceError::ElementNotFound { .. })
        ));
        assert!(surface.apply_patch("textBox_a", &StylePatch::default()).is_err());
    }

    #[test]
    fn test_patch_replaces_in_place() {
        let mut surface = CssSurface::new();
        surface.create_element(&spec("textBox_a", ShowOptions::default())).unwrap();

        let mut state = VisualState::default();
        state.rotation = 30.0;
        state.opacity = 0.5;
        state.scale = Scale { x: 2.0, y: 0.5 };
        let patch = StylePatch {
            state: Some(state),
            color: Some("#ff0000".to_string()),
        };
        surface.apply_patch("textBox_a", &patch).unwrap();

        let element = surface.element("textBox_a").unwrap();
        assert_eq!(element.get("color"), Some("#ff0000"));
        assert_eq!(element.get("opacity"), Some("0.5"));
        assert_eq!(element.rotation(), 30.0);
        assert_eq!(element.scale(), Scale { x: 2.0, y: 0.5 });
        // 声明数量不变
        assert_eq!(element.declarations.len(), 13);
    }

    #[test]
    fn test_define_pulse_is_idempotent() {
        let mut surface = CssSurface::new();
        assert!(!surface.has_pulse_definition("flicker"));
        surface.define_pulse(&FLICKER).unwrap();
        surface.define_pulse(&FLICKER).unwrap();
        assert!(surface.has_pulse_definition("flicker"));
        assert_eq!(surface.keyframes().count(), 1);
    }

    #[test]
    fn test_parse_transform() {
        assert_eq!(parse_rotation("scale(1, 1) rotate(-12.5deg)"), -12.5);
        assert_eq!(parse_rotation("scale(1, 1)"), 0.0);
        assert_eq!(parse_rotation("rotate(abcdeg)"), 0.0);

        assert_eq!(parse_scale("scale(1.5, 0.5) rotate(0deg)"), Scale { x: 1.5, y: 0.5 });
        assert_eq!(parse_scale("scale(2)"), Scale { x: 2.0, y: 2.0 });
        assert_eq!(parse_scale("rotate(10deg)"), Scale::IDENTITY);
    }
}

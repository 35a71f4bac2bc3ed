//! # Surface 模块
//!
//! 宿主渲染表面的抽象。
//!
//! ## 设计说明
//!
//! 核心不直接操作任何渲染后端，只通过 [`RenderSurface`] 描述"做什么"：
//! - 创建带样式的元素并插入到游戏画面之上的图层
//! - 移除元素
//! - 修改元素的样式字段
//! - 注入可复用的闪烁脉冲定义（幂等）
//!
//! [`CssSurface`] 是一个内存中的、类 DOM 的实现，
//! 用于无头运行和测试，同时给出样式的 CSS 表达。

mod css;

pub use css::{CssElement, CssSurface, parse_rotation, parse_scale};

use serde::Serialize;

use crate::error::SurfaceResult;
use crate::flicker::FlickerEffect;
use crate::style::OverlayStyle;
use crate::transform::VisualState;

/// 创建元素所需的完整描述
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementSpec {
    /// 元素 id（`textBox_<key>`）
    pub id: String,
    /// 文本内容
    pub text: String,
    pub style: OverlayStyle,
    pub state: VisualState,
    /// 闪烁效果，`None` 表示不闪烁
    #[serde(skip)]
    pub flicker: Option<FlickerEffect>,
}

/// 样式补丁
///
/// 动画每帧产生一个补丁；`None` 字段保持不变。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StylePatch {
    /// 位置与定位原点一起解释（见 [`Origin`](crate::style::Origin)）
    pub state: Option<VisualState>,
    pub color: Option<String>,
}

impl StylePatch {
    pub fn is_empty(&self) -> bool {
        self.state.is_none() && self.color.is_none()
    }
}

/// 宿主渲染表面
///
/// 所有方法都可能失败；调用方只记录日志，不会把错误继续向上传递。
pub trait RenderSurface {
    /// 创建元素并插入到覆盖层
    fn create_element(&mut self, spec: &ElementSpec) -> SurfaceResult<()>;

    /// 移除元素
    fn remove_element(&mut self, id: &str) -> SurfaceResult<()>;

    /// 应用样式补丁
    fn apply_patch(&mut self, id: &str, patch: &StylePatch) -> SurfaceResult<()>;

    /// 是否已有同名的脉冲定义
    fn has_pulse_definition(&self, name: &str) -> bool;

    /// 注入脉冲定义
    fn define_pulse(&mut self, effect: &FlickerEffect) -> SurfaceResult<()>;
}

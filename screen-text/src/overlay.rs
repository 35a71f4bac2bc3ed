//! # Overlay 模块
//!
//! 单个文本框实例。

use serde::Serialize;

use crate::key::OverlayKey;
use crate::style::{OverlayStyle, Viewport};
use crate::transform::{Vec2, VisualState};

/// 文本框
///
/// 由 `show` 创建，被动画原地修改，由 `erase` 销毁。
/// 没有自动过期：创建后从不擦除的文本框会一直存在到会话结束，
/// 清理由调用方负责。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    pub key: OverlayKey,
    pub text: String,
    pub style: OverlayStyle,
    /// 当前视觉状态
    pub state: VisualState,
}

impl Overlay {
    pub fn new(
        key: OverlayKey,
        text: impl Into<String>,
        style: OverlayStyle,
        state: VisualState,
    ) -> Self {
        Self {
            key,
            text: text.into(),
            style,
            state,
        }
    }

    /// 渲染树中的元素 id
    pub fn element_id(&self) -> String {
        self.key.element_id()
    }

    /// 在给定视口中的实际像素位置
    pub fn resolved_position(&self, viewport: Viewport) -> Vec2 {
        self.style.origin.resolve(self.state.position, viewport)
    }

    /// 变换支点（CSS `transform-origin`）
    pub fn pivot(&self) -> &'static str {
        self.style.origin.transform_origin()
    }
}

//! # Error 模块
//!
//! 定义 screen-text 中使用的错误类型。
//!
//! 对调用方而言所有操作都是"尽力而为"：错误只在内部流转并写入日志，
//! `ScreenText` 的公开操作从不向外返回错误。

use thiserror::Error;

/// 配置加载错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("配置 IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 配置文件格式无效
    #[error("配置解析失败: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 渲染表面错误
///
/// 由 [`RenderSurface`](crate::surface::RenderSurface) 的实现返回。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// 元素不存在
    #[error("元素 '{id}' 不存在")]
    ElementNotFound { id: String },

    /// 元素已存在
    #[error("元素 '{id}' 已存在")]
    DuplicateElement { id: String },

    /// 宿主拒绝了操作
    #[error("宿主拒绝操作: {message}")]
    Rejected { message: String },
}

/// Result 类型别名
pub type SurfaceResult<T> = Result<T, SurfaceError>;

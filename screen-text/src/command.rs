//! # Command 模块
//!
//! 宿主向文本框系统发出的指令，是 `showTextBox` / `eraseTextBox` /
//! `moveTextBox` 三个宿主 API 的可序列化形式。
//!
//! ## 序列化格式
//!
//! ```json
//! { "showTextBox": { "id": "hp", "text": "100", "x": 10, "y": 20, "color": "#ff0000" } }
//! { "moveTextBox": { "id": "hp", "x": 50, "y": 60, "duration": 30 } }
//! { "eraseTextBox": { "id": "hp" } }
//! ```

use serde::{Deserialize, Serialize};

use crate::key::OverlayKey;
use crate::style::{MoveOptions, ShowOptions};

/// 文本框指令
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// 显示（或替换）文本框
    ShowTextBox {
        id: OverlayKey,
        text: String,
        x: f32,
        y: f32,
        #[serde(flatten)]
        options: ShowOptions,
    },

    /// 擦除文本框
    EraseTextBox { id: OverlayKey },

    /// 移动文本框
    MoveTextBox {
        id: OverlayKey,
        x: f32,
        y: f32,
        #[serde(flatten)]
        options: MoveOptions,
    },
}

impl Command {
    /// 指令作用的文本框
    pub fn key(&self) -> &OverlayKey {
        match self {
            Self::ShowTextBox { id, .. }
            | Self::EraseTextBox { id }
            | Self::MoveTextBox { id, .. } => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_show() {
        let json = r##"{ "showTextBox": { "id": 3, "text": "hi", "x": 1, "y": 2, "scaleX": 150, "origin": 1 } }"##;
        let cmd: Command = serde_json::from_str(json).unwrap();

        match cmd {
            Command::ShowTextBox { id, text, x, y, options } => {
                assert_eq!(id, OverlayKey::from(3));
                assert_eq!(text, "hi");
                assert_eq!((x, y), (1.0, 2.0));
                assert_eq!(options.scale_x, Some(150.0));
                assert_eq!(options.origin, Some(crate::style::Origin::Center));
                assert_eq!(options.font, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_deserialize_move_and_erase() {
        let json = r##"[
            { "moveTextBox": { "id": "hp", "x": 50, "y": 60, "color": "#ff0000", "opacity": 128, "duration": 30, "rotation": 45 } },
            { "eraseTextBox": { "id": "hp" } }
        ]"##;
        let cmds: Vec<Command> = serde_json::from_str(json).unwrap();

        assert_eq!(
            cmds[0],
            Command::MoveTextBox {
                id: "hp".into(),
                x: 50.0,
                y: 60.0,
                options: MoveOptions {
                    color: Some("#ff0000".to_string()),
                    opacity: Some(128.0),
                    duration: Some(30),
                    rotation: Some(45.0),
                },
            }
        );
        assert_eq!(cmds[1].key().as_str(), "hp");
    }
}

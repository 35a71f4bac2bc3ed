//! # Flicker 模块
//!
//! 闪烁效果：边框圆角在两个值之间无限往返的装饰性脉冲。
//!
//! 闪烁由宿主自行播放（CSS keyframes 或等价机制），与动画引擎完全独立，
//! 不会触碰位置、透明度或旋转。

/// 闪烁脉冲定义
#[derive(Debug, Clone, PartialEq)]
pub struct FlickerEffect {
    /// 定义名称（keyframes 名称）
    pub name: &'static str,
    /// 单程时长（秒）
    pub period_secs: f32,
    /// 起始圆角（rem）
    pub from_radius_rem: f32,
    /// 结束圆角（rem）
    pub to_radius_rem: f32,
}

/// 默认闪烁效果：`flicker 1s infinite alternate`，圆角 0.5rem ↔ 2rem
pub const FLICKER: FlickerEffect = FlickerEffect {
    name: "flicker",
    period_secs: 1.0,
    from_radius_rem: 0.5,
    to_radius_rem: 2.0,
};

impl FlickerEffect {
    /// 元素上的 CSS `animation` 值
    pub fn animation_css(&self) -> String {
        format!("{} {}s infinite alternate", self.name, self.period_secs)
    }

    /// CSS `@keyframes` 定义
    pub fn keyframes_css(&self) -> String {
        format!(
            "@keyframes {} {{\n    0% {{ border-radius: {}rem; }}\n    100% {{ border-radius: {}rem; }}\n}}",
            self.name, self.from_radius_rem, self.to_radius_rem
        )
    }

    /// 计算 `elapsed_secs` 时刻的圆角（rem）
    ///
    /// 供不支持 keyframes 的宿主逐帧求值：奇数个周期反向播放。
    pub fn radius_at(&self, elapsed_secs: f32) -> f32 {
        if self.period_secs <= 0.0 || !elapsed_secs.is_finite() {
            return self.from_radius_rem;
        }

        let cycles = elapsed_secs.max(0.0) / self.period_secs;
        let phase = cycles.fract();
        let t = if (cycles.floor() as u64) % 2 == 0 {
            phase
        } else {
            1.0 - phase
        };

        self.from_radius_rem + (self.to_radius_rem - self.from_radius_rem) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_css() {
        assert_eq!(FLICKER.animation_css(), "flicker 1s infinite alternate");
    }

    #[test]
    fn test_radius_alternates() {
        assert_eq!(FLICKER.radius_at(0.0), 0.5);
        assert_eq!(FLICKER.radius_at(0.5), 1.25);
        // 第二个周期反向
        assert_eq!(FLICKER.radius_at(1.5), 1.25);
        assert!((FLICKER.radius_at(1.9) - 0.65).abs() < 1e-4);
        assert!((FLICKER.radius_at(2.1) - 0.65).abs() < 1e-4);
    }

    #[test]
    fn test_keyframes_css() {
        insta::assert_snapshot!(FLICKER.keyframes_css(), @r"
        @keyframes flicker {
            0% { border-radius: 0.5rem; }
            100% { border-radius: 2rem; }
        }
        ");
    }
}

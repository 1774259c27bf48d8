//! Peek height policy

use crate::data::OpeningMode;
use crate::geometry::ContentMetrics;

/// Visible height of the panel while collapsed
///
/// The preview block plus the button bar, minus the part of the bar that sits
/// behind the bottom system inset. `PreviewPlus` guarantees at least
/// `preview_plus_ratio` of the parent. Never taller than the parent.
pub fn peek_height(
    metrics: &ContentMetrics,
    mode: OpeningMode,
    parent_height: f32,
    preview_plus_ratio: f32,
) -> f32 {
    let organic = (metrics.preview_height + metrics.button_bar_height
        - metrics.button_bar_bottom_inset)
        .max(0.0);
    let peek = match mode {
        OpeningMode::PreviewPlus => organic.max(parent_height * preview_plus_ratio),
        OpeningMode::Preview | OpeningMode::Details => organic,
    };
    peek.min(parent_height.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> ContentMetrics {
        ContentMetrics {
            preview_height: 120.0,
            content_height: 500.0,
            button_bar_height: 56.0,
            button_bar_bottom_inset: 8.0,
        }
    }

    #[test]
    fn test_organic_peek() {
        assert_eq!(
            peek_height(&metrics(), OpeningMode::Preview, 800.0, 0.45),
            168.0
        );
    }

    #[test]
    fn test_preview_plus_uses_ratio_when_larger() {
        let peek = peek_height(&metrics(), OpeningMode::PreviewPlus, 800.0, 0.45);
        assert!((peek - 360.0).abs() < 1e-3, "got {}", peek);
    }

    #[test]
    fn test_preview_plus_keeps_organic_when_larger() {
        // 0.45 * 300 = 135 < 168
        assert_eq!(
            peek_height(&metrics(), OpeningMode::PreviewPlus, 300.0, 0.45),
            168.0
        );
    }

    #[test]
    fn test_peek_clamped_to_parent() {
        assert_eq!(
            peek_height(&metrics(), OpeningMode::Preview, 100.0, 0.45),
            100.0
        );
    }

    #[test]
    fn test_inset_larger_than_content_is_zero() {
        let metrics = ContentMetrics {
            preview_height: 0.0,
            content_height: 0.0,
            button_bar_height: 0.0,
            button_bar_bottom_inset: 24.0,
        };
        assert_eq!(
            peek_height(&metrics, OpeningMode::Preview, 800.0, 0.45),
            0.0
        );
    }
}

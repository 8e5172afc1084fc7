//! Display scale for the on-screen preview.
//!
//! The preview draws each page at its physical A4 size in CSS pixels (595 × 842) and scales it
//! to fit the available width. The scale never feeds back into block costs or pagination.

use serde::{Deserialize, Serialize};

pub const PAGE_WIDTH_PX: f32 = 595.0;
pub const PAGE_HEIGHT_PX: f32 = 842.0;
const MOBILE_BREAKPOINT_PX: f32 = 768.0;
const MOBILE_GUTTER_PX: f32 = 32.0;
const DESKTOP_GUTTER_PX: f32 = 96.0;
const MOBILE_PAGE_GAP_PX: f32 = 10.0;
const DESKTOP_PAGE_GAP_PX: f32 = 20.0;

pub const MIN_ZOOM: f32 = 50.0;
pub const MAX_ZOOM: f32 = 200.0;

/// How the renderer should size pages for one viewport snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayMetrics {
    pub viewport_width: f32,
    pub zoom: f32,
    pub scale: f32,
    pub page_width_px: f32,
    pub page_height_px: f32,
    /// Bottom margin that compensates for the scale transform plus the gap between pages.
    pub page_margin_bottom_px: f32,
}

/// `container / 595 × zoom / 100`, where the container is the viewport minus its gutter,
/// capped at the page width.
pub fn display_scale(viewport_width: f32, zoom: f32) -> f32 {
    let gutter = if viewport_width < MOBILE_BREAKPOINT_PX {
        MOBILE_GUTTER_PX
    } else {
        DESKTOP_GUTTER_PX
    };
    let container = (viewport_width - gutter).clamp(0.0, PAGE_WIDTH_PX);
    (container / PAGE_WIDTH_PX) * (zoom / 100.0)
}

pub fn display_metrics(viewport_width: f32, zoom: f32) -> DisplayMetrics {
    let scale = display_scale(viewport_width, zoom);
    let gap = if viewport_width < MOBILE_BREAKPOINT_PX {
        MOBILE_PAGE_GAP_PX
    } else {
        DESKTOP_PAGE_GAP_PX
    };
    DisplayMetrics {
        viewport_width,
        zoom,
        scale,
        page_width_px: PAGE_WIDTH_PX * scale,
        page_height_px: PAGE_HEIGHT_PX * scale,
        page_margin_bottom_px: (scale - 1.0) * PAGE_HEIGHT_PX + gap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_viewport_is_full_size() {
        assert_eq!(display_scale(1440.0, 100.0), 1.0);
        assert_eq!(display_scale(1440.0, 150.0), 1.5);
    }

    #[test]
    fn test_mobile_viewport_fits_width() {
        // 375 − 32 = 343 available
        let scale = display_scale(375.0, 100.0);
        assert!((scale - 343.0 / 595.0).abs() < 1e-6);
    }

    #[test]
    fn test_tiny_viewport_clamps_to_zero() {
        assert_eq!(display_scale(20.0, 100.0), 0.0);
    }

    #[test]
    fn test_metrics_margin_compensates_scale() {
        let metrics = display_metrics(1440.0, 100.0);
        assert_eq!(metrics.page_width_px, 595.0);
        assert_eq!(metrics.page_margin_bottom_px, 20.0);

        let mobile = display_metrics(375.0, 100.0);
        assert!(mobile.page_margin_bottom_px < 10.0);
    }
}

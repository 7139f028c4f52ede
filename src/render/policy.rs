//! Per-slot choice of how a vector source is fitted to the slot's size.

use crate::layout::android::ADAPTIVE_FOREGROUND_FILENAME;
use crate::platform::{ImageCategory, Platform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderStrategy {
    /// Safe-zone inset plus transparent margin, for the Android foreground layer.
    AdaptiveIcon,
    /// Render at exactly the slot size, whatever the source's aspect ratio.
    ExactFit,
    /// Preserve the source's aspect ratio, cover the slot and crop the overflow.
    ShorterSideFit,
}

impl RenderStrategy {
    /// Picks the strategy for one slot.
    ///
    /// The adaptive-icon check runs first: only the Android foreground file
    /// qualifies, and only when ratios are not varying. Storyboard
    /// renditions are always cut to size.
    pub fn select(
        platform: Platform,
        category: ImageCategory,
        filename: &str,
        varying_ratios: bool,
    ) -> Self {
        if !varying_ratios
            && platform == Platform::Android
            && filename == ADAPTIVE_FOREGROUND_FILENAME
        {
            Self::AdaptiveIcon
        } else if varying_ratios || category == ImageCategory::Storyboard {
            Self::ShorterSideFit
        } else {
            Self::ExactFit
        }
    }
}

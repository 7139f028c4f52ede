//! Target platforms and the image categories generated for them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppImageError;

// ============================================================================
// Platform
// ============================================================================

/// A mobile platform whose packaging tree receives generated images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "clap", value(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Android, Platform::Ios];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = AppImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| AppImageError::UnknownName {
                kind: "platform",
                name: s.to_string(),
            })
    }
}

// ============================================================================
// ImageCategory
// ============================================================================

/// A family of raster images derived from one vector source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "clap", value(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ImageCategory {
    LauncherIcon,
    LauncherBackground,
    Splashscreen,
    /// iOS launch-screen renditions, written from a fixed size table.
    Storyboard,
}

impl ImageCategory {
    pub const ALL: [ImageCategory; 4] = [
        ImageCategory::LauncherIcon,
        ImageCategory::LauncherBackground,
        ImageCategory::Splashscreen,
        ImageCategory::Storyboard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LauncherIcon => "launcher_icon",
            Self::LauncherBackground => "launcher_background",
            Self::Splashscreen => "splashscreen",
            Self::Storyboard => "storyboard",
        }
    }

    /// The category whose configured vector source feeds this one.
    ///
    /// Storyboard renditions are cut from the splashscreen artwork; every
    /// other category has its own source.
    pub fn source_category(&self) -> ImageCategory {
        match self {
            Self::Storyboard => Self::Splashscreen,
            other => *other,
        }
    }

    /// Returns true if the platform's packaging tree has slots for this category.
    pub fn supported_on(&self, platform: Platform) -> bool {
        match (self, platform) {
            (Self::Storyboard, Platform::Android) => false,
            (Self::LauncherBackground, Platform::Ios) => false,
            _ => true,
        }
    }
}

impl fmt::Display for ImageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageCategory {
    type Err = AppImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AppImageError::UnknownName {
                kind: "image category",
                name: s.to_string(),
            })
    }
}

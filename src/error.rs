//! Error types for image generation.
//!
//! Every failure propagates to the caller as soon as it happens. Slots that
//! were already overwritten keep their new contents; re-running the same
//! category regenerates them deterministically.

use std::path::PathBuf;

use thiserror::Error;

use crate::platform::{ImageCategory, Platform};
use crate::render::RenderError;

/// Where a vector source path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetOrigin {
    /// Uploaded for the app and named in its definition.
    Configured,
    /// A default shipped alongside this crate.
    Bundled,
}

/// Errors produced while resolving sources, enumerating slots or rendering.
#[derive(Debug, Error)]
pub enum AppImageError {
    /// No source is configured for the category and no fallback exists.
    #[error("no {category} image configured and no fallback image defined")]
    Configuration { category: ImageCategory },

    /// A source path that should exist is missing.
    ///
    /// `AssetOrigin::Configured` means the app's asset was never uploaded;
    /// `AssetOrigin::Bundled` means this crate was packaged without its defaults.
    #[error("{origin:?} source image not found: {}", path.display())]
    MissingAsset { path: PathBuf, origin: AssetOrigin },

    /// A placeholder raster could not be read or has a zero dimension.
    #[error("cannot infer size from placeholder {}: {reason}", path.display())]
    MalformedPlaceholder { path: PathBuf, reason: String },

    /// The renderer failed on a slot.
    #[error("rendering {platform} {category} into {} failed", path.display())]
    Render {
        path: PathBuf,
        platform: Platform,
        category: ImageCategory,
        #[source]
        source: RenderError,
    },

    /// The platform's packaging tree has no slots for this category.
    #[error("{category} images are not generated for {platform}")]
    UnsupportedCategory {
        platform: Platform,
        category: ImageCategory,
    },

    #[error("unknown {kind} {name:?}")]
    UnknownName { kind: &'static str, name: String },

    #[error("I/O error at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid app definition")]
    Definition(#[source] serde_json::Error),

    #[error("invalid build config {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl AppImageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = AppImageError> = std::result::Result<T, E>;

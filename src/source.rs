//! Resolution of the vector source image for a platform and category.

use std::path::PathBuf;

use crate::definition::AppDefinition;
use crate::error::{AppImageError, AssetOrigin, Result};
use crate::platform::{ImageCategory, Platform};

/// Bundled defaults for categories an app may leave unset, relative to the
/// bundled assets root.
pub const FALLBACK_IMAGES: &[(ImageCategory, &str)] = &[(
    ImageCategory::LauncherBackground,
    "images/adaptive_launcher_background.svg",
)];

/// Looks up the registered fallback for a category.
pub fn fallback_image(category: ImageCategory) -> Option<&'static str> {
    FALLBACK_IMAGES
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, path)| *path)
}

/// A resolved vector source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub path: PathBuf,
    pub platform: Platform,
    pub category: ImageCategory,
    pub origin: AssetOrigin,
}

/// Maps (platform, category) to an existing vector file on disk.
#[derive(Debug, Clone)]
pub struct SourceResolver {
    build_sources_root: PathBuf,
    bundled_assets_root: PathBuf,
}

impl SourceResolver {
    pub fn new(build_sources_root: impl Into<PathBuf>, bundled_assets_root: impl Into<PathBuf>) -> Self {
        Self {
            build_sources_root: build_sources_root.into(),
            bundled_assets_root: bundled_assets_root.into(),
        }
    }

    /// Path an app-provided source would have: `<root>/<platform>/assets/<filename>`.
    pub fn configured_path(&self, platform: Platform, filename: &str) -> PathBuf {
        self.build_sources_root
            .join(platform.as_str())
            .join("assets")
            .join(filename)
    }

    /// Resolves the source for `category` on `platform`.
    ///
    /// The app's configured file wins if it exists. Otherwise the category's
    /// bundled fallback is used. Without a fallback the result is
    /// [`AppImageError::MissingAsset`] when a configured file is missing, or
    /// [`AppImageError::Configuration`] when nothing was configured at all.
    pub fn resolve(
        &self,
        platform: Platform,
        category: ImageCategory,
        definition: &AppDefinition,
    ) -> Result<SourceImage> {
        let configured = definition
            .source_filename(platform, category)
            .map(|filename| self.configured_path(platform, filename));

        if let Some(path) = &configured {
            if path.is_file() {
                return Ok(SourceImage {
                    path: path.clone(),
                    platform,
                    category,
                    origin: AssetOrigin::Configured,
                });
            }
            log::warn!(
                "configured {platform} {category} source {} does not exist",
                path.display()
            );
        }

        let Some(fallback) = fallback_image(category) else {
            return Err(match configured {
                Some(path) => AppImageError::MissingAsset {
                    path,
                    origin: AssetOrigin::Configured,
                },
                None => AppImageError::Configuration { category },
            });
        };

        let path = self.bundled_assets_root.join(fallback);
        if !path.is_file() {
            return Err(AppImageError::MissingAsset {
                path,
                origin: AssetOrigin::Bundled,
            });
        }

        log::warn!("using bundled {category} image {}", path.display());
        Ok(SourceImage {
            path,
            platform,
            category,
            origin: AssetOrigin::Bundled,
        })
    }
}

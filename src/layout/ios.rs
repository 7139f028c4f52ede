//! iOS asset-catalog conventions.

use std::path::{Path, PathBuf};

use super::Slots;
use crate::error::{AppImageError, Result};
use crate::platform::{ImageCategory, Platform};
use crate::slot::{SizePx, SlotLocation};
use crate::tree::PackagingTree;

/// Launch-screen renditions written for the storyboard, with their sizes.
pub const STORYBOARD_IMAGES: &[(&str, SizePx)] = &[
    ("Default@2x~universal~anyany.png", SizePx::new(2732, 2732)),
    ("Default@3x~universal~anyany.png", SizePx::new(2732, 2732)),
];

/// Storyboard output folder relative to the packaging root.
pub const STORYBOARD_FOLDER: &str = "res/screen/ios";

/// Asset-catalog folder name for a scanned category.
pub fn catalog_folder(category: ImageCategory) -> Option<&'static str> {
    match category {
        ImageCategory::LauncherIcon => Some("AppIcon.appiconset"),
        ImageCategory::Splashscreen => Some("LaunchStoryboard.imageset"),
        ImageCategory::LauncherBackground | ImageCategory::Storyboard => None,
    }
}

#[derive(Debug, Clone)]
pub struct IosLayout {
    packaging_root: PathBuf,
    app_name: String,
}

impl IosLayout {
    pub fn new(packaging_root: &Path, app_name: impl Into<String>) -> Self {
        Self {
            packaging_root: packaging_root.to_path_buf(),
            app_name: app_name.into(),
        }
    }

    /// `platforms/ios/<AppName>/Images.xcassets`
    pub fn xcassets_root(&self) -> PathBuf {
        self.packaging_root
            .join("platforms/ios")
            .join(&self.app_name)
            .join("Images.xcassets")
    }

    /// The folder holding the category's images.
    pub fn folder_for(&self, category: ImageCategory) -> Result<PathBuf> {
        if category == ImageCategory::Storyboard {
            return Ok(self.packaging_root.join(STORYBOARD_FOLDER));
        }
        let folder = catalog_folder(category).ok_or(AppImageError::UnsupportedCategory {
            platform: Platform::Ios,
            category,
        })?;
        Ok(self.xcassets_root().join(folder))
    }

    pub fn enumerate<'t, T>(&self, tree: &'t T, category: ImageCategory) -> Result<Slots<'t>>
    where
        T: PackagingTree + ?Sized + 't,
    {
        let folder = self.folder_for(category)?;

        if category == ImageCategory::Storyboard {
            let slots = STORYBOARD_IMAGES
                .iter()
                .map(move |(filename, size)| SlotLocation::declared(folder.clone(), *filename, *size));
            return Ok(Box::new(slots));
        }

        let entries = tree.list_dir(&folder)?;
        let slots = entries
            .into_iter()
            .filter(|entry| entry.is_file() && entry.name.ends_with(".png"))
            .map(move |entry| SlotLocation::scanned(folder.clone(), entry.name));

        Ok(Box::new(slots))
    }
}

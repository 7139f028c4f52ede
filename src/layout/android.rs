//! Android resource-folder conventions.
//!
//! Launcher images live in density buckets such as `res/mipmap-hdpi/`,
//! splashscreens in `res/drawable-port-xxhdpi/` and friends. A bucket is
//! recognised by its name prefix and a slot only exists where the project
//! template already ships a placeholder with the expected file name.

use std::path::{Path, PathBuf};

use super::Slots;
use crate::error::{AppImageError, Result};
use crate::platform::{ImageCategory, Platform};
use crate::slot::SlotLocation;
use crate::tree::PackagingTree;

/// Resource root relative to the packaging root.
pub const RES_FOLDER: &str = "platforms/android/app/src/main/res";

/// File name of the adaptive-icon foreground layer.
pub const ADAPTIVE_FOREGROUND_FILENAME: &str = "ic_launcher_foreground.png";

/// Which density buckets and which files within them belong to a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AndroidSlotSpec {
    pub subfolder_prefix: &'static str,
    pub filenames: &'static [&'static str],
}

/// Returns the slot spec for a category, or `None` if Android has no such slots.
pub fn slot_spec(category: ImageCategory) -> Option<AndroidSlotSpec> {
    match category {
        ImageCategory::LauncherIcon => Some(AndroidSlotSpec {
            subfolder_prefix: "mipmap-",
            filenames: &["ic_launcher.png", ADAPTIVE_FOREGROUND_FILENAME],
        }),
        ImageCategory::LauncherBackground => Some(AndroidSlotSpec {
            subfolder_prefix: "mipmap-",
            filenames: &["ic_launcher_background.png"],
        }),
        ImageCategory::Splashscreen => Some(AndroidSlotSpec {
            subfolder_prefix: "drawable-",
            filenames: &["screen.png"],
        }),
        ImageCategory::Storyboard => None,
    }
}

#[derive(Debug, Clone)]
pub struct AndroidLayout {
    res_root: PathBuf,
}

impl AndroidLayout {
    pub fn new(packaging_root: &Path) -> Self {
        Self {
            res_root: packaging_root.join(RES_FOLDER),
        }
    }

    /// The folder whose subfolders are scanned for `category`.
    pub fn folder_for(&self, category: ImageCategory) -> Result<PathBuf> {
        Self::spec(category)?;
        Ok(self.res_root.clone())
    }

    pub fn enumerate<'t, T>(&self, tree: &'t T, category: ImageCategory) -> Result<Slots<'t>>
    where
        T: PackagingTree + ?Sized + 't,
    {
        let spec = Self::spec(category)?;
        let root = self.res_root.clone();
        let subfolders = tree.list_dir(&root)?;

        let slots = subfolders
            .into_iter()
            .filter(move |entry| entry.is_dir() && entry.name.starts_with(spec.subfolder_prefix))
            .flat_map(move |entry| {
                let folder = root.join(&entry.name);
                spec.filenames.iter().filter_map(move |filename| {
                    tree.is_file(&folder.join(filename))
                        .then(|| SlotLocation::scanned(folder.clone(), *filename))
                })
            });

        Ok(Box::new(slots))
    }

    fn spec(category: ImageCategory) -> Result<AndroidSlotSpec> {
        slot_spec(category).ok_or(AppImageError::UnsupportedCategory {
            platform: Platform::Android,
            category,
        })
    }
}

//! Slot discovery in a platform's packaging tree.
//!
//! [`SlotEnumerator`] dispatches on [`Platform`] to the Android or iOS
//! conventions. Each call to [`SlotEnumerator::enumerate`] rescans the tree
//! and returns a lazy iterator over the slots to overwrite. Scan order is
//! directory listing order and carries no meaning.

pub mod android;
pub mod ios;

pub use android::AndroidLayout;
pub use ios::IosLayout;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::platform::{ImageCategory, Platform};
use crate::slot::SlotLocation;
use crate::tree::PackagingTree;

/// Lazily yielded slots, borrowing the tree they were found in.
pub type Slots<'t> = Box<dyn Iterator<Item = SlotLocation> + 't>;

#[derive(Debug, Clone)]
pub enum SlotEnumerator {
    Android(AndroidLayout),
    Ios(IosLayout),
}

impl SlotEnumerator {
    /// Builds the enumerator for a platform. `app_name` only matters on iOS,
    /// where it is part of the asset-catalog path.
    pub fn for_platform(platform: Platform, packaging_root: &Path, app_name: &str) -> Self {
        match platform {
            Platform::Android => Self::Android(AndroidLayout::new(packaging_root)),
            Platform::Ios => Self::Ios(IosLayout::new(packaging_root, app_name)),
        }
    }

    /// The folder scanned (or written, for the storyboard) for `category`.
    pub fn folder_for(&self, category: ImageCategory) -> Result<PathBuf> {
        match self {
            Self::Android(layout) => layout.folder_for(category),
            Self::Ios(layout) => layout.folder_for(category),
        }
    }

    pub fn enumerate<'t, T>(&self, tree: &'t T, category: ImageCategory) -> Result<Slots<'t>>
    where
        T: PackagingTree + ?Sized + 't,
    {
        match self {
            Self::Android(layout) => layout.enumerate(tree, category),
            Self::Ios(layout) => layout.enumerate(tree, category),
        }
    }
}

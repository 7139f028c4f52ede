//! Slot types: raster file locations in a packaging tree and their pixel sizes.

use std::path::PathBuf;

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if both dimensions are non-zero.
    pub fn is_positive(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl std::fmt::Display for SizePx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A raster file that has to be regenerated, as found by a slot enumerator.
///
/// Scanned slots carry no size: it is read from the placeholder already at
/// [`path`](Self::path). Slots from a fixed size table carry a
/// `declared_size` and need no placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotLocation {
    /// The folder containing the slot file.
    pub folder: PathBuf,
    /// The slot's file name within `folder`.
    pub filename: String,
    pub declared_size: Option<SizePx>,
}

impl SlotLocation {
    /// A slot confirmed by an existing placeholder file.
    pub fn scanned(folder: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            filename: filename.into(),
            declared_size: None,
        }
    }

    /// A slot whose size comes from a lookup table.
    pub fn declared(folder: impl Into<PathBuf>, filename: impl Into<String>, size: SizePx) -> Self {
        Self {
            folder: folder.into(),
            filename: filename.into(),
            declared_size: Some(size),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.folder.join(&self.filename)
    }

    /// Attaches the resolved target size.
    pub fn with_size(self, size: SizePx) -> Slot {
        Slot {
            folder: self.folder,
            filename: self.filename,
            size,
        }
    }
}

/// A slot with its target pixel size resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub folder: PathBuf,
    pub filename: String,
    pub size: SizePx,
}

impl Slot {
    pub fn path(&self) -> PathBuf {
        self.folder.join(&self.filename)
    }
}

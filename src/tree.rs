//! Access to the packaging tree that holds placeholder rasters.
//!
//! Slot discovery and size inference go through [`PackagingTree`] so the
//! enumerators and the engine can run against [`MemoryTree`] as well as the
//! real filesystem ([`FsTree`]).

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{AppImageError, Result};
use crate::slot::SizePx;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl TreeEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Directory listing, placeholder inspection and folder reset.
pub trait PackagingTree {
    /// Lists the immediate children of `path` in listing order.
    fn list_dir(&self, path: &Path) -> Result<Vec<TreeEntry>>;

    fn is_file(&self, path: &Path) -> bool;

    /// Reads the pixel size of the raster at `path`.
    ///
    /// Fails with [`AppImageError::MalformedPlaceholder`] if the file cannot
    /// be decoded or either dimension is zero.
    fn image_dimensions(&self, path: &Path) -> Result<SizePx>;

    /// Removes `path` with all its contents if present, then creates it empty.
    fn recreate_dir(&self, path: &Path) -> Result<()>;
}

impl<T: PackagingTree + ?Sized> PackagingTree for &T {
    fn list_dir(&self, path: &Path) -> Result<Vec<TreeEntry>> {
        (**self).list_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }

    fn image_dimensions(&self, path: &Path) -> Result<SizePx> {
        (**self).image_dimensions(path)
    }

    fn recreate_dir(&self, path: &Path) -> Result<()> {
        (**self).recreate_dir(path)
    }
}

fn malformed(path: &Path, reason: impl Into<String>) -> AppImageError {
    AppImageError::MalformedPlaceholder {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

fn checked_size(path: &Path, size: SizePx) -> Result<SizePx> {
    if size.is_positive() {
        Ok(size)
    } else {
        Err(malformed(path, format!("placeholder reports size {size}")))
    }
}

// ============================================================================
// FsTree
// ============================================================================

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsTree;

impl PackagingTree for FsTree {
    fn list_dir(&self, path: &Path) -> Result<Vec<TreeEntry>> {
        let read_dir = std::fs::read_dir(path).map_err(|e| AppImageError::io(path, e))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| AppImageError::io(path, e))?;
            // Follows symlinks, matching what a later open() would see.
            let Ok(metadata) = std::fs::metadata(entry.path()) else {
                continue;
            };
            let Ok(name) = entry.file_name().into_string() else {
                log::debug!("skipping non UTF-8 entry in {}", path.display());
                continue;
            };
            let kind = if metadata.is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File
            };
            entries.push(TreeEntry { name, kind });
        }
        Ok(entries)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn image_dimensions(&self, path: &Path) -> Result<SizePx> {
        let (width, height) =
            image::image_dimensions(path).map_err(|e| malformed(path, e.to_string()))?;
        checked_size(path, SizePx::new(width, height))
    }

    fn recreate_dir(&self, path: &Path) -> Result<()> {
        if path.is_dir() {
            std::fs::remove_dir_all(path).map_err(|e| AppImageError::io(path, e))?;
        }
        std::fs::create_dir_all(path).map_err(|e| AppImageError::io(path, e))
    }
}

// ============================================================================
// MemoryTree
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemoryNode {
    Dir,
    /// A file, with its raster size if it decodes as an image.
    File(Option<SizePx>),
}

/// In-memory packaging tree.
///
/// Files are recorded with the raster size they would report; `None` models
/// a file that exists but does not decode. Listing order is sorted by name.
#[derive(Debug, Default)]
pub struct MemoryTree {
    nodes: RefCell<BTreeMap<PathBuf, MemoryNode>>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory and its missing ancestors.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut nodes = self.nodes.borrow_mut();
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            nodes.entry(ancestor.to_path_buf()).or_insert(MemoryNode::Dir);
        }
    }

    /// Writes a file, creating its parent folders. Overwrites any existing file.
    pub fn add_file(&self, path: impl AsRef<Path>, size: Option<SizePx>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.nodes
            .borrow_mut()
            .insert(path.to_path_buf(), MemoryNode::File(size));
    }

    /// Convenience for a decodable placeholder of the given size.
    pub fn add_image(&self, path: impl AsRef<Path>, width: u32, height: u32) {
        self.add_file(path, Some(SizePx::new(width, height)));
    }

    /// Returns the recorded size of a file, or `None` if absent or undecodable.
    pub fn file_size(&self, path: impl AsRef<Path>) -> Option<SizePx> {
        match self.nodes.borrow().get(path.as_ref()) {
            Some(MemoryNode::File(size)) => *size,
            _ => None,
        }
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.nodes.borrow().contains_key(path.as_ref())
    }
}

impl PackagingTree for MemoryTree {
    fn list_dir(&self, path: &Path) -> Result<Vec<TreeEntry>> {
        let nodes = self.nodes.borrow();
        if nodes.get(path) != Some(&MemoryNode::Dir) {
            return Err(AppImageError::io(
                path,
                io::Error::new(io::ErrorKind::NotFound, "no such directory"),
            ));
        }

        Ok(nodes
            .iter()
            .filter(|(child, _)| child.parent() == Some(path))
            .filter_map(|(child, node)| {
                let name = child.file_name()?.to_str()?.to_string();
                let kind = match node {
                    MemoryNode::Dir => EntryKind::Dir,
                    MemoryNode::File(_) => EntryKind::File,
                };
                Some(TreeEntry { name, kind })
            })
            .collect())
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.nodes.borrow().get(path), Some(MemoryNode::File(_)))
    }

    fn image_dimensions(&self, path: &Path) -> Result<SizePx> {
        match self.nodes.borrow().get(path) {
            Some(MemoryNode::File(Some(size))) => checked_size(path, *size),
            Some(MemoryNode::File(None)) => Err(malformed(path, "not a decodable image")),
            Some(MemoryNode::Dir) => Err(malformed(path, "is a directory")),
            None => Err(malformed(path, "file not found")),
        }
    }

    fn recreate_dir(&self, path: &Path) -> Result<()> {
        self.nodes
            .borrow_mut()
            .retain(|existing, _| !existing.starts_with(path));
        self.add_dir(path);
        Ok(())
    }
}

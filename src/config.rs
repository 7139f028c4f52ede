//! Filesystem roots for one build, loaded from `build_config.json`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppImageError, Result};

/// Name of the bundled assets directory, both in the source tree and next to
/// an installed binary.
const RESOURCES_DIR: &str = "resources";

/// Directory of bundled default assets shipped with this crate.
///
/// A `resources` directory next to the running executable wins, so an
/// installed binary finds the assets it was shipped with. Otherwise this is
/// the crate's own `resources` directory from build time.
pub fn default_bundled_assets_root() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    bundled_assets_root_near(exe_dir.as_deref())
}

fn bundled_assets_root_near(exe_dir: Option<&Path>) -> PathBuf {
    exe_dir
        .map(|dir| dir.join(RESOURCES_DIR))
        .filter(|root| root.is_dir())
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join(RESOURCES_DIR))
}

/// Where sources are read from and where generated images are written.
///
/// # JSON Format
///
/// ```json
/// {
///   "build_sources_root": "/var/builds/app/sources",
///   "packaging_root": "/var/builds/app/cordova/TreesOfBavaria",
///   "bundled_assets_root": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct BuildConfig {
    /// Holds `<platform>/assets/<filename>` vector sources.
    pub build_sources_root: PathBuf,

    /// Root of the platform packaging tree whose placeholders get overwritten.
    pub packaging_root: PathBuf,

    /// Overrides [`default_bundled_assets_root`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundled_assets_root: Option<PathBuf>,
}

impl BuildConfig {
    pub fn new(build_sources_root: impl Into<PathBuf>, packaging_root: impl Into<PathBuf>) -> Self {
        Self {
            build_sources_root: build_sources_root.into(),
            packaging_root: packaging_root.into(),
            bundled_assets_root: None,
        }
    }

    pub fn with_bundled_assets_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.bundled_assets_root = Some(root.into());
        self
    }

    /// The effective bundled assets directory.
    pub fn bundled_assets_root(&self) -> PathBuf {
        self.bundled_assets_root
            .clone()
            .unwrap_or_else(default_bundled_assets_root)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| AppImageError::io(path, e))?;
        serde_json::from_str(&json).map_err(|source| AppImageError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

//! Read-only snapshot of an app's asset configuration.
//!
//! An [`AppDefinition`] is built once per build by whoever owns the app
//! record and handed to the engine as JSON or as a value. The engine only
//! reads the app name and the per-platform source filenames.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "name": "TreesOfBavaria",
//!   "uuid": "5d8a0f5c-1b7e-4b8e-9d0a-8b6a6b4d7c11",
//!   "primary_language": "de",
//!   "build_number": 12,
//!   "frontend": {
//!     "android": {
//!       "launcher_icon": "launcher.svg",
//!       "launcher_background": null,
//!       "splashscreen": "splash.svg"
//!     },
//!     "ios": {
//!       "launcher_icon": "launcher.svg",
//!       "splashscreen": "splash.svg"
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{AppImageError, Result};
use crate::platform::{ImageCategory, Platform};

/// Configured source filenames for one platform, keyed by category.
pub type FrontendAssets = BTreeMap<ImageCategory, Option<String>>;

/// Immutable per-build description of an app.
///
/// Fields other than `name` and `frontend` are carried for the caller and
/// never consulted during generation. Unknown JSON fields are ignored, and so
/// are `frontend` entries for platforms or categories this crate does not
/// generate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct AppDefinition {
    /// App name; part of the iOS asset-catalog path.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_number: Option<u64>,

    /// Source filename per platform and category. `None` means "not uploaded".
    #[serde(default, deserialize_with = "deserialize_frontend")]
    #[cfg_attr(feature = "jsonschema", schemars(with = "BTreeMap<Platform, FrontendAssets>"))]
    pub frontend: BTreeMap<Platform, FrontendAssets>,
}

fn deserialize_frontend<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<Platform, FrontendAssets>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;

    let mut frontend = BTreeMap::new();
    for (platform_name, assets) in raw {
        let Ok(platform) = platform_name.parse::<Platform>() else {
            log::debug!("ignoring frontend assets for unknown platform {platform_name:?}");
            continue;
        };

        let assets = BTreeMap::<String, Value>::deserialize(assets).map_err(serde::de::Error::custom)?;
        let mut known = FrontendAssets::new();
        for (category_name, filename) in assets {
            let Ok(category) = category_name.parse::<ImageCategory>() else {
                log::debug!("ignoring unknown {platform} asset {category_name:?}");
                continue;
            };
            let filename = Option::<String>::deserialize(filename).map_err(serde::de::Error::custom)?;
            known.insert(category, filename);
        }
        frontend.insert(platform, known);
    }
    Ok(frontend)
}

impl AppDefinition {
    /// Creates a definition with no assets configured.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uuid: None,
            primary_language: None,
            build_number: None,
            frontend: BTreeMap::new(),
        }
    }

    /// Sets the source filename for a platform and category.
    pub fn with_asset(
        mut self,
        platform: Platform,
        category: ImageCategory,
        filename: impl Into<String>,
    ) -> Self {
        self.frontend
            .entry(platform)
            .or_default()
            .insert(category, Some(filename.into()));
        self
    }

    /// Returns the configured source filename, treating empty strings as unset.
    pub fn source_filename(&self, platform: Platform, category: ImageCategory) -> Option<&str> {
        self.frontend
            .get(&platform)?
            .get(&category)?
            .as_deref()
            .filter(|name| !name.is_empty())
    }

    /// Serializes the definition to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(AppImageError::Definition)
    }

    /// Serializes the definition to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(AppImageError::Definition)
    }

    /// Deserializes a definition from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(AppImageError::Definition)
    }
}

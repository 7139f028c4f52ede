//! app-image-creator: regenerate app icons and splash screens from vector sources
//!
//! A hybrid app project keeps one vector image per image category (launcher
//! icon, splash screen, ...) and a packaging tree per platform whose raster
//! placeholders define where images go and at what size. This crate finds
//! those placeholders and overwrites each with a rendition of the vector
//! source at the placeholder's size.
//!
//! # Example
//!
//! ```
//! use app_image_creator::{
//!     AppDefinition, AppImageEngine, BuildConfig, ImageCategory, MemoryTree, Platform,
//!     ResvgRenderer,
//! };
//!
//! let tree = MemoryTree::new();
//! tree.add_image(
//!     "/app/platforms/android/app/src/main/res/mipmap-hdpi/ic_launcher.png",
//!     72,
//!     72,
//! );
//!
//! let config = BuildConfig::new("/app/build", "/app");
//! let definition = AppDefinition::new("Demo");
//! let engine = AppImageEngine::new(&config, definition, &tree, ResvgRenderer::new());
//!
//! let slots = engine.slots(Platform::Android, ImageCategory::LauncherIcon).unwrap();
//! assert_eq!(slots.len(), 1);
//! assert_eq!(slots[0].size.to_string(), "72x72");
//! ```
//!
//! # Strategies
//!
//! Each slot is rendered with one [`RenderStrategy`]:
//!
//! ```
//! use app_image_creator::{ImageCategory, Platform, RenderStrategy};
//!
//! let strategy = RenderStrategy::select(
//!     Platform::Android,
//!     ImageCategory::LauncherIcon,
//!     "ic_launcher_foreground.png",
//!     false,
//! );
//! assert_eq!(strategy, RenderStrategy::AdaptiveIcon);
//! ```

mod config;
mod definition;
mod engine;
mod error;
mod platform;
mod slot;
mod source;
mod tree;

pub mod layout;
pub mod render;

pub use config::{BuildConfig, default_bundled_assets_root};
pub use definition::{AppDefinition, FrontendAssets};
pub use engine::{
    AppImageEngine, GenerateOptions, GeneratedSlot, GenerationReport, GenerationStep,
};
pub use error::{AppImageError, AssetOrigin, Result};
pub use layout::{SlotEnumerator, Slots};
pub use platform::{ImageCategory, Platform};
pub use render::{
    AdaptiveIconComposer, AdaptiveIconGeometry, Border, RenderError, RenderStrategy,
    ResvgRenderer, VectorRenderer,
};
pub use slot::{SizePx, Slot, SlotLocation};
pub use source::{FALLBACK_IMAGES, SourceImage, SourceResolver, fallback_image};
pub use tree::{EntryKind, FsTree, MemoryTree, PackagingTree, TreeEntry};

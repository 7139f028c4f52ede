//! Image generation engine.

use std::path::{Path, PathBuf};

use crate::config::BuildConfig;
use crate::definition::AppDefinition;
use crate::error::{AppImageError, Result};
use crate::layout::SlotEnumerator;
use crate::platform::{ImageCategory, Platform};
use crate::render::{AdaptiveIconComposer, RenderError, RenderStrategy, ResvgRenderer, VectorRenderer};
use crate::slot::{SizePx, Slot, SlotLocation};
use crate::source::{SourceImage, SourceResolver};
use crate::tree::{FsTree, PackagingTree};

// ============================================================================
// Options and plans
// ============================================================================

/// Flags controlling one generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerateOptions {
    /// Slots may differ in aspect ratio from the source; fit the shorter side
    /// and crop instead of stretching.
    pub varying_ratios: bool,
    /// Flatten every written slot onto an opaque background.
    pub remove_alpha_channel: bool,
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn varying_ratios(mut self, varying: bool) -> Self {
        self.varying_ratios = varying;
        self
    }

    pub fn remove_alpha_channel(mut self, remove: bool) -> Self {
        self.remove_alpha_channel = remove;
        self
    }
}

/// One category to generate, with its options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStep {
    pub category: ImageCategory,
    pub options: GenerateOptions,
}

impl GenerationStep {
    pub fn new(category: ImageCategory, options: GenerateOptions) -> Self {
        Self { category, options }
    }

    /// The categories a regular build regenerates for a platform, in order.
    ///
    /// Splash images vary in aspect ratio across devices. App Store icons
    /// must not carry an alpha channel.
    pub fn standard_plan(platform: Platform) -> Vec<GenerationStep> {
        let plain = GenerateOptions::new();
        let varying = GenerateOptions::new().varying_ratios(true);
        match platform {
            Platform::Android => vec![
                Self::new(ImageCategory::LauncherIcon, plain),
                Self::new(ImageCategory::LauncherBackground, plain),
                Self::new(ImageCategory::Splashscreen, varying),
            ],
            Platform::Ios => vec![
                Self::new(
                    ImageCategory::LauncherIcon,
                    plain.remove_alpha_channel(true),
                ),
                Self::new(ImageCategory::Splashscreen, varying),
                Self::new(ImageCategory::Storyboard, varying),
            ],
        }
    }
}

// ============================================================================
// Reports
// ============================================================================

/// A slot that was overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSlot {
    pub path: PathBuf,
    pub size: SizePx,
    pub strategy: RenderStrategy,
}

/// Outcome of a completed generation pass.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub platform: Platform,
    pub category: ImageCategory,
    pub source: SourceImage,
    pub slots: Vec<GeneratedSlot>,
}

// ============================================================================
// AppImageEngine
// ============================================================================

/// Regenerates the raster slots of a packaging tree from vector sources.
///
/// The engine owns an [`AppDefinition`] snapshot for one build and assumes
/// exclusive access to the packaging tree while a pass runs. A pass stops at
/// the first failing slot; slots written before it keep their new content.
///
/// # Example
///
/// ```no_run
/// use app_image_creator::{
///     AppDefinition, AppImageEngine, BuildConfig, GenerateOptions, ImageCategory, Platform,
/// };
///
/// let config = BuildConfig::load("build_config.json")?;
/// let definition = AppDefinition::from_json(&std::fs::read_to_string("app.json")?)?;
/// let engine = AppImageEngine::from_config(&config, definition);
///
/// engine.generate(Platform::Android, ImageCategory::LauncherIcon, GenerateOptions::new())?;
/// engine.generate(
///     Platform::Android,
///     ImageCategory::Splashscreen,
///     GenerateOptions::new().varying_ratios(true),
/// )?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct AppImageEngine<T = FsTree, R = ResvgRenderer> {
    definition: AppDefinition,
    resolver: SourceResolver,
    packaging_root: PathBuf,
    composer: AdaptiveIconComposer,
    tree: T,
    renderer: R,
}

impl AppImageEngine {
    /// An engine on the real filesystem, rendering with resvg and system fonts.
    pub fn from_config(config: &BuildConfig, definition: AppDefinition) -> Self {
        Self::new(config, definition, FsTree, ResvgRenderer::with_system_fonts())
    }
}

impl<T: PackagingTree, R: VectorRenderer> AppImageEngine<T, R> {
    pub fn new(config: &BuildConfig, definition: AppDefinition, tree: T, renderer: R) -> Self {
        Self {
            definition,
            resolver: SourceResolver::new(
                config.build_sources_root.clone(),
                config.bundled_assets_root(),
            ),
            packaging_root: config.packaging_root.clone(),
            composer: AdaptiveIconComposer::default(),
            tree,
            renderer,
        }
    }

    /// Replaces the adaptive-icon composer, e.g. to change the safe zone.
    pub fn with_composer(mut self, composer: AdaptiveIconComposer) -> Self {
        self.composer = composer;
        self
    }

    pub fn enumerator(&self, platform: Platform) -> SlotEnumerator {
        SlotEnumerator::for_platform(platform, &self.packaging_root, &self.definition.name)
    }

    /// Lists the slots a pass would write, with their target sizes.
    pub fn slots(&self, platform: Platform, category: ImageCategory) -> Result<Vec<Slot>> {
        self.check_supported(platform, category)?;
        self.enumerator(platform)
            .enumerate(&self.tree, category)?
            .map(|location| self.resolve_size(location))
            .collect()
    }

    /// Regenerates every slot of `category` on `platform`.
    pub fn generate(
        &self,
        platform: Platform,
        category: ImageCategory,
        options: GenerateOptions,
    ) -> Result<GenerationReport> {
        self.check_supported(platform, category)?;

        let source = self
            .resolver
            .resolve(platform, category.source_category(), &self.definition)?;
        let enumerator = self.enumerator(platform);

        if category == ImageCategory::Storyboard {
            let folder = enumerator.folder_for(category)?;
            log::debug!("recreating {}", folder.display());
            self.tree.recreate_dir(&folder)?;
        }

        log::info!(
            "generating {platform} {category} images from {}",
            source.path.display()
        );

        let mut slots = Vec::new();
        for location in enumerator.enumerate(&self.tree, category)? {
            let slot = self.resolve_size(location)?;
            let path = slot.path();
            let strategy =
                RenderStrategy::select(platform, category, &slot.filename, options.varying_ratios);

            log::debug!("{} {} -> {:?}", path.display(), slot.size, strategy);

            self.render_slot(strategy, &source.path, slot.size, &path)
                .and_then(|()| {
                    if options.remove_alpha_channel {
                        self.renderer.remove_alpha(&path)
                    } else {
                        Ok(())
                    }
                })
                .map_err(|e| AppImageError::Render {
                    path: path.clone(),
                    platform,
                    category,
                    source: e,
                })?;

            slots.push(GeneratedSlot {
                path,
                size: slot.size,
                strategy,
            });
        }

        if slots.is_empty() {
            log::warn!("no {platform} {category} slots found");
        } else {
            log::info!("wrote {} {platform} {category} images", slots.len());
        }

        Ok(GenerationReport {
            platform,
            category,
            source,
            slots,
        })
    }

    /// Runs [`GenerationStep::standard_plan`] for a platform, stopping at the
    /// first failing step.
    pub fn generate_plan(&self, platform: Platform) -> Result<Vec<GenerationReport>> {
        GenerationStep::standard_plan(platform)
            .into_iter()
            .map(|step| self.generate(platform, step.category, step.options))
            .collect()
    }

    fn check_supported(&self, platform: Platform, category: ImageCategory) -> Result<()> {
        if category.supported_on(platform) {
            Ok(())
        } else {
            Err(AppImageError::UnsupportedCategory { platform, category })
        }
    }

    /// Takes the declared size, or reads it from the placeholder.
    fn resolve_size(&self, location: SlotLocation) -> Result<Slot> {
        let size = match location.declared_size {
            Some(size) if size.is_positive() => size,
            Some(size) => {
                return Err(AppImageError::MalformedPlaceholder {
                    path: location.path(),
                    reason: format!("declared size {size}"),
                });
            }
            None => self.tree.image_dimensions(&location.path())?,
        };
        Ok(location.with_size(size))
    }

    fn render_slot(
        &self,
        strategy: RenderStrategy,
        source: &Path,
        size: SizePx,
        destination: &Path,
    ) -> Result<(), RenderError> {
        match strategy {
            RenderStrategy::AdaptiveIcon => self
                .composer
                .compose(&self.renderer, source, size, destination)
                .map(|_| ()),
            RenderStrategy::ExactFit => self.renderer.render(source, size, destination),
            RenderStrategy::ShorterSideFit => self.renderer.render_cropped(source, size, destination),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashSet;

    use image::Rgba;

    use super::*;
    use crate::error::AssetOrigin;
    use crate::layout::android::RES_FOLDER;
    use crate::render::Border;
    use crate::tree::MemoryTree;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Render(PathBuf, SizePx),
        Cropped(PathBuf, SizePx),
        Border(PathBuf, Border),
        RemoveAlpha(PathBuf),
    }

    /// Records calls and writes sized files into a [`MemoryTree`].
    struct RecordingRenderer<'a> {
        tree: &'a MemoryTree,
        calls: RefCell<Vec<Call>>,
        fail_on: Option<String>,
    }

    impl<'a> RecordingRenderer<'a> {
        fn new(tree: &'a MemoryTree) -> Self {
            Self {
                tree,
                calls: RefCell::new(Vec::new()),
                fail_on: None,
            }
        }

        fn failing_on(tree: &'a MemoryTree, filename: &str) -> Self {
            Self {
                fail_on: Some(filename.to_string()),
                ..Self::new(tree)
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn write(&self, destination: &Path, size: SizePx) -> Result<(), RenderError> {
            if self.fail_on.as_deref() == destination.file_name().and_then(|n| n.to_str()) {
                return Err(RenderError::InvalidSize { size });
            }
            self.tree.add_file(destination, Some(size));
            Ok(())
        }
    }

    impl VectorRenderer for RecordingRenderer<'_> {
        fn render(&self, _source: &Path, size: SizePx, destination: &Path) -> Result<(), RenderError> {
            self.calls
                .borrow_mut()
                .push(Call::Render(destination.to_path_buf(), size));
            self.write(destination, size)
        }

        fn render_cropped(
            &self,
            _source: &Path,
            size: SizePx,
            destination: &Path,
        ) -> Result<(), RenderError> {
            self.calls
                .borrow_mut()
                .push(Call::Cropped(destination.to_path_buf(), size));
            self.write(destination, size)
        }

        fn add_border(
            &self,
            destination: &Path,
            border: Border,
            _color: Rgba<u8>,
        ) -> Result<(), RenderError> {
            self.calls
                .borrow_mut()
                .push(Call::Border(destination.to_path_buf(), border));
            let inner = self.tree.file_size(destination).unwrap_or_default();
            self.write(destination, border.outer_size(inner))
        }

        fn remove_alpha(&self, destination: &Path) -> Result<(), RenderError> {
            self.calls
                .borrow_mut()
                .push(Call::RemoveAlpha(destination.to_path_buf()));
            Ok(())
        }
    }

    const SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"><rect width="100" height="100" fill="#3366cc"/></svg>"##;

    /// Build sources on disk with an icon and a splash for both platforms.
    fn build_sources() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for platform in Platform::ALL {
            let assets = dir.path().join(platform.as_str()).join("assets");
            std::fs::create_dir_all(&assets).unwrap();
            std::fs::write(assets.join("icon.svg"), SVG).unwrap();
            std::fs::write(assets.join("splash.svg"), SVG).unwrap();
        }
        dir
    }

    fn definition() -> AppDefinition {
        let mut definition = AppDefinition::new("Demo");
        for platform in Platform::ALL {
            definition = definition
                .with_asset(platform, ImageCategory::LauncherIcon, "icon.svg")
                .with_asset(platform, ImageCategory::Splashscreen, "splash.svg");
        }
        definition
    }

    fn res(path: &str) -> PathBuf {
        Path::new("/app").join(RES_FOLDER).join(path)
    }

    fn android_tree() -> MemoryTree {
        let tree = MemoryTree::new();
        tree.add_image(res("mipmap-mdpi/ic_launcher.png"), 48, 48);
        tree.add_image(res("mipmap-mdpi/ic_launcher_foreground.png"), 108, 108);
        tree.add_image(res("mipmap-mdpi/ic_launcher_background.png"), 108, 108);
        tree.add_image(res("mipmap-xxxhdpi/ic_launcher.png"), 192, 192);
        tree.add_image(res("mipmap-xxxhdpi/ic_launcher_foreground.png"), 432, 432);
        tree.add_image(res("drawable-hdpi/ic_launcher.png"), 72, 72);
        tree.add_image(res("drawable-port-hdpi/screen.png"), 480, 800);
        tree.add_image(res("drawable-land-hdpi/screen.png"), 800, 480);
        tree
    }

    fn engine<'a>(
        sources: &tempfile::TempDir,
        tree: &'a MemoryTree,
        renderer: &'a RecordingRenderer<'a>,
    ) -> AppImageEngine<&'a MemoryTree, &'a RecordingRenderer<'a>> {
        let config = BuildConfig::new(sources.path(), "/app");
        AppImageEngine::new(&config, definition(), tree, renderer)
    }

    #[test]
    fn android_launcher_icon_uses_adaptive_layer_for_foreground() {
        let sources = build_sources();
        let tree = android_tree();
        let renderer = RecordingRenderer::new(&tree);

        let report = engine(&sources, &tree, &renderer)
            .generate(Platform::Android, ImageCategory::LauncherIcon, GenerateOptions::new())
            .unwrap();

        assert_eq!(report.slots.len(), 4);
        assert_eq!(report.source.origin, AssetOrigin::Configured);

        let calls: HashSet<String> = renderer.calls().iter().map(|c| format!("{c:?}")).collect();
        let expect = |call: Call| assert!(calls.contains(&format!("{call:?}")), "missing {call:?}");
        expect(Call::Render(res("mipmap-mdpi/ic_launcher.png"), SizePx::new(48, 48)));
        expect(Call::Render(res("mipmap-xxxhdpi/ic_launcher.png"), SizePx::new(192, 192)));
        expect(Call::Render(
            res("mipmap-mdpi/ic_launcher_foreground.png"),
            SizePx::new(90, 90),
        ));
        expect(Call::Border(res("mipmap-mdpi/ic_launcher_foreground.png"), Border::uniform(9)));
        expect(Call::Render(
            res("mipmap-xxxhdpi/ic_launcher_foreground.png"),
            SizePx::new(360, 360),
        ));
        expect(Call::Border(
            res("mipmap-xxxhdpi/ic_launcher_foreground.png"),
            Border::uniform(36),
        ));
        assert_eq!(calls.len(), 6);

        // final canvas keeps the placeholder size
        assert_eq!(
            tree.file_size(res("mipmap-xxxhdpi/ic_launcher_foreground.png")),
            Some(SizePx::new(432, 432))
        );
        let strategies: HashSet<_> = report.slots.iter().map(|s| s.strategy).collect();
        assert!(strategies.contains(&RenderStrategy::AdaptiveIcon));
        assert!(strategies.contains(&RenderStrategy::ExactFit));
    }

    #[test]
    fn custom_safe_zone_reaches_foreground_slots() {
        let sources = build_sources();
        let tree = MemoryTree::new();
        tree.add_image(res("mipmap-xxxhdpi/ic_launcher_foreground.png"), 432, 432);
        let renderer = RecordingRenderer::new(&tree);

        let report = engine(&sources, &tree, &renderer)
            .with_composer(AdaptiveIconComposer::new(72))
            .generate(Platform::Android, ImageCategory::LauncherIcon, GenerateOptions::new())
            .unwrap();

        let foreground = res("mipmap-xxxhdpi/ic_launcher_foreground.png");
        assert_eq!(report.slots[0].strategy, RenderStrategy::AdaptiveIcon);
        assert_eq!(
            renderer.calls(),
            vec![
                Call::Render(foreground.clone(), SizePx::new(288, 288)),
                Call::Border(foreground.clone(), Border::uniform(72)),
            ]
        );
        assert_eq!(tree.file_size(&foreground), Some(SizePx::new(432, 432)));
    }

    #[test]
    fn varying_ratios_skip_adaptive_composition() {
        let sources = build_sources();
        let tree = android_tree();
        let renderer = RecordingRenderer::new(&tree);

        engine(&sources, &tree, &renderer)
            .generate(
                Platform::Android,
                ImageCategory::LauncherIcon,
                GenerateOptions::new().varying_ratios(true),
            )
            .unwrap();

        let calls = renderer.calls();
        assert_eq!(calls.len(), 4);
        assert!(calls.iter().all(|c| matches!(c, Call::Cropped(..))));
    }

    #[test]
    fn splashscreen_slots_are_cropped_at_placeholder_size() {
        let sources = build_sources();
        let tree = android_tree();
        let renderer = RecordingRenderer::new(&tree);

        engine(&sources, &tree, &renderer)
            .generate(
                Platform::Android,
                ImageCategory::Splashscreen,
                GenerateOptions::new().varying_ratios(true),
            )
            .unwrap();

        let calls: HashSet<String> = renderer.calls().iter().map(|c| format!("{c:?}")).collect();
        assert_eq!(calls.len(), 2);
        assert!(calls.contains(&format!(
            "{:?}",
            Call::Cropped(res("drawable-port-hdpi/screen.png"), SizePx::new(480, 800))
        )));
        assert!(calls.contains(&format!(
            "{:?}",
            Call::Cropped(res("drawable-land-hdpi/screen.png"), SizePx::new(800, 480))
        )));
    }

    #[test]
    fn launcher_background_falls_back_to_bundled_asset() {
        let sources = build_sources();
        let tree = android_tree();
        let renderer = RecordingRenderer::new(&tree);

        let report = engine(&sources, &tree, &renderer)
            .generate(
                Platform::Android,
                ImageCategory::LauncherBackground,
                GenerateOptions::new(),
            )
            .unwrap();

        assert_eq!(report.source.origin, AssetOrigin::Bundled);
        assert_eq!(
            renderer.calls(),
            vec![Call::Render(
                res("mipmap-mdpi/ic_launcher_background.png"),
                SizePx::new(108, 108)
            )]
        );
    }

    #[test]
    fn remove_alpha_runs_after_each_render() {
        let sources = build_sources();
        let tree = MemoryTree::new();
        let catalog = Path::new("/app/platforms/ios/Demo/Images.xcassets/AppIcon.appiconset");
        tree.add_image(catalog.join("icon-1024.png"), 1024, 1024);
        let renderer = RecordingRenderer::new(&tree);

        engine(&sources, &tree, &renderer)
            .generate(
                Platform::Ios,
                ImageCategory::LauncherIcon,
                GenerateOptions::new().remove_alpha_channel(true),
            )
            .unwrap();

        assert_eq!(
            renderer.calls(),
            vec![
                Call::Render(catalog.join("icon-1024.png"), SizePx::new(1024, 1024)),
                Call::RemoveAlpha(catalog.join("icon-1024.png")),
            ]
        );
    }

    #[test]
    fn storyboard_recreates_its_folder_and_uses_the_size_table() {
        let sources = build_sources();
        let tree = MemoryTree::new();
        tree.add_image("/app/res/screen/ios/Default@1x~stale.png", 10, 10);
        let renderer = RecordingRenderer::new(&tree);

        let report = engine(&sources, &tree, &renderer)
            .generate(Platform::Ios, ImageCategory::Storyboard, GenerateOptions::new())
            .unwrap();

        assert!(!tree.exists("/app/res/screen/ios/Default@1x~stale.png"));
        assert_eq!(report.source.category, ImageCategory::Splashscreen);
        assert_eq!(report.slots.len(), 2);
        for call in renderer.calls() {
            match call {
                Call::Cropped(path, size) => {
                    assert!(path.starts_with("/app/res/screen/ios"));
                    assert_eq!(size, SizePx::new(2732, 2732));
                }
                other => panic!("unexpected call {other:?}"),
            }
        }
    }

    #[test]
    fn unsupported_category_is_rejected_before_resolving() {
        let sources = build_sources();
        let tree = MemoryTree::new();
        let renderer = RecordingRenderer::new(&tree);

        let err = engine(&sources, &tree, &renderer)
            .generate(Platform::Android, ImageCategory::Storyboard, GenerateOptions::new())
            .unwrap_err();

        assert!(matches!(err, AppImageError::UnsupportedCategory { .. }));
        assert!(renderer.calls().is_empty());
    }

    #[test]
    fn malformed_placeholder_stops_the_pass() {
        let sources = build_sources();
        let tree = MemoryTree::new();
        // listing order is by name: "mipmap-a" is visited before "mipmap-b"
        tree.add_image(res("mipmap-a/ic_launcher.png"), 48, 48);
        tree.add_image(res("mipmap-b/ic_launcher.png"), 0, 0);
        tree.add_image(res("mipmap-c/ic_launcher.png"), 96, 96);
        let renderer = RecordingRenderer::new(&tree);

        let err = engine(&sources, &tree, &renderer)
            .generate(Platform::Android, ImageCategory::LauncherIcon, GenerateOptions::new())
            .unwrap_err();

        assert!(
            matches!(&err, AppImageError::MalformedPlaceholder { path, .. } if path.ends_with("mipmap-b/ic_launcher.png"))
        );
        // written slots stay written, later ones are untouched
        assert_eq!(
            renderer.calls(),
            vec![Call::Render(res("mipmap-a/ic_launcher.png"), SizePx::new(48, 48))]
        );
    }

    #[test]
    fn render_failure_names_the_slot() {
        let sources = build_sources();
        let tree = android_tree();
        let renderer = RecordingRenderer::failing_on(&tree, "screen.png");

        let err = engine(&sources, &tree, &renderer)
            .generate(
                Platform::Android,
                ImageCategory::Splashscreen,
                GenerateOptions::new().varying_ratios(true),
            )
            .unwrap_err();

        match err {
            AppImageError::Render {
                path,
                platform,
                category,
                ..
            } => {
                assert!(path.ends_with("screen.png"));
                assert_eq!(platform, Platform::Android);
                assert_eq!(category, ImageCategory::Splashscreen);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_source_fails_before_touching_slots() {
        let sources = tempfile::tempdir().unwrap();
        let tree = android_tree();
        let renderer = RecordingRenderer::new(&tree);

        let err = engine(&sources, &tree, &renderer)
            .generate(Platform::Android, ImageCategory::LauncherIcon, GenerateOptions::new())
            .unwrap_err();

        assert!(matches!(
            err,
            AppImageError::MissingAsset {
                origin: AssetOrigin::Configured,
                ..
            }
        ));
        assert!(renderer.calls().is_empty());
    }

    #[test]
    fn slots_lists_sizes_without_rendering() {
        let sources = build_sources();
        let tree = android_tree();
        let renderer = RecordingRenderer::new(&tree);

        let slots = engine(&sources, &tree, &renderer)
            .slots(Platform::Android, ImageCategory::Splashscreen)
            .unwrap();

        let sizes: HashSet<_> = slots.iter().map(|s| s.size).collect();
        assert_eq!(
            sizes,
            [SizePx::new(480, 800), SizePx::new(800, 480)].into_iter().collect()
        );
        assert!(renderer.calls().is_empty());
    }

    #[test]
    fn standard_plans() {
        let android = GenerationStep::standard_plan(Platform::Android);
        assert_eq!(
            android.iter().map(|s| s.category).collect::<Vec<_>>(),
            vec![
                ImageCategory::LauncherIcon,
                ImageCategory::LauncherBackground,
                ImageCategory::Splashscreen
            ]
        );
        assert!(android[2].options.varying_ratios);

        let ios = GenerationStep::standard_plan(Platform::Ios);
        assert_eq!(ios[0].category, ImageCategory::LauncherIcon);
        assert!(ios[0].options.remove_alpha_channel);
        assert_eq!(ios[2].category, ImageCategory::Storyboard);
        assert!(ios.iter().all(|s| s.category.supported_on(Platform::Ios)));
        assert!(android.iter().all(|s| s.category.supported_on(Platform::Android)));
    }

    #[test]
    fn generate_plan_runs_every_android_step() {
        let sources = build_sources();
        let tree = android_tree();
        let renderer = RecordingRenderer::new(&tree);

        let reports = engine(&sources, &tree, &renderer)
            .generate_plan(Platform::Android)
            .unwrap();

        let written: Vec<_> = reports.iter().map(|r| (r.category, r.slots.len())).collect();
        assert_eq!(
            written,
            vec![
                (ImageCategory::LauncherIcon, 4),
                (ImageCategory::LauncherBackground, 1),
                (ImageCategory::Splashscreen, 2),
            ]
        );
    }

    // ---- Real filesystem ----

    fn write_placeholder(path: &Path, width: u32, height: u32) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        image::RgbaImage::new(width, height).save(path).unwrap();
    }

    #[test]
    fn regenerates_android_tree_on_disk_idempotently() {
        let sources = build_sources();
        let packaging = tempfile::tempdir().unwrap();
        let res_root = packaging.path().join(RES_FOLDER);
        write_placeholder(&res_root.join("mipmap-mdpi/ic_launcher.png"), 48, 48);
        write_placeholder(&res_root.join("mipmap-mdpi/ic_launcher_foreground.png"), 108, 108);
        write_placeholder(&res_root.join("mipmap-hdpi/ic_launcher.png"), 72, 72);
        write_placeholder(&res_root.join("drawable-hdpi/ic_launcher.png"), 5, 5);

        let config = BuildConfig::new(sources.path(), packaging.path());
        let engine = AppImageEngine::new(&config, definition(), FsTree, ResvgRenderer::new());

        engine
            .generate(Platform::Android, ImageCategory::LauncherIcon, GenerateOptions::new())
            .unwrap();
        let first = image::open(res_root.join("mipmap-mdpi/ic_launcher_foreground.png"))
            .unwrap()
            .to_rgba8();

        assert_eq!(first.dimensions(), (108, 108));
        assert_eq!(first.get_pixel(0, 0).0, [255, 255, 255, 0]);
        assert_eq!(first.get_pixel(54, 54).0, [0x33, 0x66, 0xcc, 255]);
        let icon = image::open(res_root.join("mipmap-hdpi/ic_launcher.png")).unwrap();
        assert_eq!((icon.width(), icon.height()), (72, 72));
        // non-matching bucket untouched
        let untouched = image::open(res_root.join("drawable-hdpi/ic_launcher.png")).unwrap().to_rgba8();
        assert_eq!(untouched.get_pixel(2, 2).0, [0, 0, 0, 0]);

        engine
            .generate(Platform::Android, ImageCategory::LauncherIcon, GenerateOptions::new())
            .unwrap();
        let second = image::open(res_root.join("mipmap-mdpi/ic_launcher_foreground.png"))
            .unwrap()
            .to_rgba8();
        assert_eq!(first, second);
    }

    #[test]
    fn ios_icons_lose_their_alpha_channel_on_disk() {
        let sources = build_sources();
        let packaging = tempfile::tempdir().unwrap();
        let catalog = packaging
            .path()
            .join("platforms/ios/Demo/Images.xcassets/AppIcon.appiconset");
        write_placeholder(&catalog.join("icon-60@2x.png"), 120, 120);
        std::fs::write(catalog.join("Contents.json"), "{}").unwrap();

        let config = BuildConfig::new(sources.path(), packaging.path());
        let engine = AppImageEngine::new(&config, definition(), FsTree, ResvgRenderer::new());

        let report = engine
            .generate(
                Platform::Ios,
                ImageCategory::LauncherIcon,
                GenerateOptions::new().remove_alpha_channel(true),
            )
            .unwrap();

        assert_eq!(report.slots.len(), 1);
        let icon = image::open(catalog.join("icon-60@2x.png")).unwrap();
        assert_eq!(icon.color(), image::ColorType::Rgb8);
        assert_eq!((icon.width(), icon.height()), (120, 120));
        assert_eq!(std::fs::read_to_string(catalog.join("Contents.json")).unwrap(), "{}");
    }
}

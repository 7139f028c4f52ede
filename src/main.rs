//! `app-image-creator`
//!
//! Regenerates the icon and splash images of a hybrid app's platform
//! packaging trees from its vector sources.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use app_image_creator::{
    AppDefinition, AppImageEngine, BuildConfig, GenerateOptions, GenerationReport, ImageCategory,
    Platform,
};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "app-image-creator",
    version,
    about = "Generate app icons and splash screens from vector sources"
)]
struct Args {
    /// Build configuration (JSON) with the source and packaging roots.
    #[arg(short, long, value_name = "FILE", default_value = "build_config.json")]
    config: PathBuf,

    /// App definition (JSON) naming the source image of each category.
    #[arg(short, long, value_name = "FILE", default_value = "app.json")]
    definition: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Regenerate one image category.
    Generate {
        #[arg(short, long)]
        platform: Platform,

        #[arg(short = 't', long)]
        category: ImageCategory,

        /// Fit the shorter side and crop instead of stretching.
        #[arg(long)]
        varying_ratios: bool,

        /// Flatten written images onto an opaque background.
        #[arg(long)]
        remove_alpha_channel: bool,
    },

    /// Regenerate every category a platform build needs.
    Plan {
        #[arg(short, long)]
        platform: Platform,
    },

    /// List the slots of a category with their sizes, without writing.
    Slots {
        #[arg(short, long)]
        platform: Platform,

        #[arg(short = 't', long)]
        category: ImageCategory,
    },
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = BuildConfig::load(&args.config)?;
    let definition_json = std::fs::read_to_string(&args.definition)
        .map_err(|e| format!("cannot read {}: {e}", args.definition.display()))?;
    let definition = AppDefinition::from_json(&definition_json)?;

    let engine = AppImageEngine::from_config(&config, definition);

    match args.command {
        Command::Generate {
            platform,
            category,
            varying_ratios,
            remove_alpha_channel,
        } => {
            let options = GenerateOptions::new()
                .varying_ratios(varying_ratios)
                .remove_alpha_channel(remove_alpha_channel);
            print_report(&engine.generate(platform, category, options)?);
        }
        Command::Plan { platform } => {
            for report in engine.generate_plan(platform)? {
                print_report(&report);
            }
        }
        Command::Slots { platform, category } => {
            for slot in engine.slots(platform, category)? {
                println!("{}\t{}", slot.size, slot.path().display());
            }
        }
    }

    Ok(())
}

fn print_report(report: &GenerationReport) {
    println!(
        "{} {}: {} images from {}",
        report.platform,
        report.category,
        report.slots.len(),
        report.source.path.display()
    );
    for slot in &report.slots {
        println!("  {}\t{:?}\t{}", slot.size, slot.strategy, slot.path.display());
    }
}

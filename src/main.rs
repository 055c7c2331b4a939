use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use color_probe::{
    contrast_ratio, extract_palette_with, is_contrasting, round_significant, sample_colors,
    ChannelWeighted, Color, ColorCatalog, ColorDistance, ContrastPolicy, DistanceMetric,
    PixelBuffer, Quality, Region, SampleOptions, NOT_DETECTED,
};
use huecheck::assets::AssetLoader;
use huecheck::config::{AppConfig, GateSetting};
use huecheck::imaging::{crop, Screenshot};
use huecheck::inspect::run_inspection;

#[derive(Parser)]
#[command(name = "huecheck")]
#[command(about = "Color and contrast checks for UI screenshots")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure every element of a manifest on a PNG screenshot
    Inspect {
        /// Screenshot PNG file
        screenshot: PathBuf,

        /// Element manifest (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Write the JSON run here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exit with status 1 when any issue is found
        #[arg(long)]
        fail_on_issues: bool,
    },
    /// Four-slot palette of a PNG (or one frame of it)
    Palette {
        /// PNG file
        image: PathBuf,

        /// Frame to measure as "x,y,width,height"
        #[arg(short, long, value_parser = parse_frame)]
        frame: Option<Region>,

        /// Downscale before counting: lowest, low, high, highest
        #[arg(short, long)]
        quality: Option<Quality>,

        /// Contrast gate: strict, standard, lenient, luma_ratio
        #[arg(short, long)]
        gate: Option<GateSetting>,

        /// Print only the colors actually found
        #[arg(long)]
        summary: bool,
    },
    /// Dominant named colors by random sampling
    Sample {
        /// PNG file
        image: PathBuf,

        /// Frame to measure as "x,y,width,height"
        #[arg(short, long, value_parser = parse_frame)]
        frame: Option<Region>,

        /// Pixels drawn
        #[arg(short, long)]
        draws: Option<usize>,

        /// Names reported
        #[arg(short, long)]
        top: Option<usize>,

        /// RNG seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// WCAG contrast ratio of two colors
    Contrast {
        /// First color as hex (e.g. "#1E90FF")
        first: Color,
        /// Second color as hex
        second: Color,
    },
    /// Nearest named color
    Name {
        /// Color as hex (e.g. "#FF7F50" or "#FF7F5080")
        color: Color,

        /// Use the 12 basic names instead of the web colors
        #[arg(long)]
        basic: bool,
    },
    /// Perceptual distance between two colors
    Distance {
        first: Color,
        second: Color,

        /// weighted, cie94 or ciede2000 (all three when omitted)
        #[arg(short, long)]
        metric: Option<DistanceMetric>,
    },
    /// Extract the embedded huecheck.yaml for customization
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        run_status_command();
        return Ok(());
    };

    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "huecheck=warn,color_probe=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    match command {
        Commands::Inspect {
            screenshot,
            manifest,
            output,
            fail_on_issues,
        } => run_inspect_command(&screenshot, &manifest, output.as_deref(), fail_on_issues),
        Commands::Palette {
            image,
            frame,
            quality,
            gate,
            summary,
        } => run_palette_command(&image, frame, quality, gate, summary),
        Commands::Sample {
            image,
            frame,
            draws,
            top,
            seed,
        } => run_sample_command(&image, frame, draws, top, seed),
        Commands::Contrast { first, second } => {
            run_contrast_command(first, second);
            Ok(())
        }
        Commands::Name { color, basic } => {
            run_name_command(color, basic);
            Ok(())
        }
        Commands::Distance {
            first,
            second,
            metric,
        } => {
            run_distance_command(first, second, metric);
            Ok(())
        }
        Commands::Init { force, list } => run_init_command(force, list),
    }
}

fn parse_frame(s: &str) -> Result<Region, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, width, height] = parts.as_slice() else {
        return Err(format!("expected x,y,width,height, got {s:?}"));
    };
    let num = |v: &str| {
        v.parse::<u32>()
            .map_err(|e| format!("invalid frame value {v:?}: {e}"))
    };
    Ok(Region::new(num(*x)?, num(*y)?, num(*width)?, num(*height)?))
}

fn load_config() -> AppConfig {
    AppConfig::load_from_assets(&AssetLoader::from_env())
}

fn hex_and_name(color: Color) -> String {
    format!("{color} ({})", ColorCatalog::web().name_of(color))
}

/// Run `f` on the whole image or on one frame of it.
fn with_frame<T>(
    image: &Path,
    frame: Option<Region>,
    f: impl FnOnce(&dyn PixelBuffer) -> T,
) -> anyhow::Result<T> {
    let shot = Screenshot::open(image)
        .with_context(|| format!("Failed to load {}", image.display()))?;
    let raster = shot.raster()?;
    let view = crop(&raster, frame.unwrap_or_else(|| Region::of(&raster)))?;
    Ok(f(&view))
}

/// Inspect a screenshot and print or write the JSON run
fn run_inspect_command(
    screenshot: &Path,
    manifest: &Path,
    output: Option<&Path>,
    fail_on_issues: bool,
) -> anyhow::Result<()> {
    let config = load_config();
    let run = run_inspection(screenshot, manifest, &config)
        .with_context(|| format!("Failed to inspect {}", screenshot.display()))?;

    let json = serde_json::to_string_pretty(&run)?;
    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {} ({} elements)", path.display(), run.reports.len());
        }
        None => println!("{json}"),
    }

    for issue in &run.issues {
        eprintln!("{issue}");
    }
    if fail_on_issues && run.has_issues() {
        std::process::exit(1);
    }
    Ok(())
}

fn run_palette_command(
    image: &Path,
    frame: Option<Region>,
    quality: Option<Quality>,
    gate: Option<GateSetting>,
    summary: bool,
) -> anyhow::Result<()> {
    let config = load_config();
    let mut options = config.palette.options();
    if let Some(quality) = quality {
        options = options.with_quality(quality);
    }
    if let Some(gate) = gate {
        options = options.with_gate(gate.into());
    }
    if summary {
        options.distinct = false;
    }

    let palette = with_frame(image, frame, |buffer| extract_palette_with(buffer, &options))?;

    if summary {
        for color in palette.found_colors() {
            println!("{}", hex_and_name(color));
        }
        return Ok(());
    }

    println!("Background: {}", hex_and_name(palette.background));
    let slots = ["Primary:   ", "Secondary: ", "Detail:    "];
    for ((label, color), found) in slots.iter().zip(palette.slots()).zip(palette.found) {
        let note = if found { "" } else { "  (default)" };
        println!("{label} {}{note}", hex_and_name(color));
    }
    println!(
        "Contrast:   {}",
        round_significant(contrast_ratio(palette.background, palette.primary), 3)
    );
    Ok(())
}

fn run_sample_command(
    image: &Path,
    frame: Option<Region>,
    draws: Option<usize>,
    top: Option<usize>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let mut sampling = load_config().sampling;
    if seed.is_some() {
        sampling.seed = seed;
    }
    let defaults = sampling.options();
    let options = SampleOptions {
        draws: draws.unwrap_or(defaults.draws),
        top: top.unwrap_or(defaults.top),
    };
    let rng = sampling.rng();

    let samples: Vec<_> = with_frame(image, frame, |buffer| {
        sample_colors(buffer, ColorCatalog::web(), options, rng).collect()
    })?;

    if samples.is_empty() {
        println!("No samples (region too small or fully transparent)");
        return Ok(());
    }
    for sample in &samples {
        println!(
            "{:>5}/{}  {}  {}",
            sample.count, options.draws, sample.name, sample.color
        );
    }
    if let [first, second, ..] = samples.as_slice() {
        println!(
            "Contrast: {}",
            round_significant(contrast_ratio(first.color, second.color), 3)
        );
    }
    Ok(())
}

fn run_contrast_command(first: Color, second: Color) {
    let ratio = contrast_ratio(first, second);
    let verdict = |pass: bool| if pass { "pass" } else { "fail" };

    println!("{} vs {}", hex_and_name(first), hex_and_name(second));
    println!("Ratio:    {}:1", round_significant(ratio, 3));
    println!("Strict:   {}", verdict(is_contrasting(first, second, true)));
    println!("Standard: {}", verdict(is_contrasting(first, second, false)));
    println!(
        "Lenient:  {}",
        verdict(ContrastPolicy::Lenient.passes(first, second))
    );
}

fn run_name_command(color: Color, basic: bool) {
    if basic {
        let name = ColorCatalog::basic()
            .nearest_by(color, &ChannelWeighted)
            .map(|entry| entry.name.as_str())
            .unwrap_or(NOT_DETECTED);
        println!("{name}");
    } else {
        println!("{}", ColorCatalog::web().name_of(color));
    }
}

fn run_distance_command(first: Color, second: Color, metric: Option<DistanceMetric>) {
    let metrics = match metric {
        Some(metric) => vec![metric],
        None => DistanceMetric::ALL.to_vec(),
    };
    for metric in metrics {
        println!(
            "{metric:<10} {}",
            round_significant(metric.distance(first, second), 4)
        );
    }
}

/// Extract embedded config to filesystem
fn run_init_command(force: bool, list: bool) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        for f in AssetLoader::list_embedded() {
            println!("  {f}");
        }
        return Ok(());
    }

    let report = AssetLoader::from_env().init(force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("CONFIG_FILE").ok();
    let loader = AssetLoader::from_env();

    println!("huecheck v{VERSION}");
    println!("Color and contrast checks for UI screenshots\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG    = {}",
        std::env::var("RUST_LOG").as_deref().unwrap_or("(not set)")
    );

    println!("\nConfig:  {}", loader.config_source());
    println!("Catalog: {} web colors", ColorCatalog::web().len());

    println!("\nCommands:");
    println!("  huecheck inspect    Measure manifest elements on a screenshot");
    println!("  huecheck palette    Four-slot palette of an image");
    println!("  huecheck sample     Dominant named colors by sampling");
    println!("  huecheck contrast   WCAG contrast ratio of two colors");
    println!("  huecheck name       Nearest named color");
    println!("  huecheck distance   Perceptual distance between two colors");
    println!("  huecheck init       Extract the default config");
    println!("\nRun 'huecheck --help' for more details.");
}

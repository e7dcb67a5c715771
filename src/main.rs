mod cli;

use motionphoto::batch::{run_batch, BatchOptions};
use motionphoto::{config, Error, MotionAssembler, MotionOptions};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, CreateArgs};
use std::path::Path;

/// Tags shown by `probe`, Samsung first.
const MOTION_TAGS: &[&str] = &[
    "MotionPhoto",
    "MotionPhotoVersion",
    "MotionPhotoPresentationTimestampUs",
    "EmbeddedVideoType",
    "MicroVideo",
    "MicroVideoVersion",
    "MicroVideoOffset",
    "MicroVideoPresentationTimestampUs",
];

fn main() -> Result<()> {
    let cli = Cli::parse_from(cli::normalize_args(std::env::args_os()));

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "motionphoto=trace,motionphoto_av=trace,motionphoto_sef=trace".to_string()
        } else {
            "motionphoto=info,motionphoto_av=warn,motionphoto_sef=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    match cli.command {
        None => create(&cli.create, config_path),
        Some(Commands::Batch {
            dir,
            output,
            overwrite,
            recursive,
        }) => batch(&dir, output, overwrite, recursive, config_path),
        Some(Commands::Probe { file, json }) => probe_file(&file, json, config_path),
        Some(Commands::CheckTools) => check_tools(config_path),
        Some(Commands::Validate { file }) => validate_config(file.as_deref().or(config_path)),
        Some(Commands::Version) => {
            println!("motionphoto {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn create(args: &CreateArgs, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let image = args.image.as_deref().context("--image is required")?;
    let video = args.video.as_deref().context("--video is required")?;
    let motion = args.motion.as_deref().context("--motion is required")?;

    // Input checks that must fail before the output is seeded.
    if image.exists() {
        if !image.is_file() {
            anyhow::bail!("Input image path is not a file: {:?}", image);
        }
        if !motionphoto_av::is_jpeg(image)? {
            anyhow::bail!("Input image file format must be JPEG: {:?}", image);
        }
    }
    if video.exists() {
        if !video.is_file() {
            anyhow::bail!("Input video path is not a file: {:?}", video);
        }
        let size = std::fs::metadata(video)
            .with_context(|| format!("Failed to read video metadata: {:?}", video))?
            .len();
        motionphoto_sef::check_video_len(size)?;
    }

    let assembler = MotionAssembler::new(config::exiftool(&config.tools));
    let options = MotionOptions::new()
        .timestamp_us(args.timestamp_us)
        .overwrite(args.overwrite);

    match assembler.create(image, video, motion, &options) {
        Ok(photo) => {
            println!("Created motion photo: {}", photo.path.display());
            println!("  Trailer: {} bytes", photo.trailer_len);
            println!("  Video offset: {} bytes from end", photo.negative_video_offset);
            Ok(())
        }
        Err(Error::OutputExists { path }) => {
            eprintln!(
                "Error: Output motion photo file already exists: '{}' (try using --overwrite)",
                path.display()
            );
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

fn batch(
    dir: &Path,
    output: Option<std::path::PathBuf>,
    overwrite: bool,
    recursive: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let options = BatchOptions {
        output_dir: output,
        overwrite: overwrite || config.batch.overwrite,
        recursive: recursive || config.batch.recursive,
    };

    let assembler = MotionAssembler::new(config::exiftool(&config.tools));
    let report = run_batch(&assembler, dir, &options)?;

    println!("Created {} motion photos", report.created.len());
    for photo in &report.created {
        println!("  ✓ {}", photo.path.display());
    }
    for failure in &report.failed {
        println!("  ✗ {}: {}", failure.pair.image.display(), failure.message);
    }
    if !report.unpaired.is_empty() {
        println!("\nUnpaired files: {}", report.unpaired.len());
        for path in &report.unpaired {
            println!("  - {}", path.display());
        }
    }

    if !report.is_success() {
        anyhow::bail!(
            "{} of {} pairs failed",
            report.failed.len(),
            report.failed.len() + report.created.len()
        );
    }

    Ok(())
}

fn probe_file(file: &Path, json: bool, config_path: Option<&Path>) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }

    let config = config::load_config_or_default(config_path)?;
    let tags = config::exiftool(&config.tools).read_tags(file, MOTION_TAGS)?;

    if json {
        let json_str = serde_json::to_string_pretty(&tags)?;
        println!("{}", json_str);
    } else {
        println!("File: {}", file.display());
        for name in MOTION_TAGS {
            match tags.get(*name) {
                Some(value) => println!("  {}: {}", name, value),
                None => println!("  {}: -", name),
            }
        }
    }

    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    println!("Checking external tools...\n");

    let config = config::load_config_or_default(config_path)?;
    let tools = motionphoto_av::check_tools(config.tools.exiftool_path.as_deref());
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install exiftool to write motion photo metadata.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!(
                "  exiftool: {}",
                config
                    .tools
                    .exiftool_path
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "PATH lookup".to_string())
            );
            println!("  Batch recursive: {}", config.batch.recursive);
            println!("  Batch overwrite: {}", config.batch.overwrite);
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Batch recursive: {}", config.batch.recursive);
        }
    }

    Ok(())
}

use clap::{Args, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "motionphoto")]
#[command(author, version, about = "Create Samsung and Google compatible motion photos")]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub create: CreateArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Create a single motion photo (the default when no subcommand is given)
#[derive(Args)]
pub struct CreateArgs {
    /// Input image file path (format must be JPEG)
    #[arg(short, long, required = true)]
    pub image: Option<PathBuf>,

    /// Input video file path
    #[arg(short, long, required = true)]
    pub video: Option<PathBuf>,

    /// Output motion photo file path (name must start with 'MV')
    #[arg(short, long, required = true)]
    pub motion: Option<PathBuf>,

    /// Key-frame time offset in microseconds
    #[arg(long = "timestamp_us", value_parser = clap::value_parser!(i64).range(0..))]
    pub timestamp_us: Option<i64>,

    /// Replace the output file if it exists
    #[arg(long, overrides_with = "no_overwrite")]
    pub overwrite: bool,

    /// Fail if the output file exists (default)
    #[arg(long, overrides_with = "overwrite")]
    pub no_overwrite: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pair images and videos in a directory by name and create motion photos
    Batch {
        /// Directory containing images and videos
        #[arg(required = true)]
        dir: PathBuf,

        /// Directory to write motion photos to (defaults to the input directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace existing motion photos
        #[arg(long)]
        overwrite: bool,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,
    },

    /// Probe a file and display its motion photo tags
    Probe {
        /// File to probe
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        file: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

/// Rewrite the single-dash `-t_us` spelling into `--timestamp_us`.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-t_us") => OsString::from("--timestamp_us"),
            Some(s) if s.starts_with("-t_us=") => {
                OsString::from(format!("--timestamp_us={}", &s["-t_us=".len()..]))
            }
            _ => arg,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(normalize_args(args.iter().map(OsString::from)))
    }

    #[test]
    fn test_create_args() {
        let cli = parse(&[
            "motionphoto", "-i", "a.jpg", "-v", "a.mp4", "-m", "MVa.jpg", "-t_us", "1500",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.create.image, Some(PathBuf::from("a.jpg")));
        assert_eq!(cli.create.video, Some(PathBuf::from("a.mp4")));
        assert_eq!(cli.create.motion, Some(PathBuf::from("MVa.jpg")));
        assert_eq!(cli.create.timestamp_us, Some(1500));
        assert!(!cli.create.overwrite);
    }

    #[test]
    fn test_long_timestamp_and_overwrite_toggle() {
        let cli = parse(&[
            "motionphoto",
            "--image=a.jpg",
            "--video=a.mp4",
            "--motion=MVa.jpg",
            "--timestamp_us=0",
            "--overwrite",
        ])
        .unwrap();
        assert_eq!(cli.create.timestamp_us, Some(0));
        assert!(cli.create.overwrite);

        let cli = parse(&[
            "motionphoto", "-i", "a.jpg", "-v", "a.mp4", "-m", "MVa.jpg", "--overwrite",
            "--no-overwrite",
        ])
        .unwrap();
        assert!(!cli.create.overwrite);
    }

    #[test]
    fn test_negative_timestamp_rejected() {
        let result = parse(&[
            "motionphoto", "-i", "a.jpg", "-v", "a.mp4", "-m", "MVa.jpg", "-t_us=-5",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_required_args() {
        assert!(parse(&["motionphoto", "-i", "a.jpg"]).is_err());
    }

    #[test]
    fn test_subcommand_without_create_args() {
        let cli = parse(&["motionphoto", "batch", "photos", "-r", "-o", "out"]).unwrap();
        match cli.command {
            Some(Commands::Batch {
                dir,
                output,
                overwrite,
                recursive,
            }) => {
                assert_eq!(dir, PathBuf::from("photos"));
                assert_eq!(output, Some(PathBuf::from("out")));
                assert!(!overwrite);
                assert!(recursive);
            }
            _ => panic!("expected batch command"),
        }
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vreg_cli::commands::{dump, inspect, read, reset};
use vreg_cli::{parse_count, parse_literal};

#[derive(Parser)]
#[command(name = "vreg")]
#[command(about = "Offline tool for vreg register images", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether an image is usable and summarise its contents.
    Inspect {
        /// Path to the image file.
        image: PathBuf,
    },
    /// Read one register from an image.
    Read {
        image: PathBuf,

        /// Register address (hex with 0x prefix, or decimal).
        #[arg(long, short, value_parser = parse_literal)]
        addr: u64,

        #[arg(long, short, default_value = "4", value_parser = parse_literal)]
        width: u64,
    },
    /// Print a range of registers.
    Dump {
        image: PathBuf,

        #[arg(long, short, value_parser = parse_literal)]
        start: u64,

        /// Inclusive end address.
        #[arg(long, short, value_parser = parse_literal, conflicts_with = "count")]
        end: Option<u64>,

        /// Number of registers from start.
        #[arg(long, short, value_parser = parse_count)]
        count: Option<i64>,

        #[arg(long, short, default_value = "4", value_parser = parse_literal)]
        width: u64,

        /// Include zero registers.
        #[arg(long)]
        all: bool,
    },
    /// Overwrite an image with zeros.
    Reset {
        image: PathBuf,

        #[arg(long)]
        confirm: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { image } => inspect::run(&image).map(|_| ()),
        Commands::Read { image, addr, width } => read::run(&image, addr, width).map(|_| ()),
        Commands::Dump {
            image,
            start,
            end,
            count,
            width,
            all,
        } => dump::run(&image, start, end, count, width, all).map(|_| ()),
        Commands::Reset { image, confirm } => reset::run(&image, confirm),
    }
}

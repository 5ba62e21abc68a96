use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use presskit_pdf::{PageSize, StackLayout, convert_manifest_to_pdf, paginate};

#[derive(Parser)]
#[command(name = "presskit-pdf", version, about = "Compose press kit pages into a linked PDF")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode the pre-rendered pages listed in a JSON manifest
    Build {
        manifest: PathBuf,
        /// Output file (default: derived from the manifest name, next to it)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override the manifest page size (letter, a4)
        #[arg(long)]
        page_size: Option<PageSize>,
    },
    /// Show how blocks of the given heights would be split into pages
    Plan {
        #[arg(long)]
        page_height: f32,
        #[arg(long, value_delimiter = ',', required = true)]
        heights: Vec<f32>,
        #[arg(long, default_value_t = 0.0)]
        gap: f32,
        #[arg(long, default_value_t = 0.0)]
        padding: f32,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            manifest,
            output,
            page_size,
        } => match convert_manifest_to_pdf(&manifest, output.as_deref(), page_size) {
            Ok(path) => {
                println!("{}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
        Command::Plan {
            page_height,
            heights,
            gap,
            padding,
        } => {
            let layout = StackLayout {
                padding_top: padding,
                padding_bottom: padding,
                gap,
            };
            let pages = paginate(heights.iter().copied().enumerate(), page_height, |candidate| {
                let blocks: Vec<f32> = candidate.iter().map(|(_, h)| *h).collect();
                layout.measure(&blocks)
            });
            for (i, page) in pages.iter().enumerate() {
                let blocks: Vec<String> = page.blocks.iter().map(|(b, _)| (b + 1).to_string()).collect();
                let heights: Vec<f32> = page.blocks.iter().map(|(_, h)| *h).collect();
                println!(
                    "page {}: blocks [{}] height {:.1}",
                    i + 1,
                    blocks.join(", "),
                    layout.measure(&heights)
                );
            }
            ExitCode::SUCCESS
        }
    }
}

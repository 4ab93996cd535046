use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sliderule::{graph, logging, ScaleConfig, SlideRuleScale};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "sliderule")]
#[command(about = "Generate slide rule scales as SVG from CSV scale specs", long_about = None)]
struct Cli {
    /// Directory holding Core.csv, the per-bound mold files and one-offs.csv
    #[arg(long)]
    specs: PathBuf,

    /// Scale expression (e.g. 'c(factor: 0.01)' or 's(invert: true, factor: 10)')
    #[arg(long)]
    scale: Option<ScaleConfig>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw a straight scale
    Straight(DrawArgs),
    /// Draw a full circular scale
    Circular(DrawArgs),
    /// Write the full mark table (CSV for .csv, JSON otherwise)
    Dump {
        #[arg(long, short)]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct DrawArgs {
    /// Single-row draw config CSV
    #[arg(long)]
    config: PathBuf,

    /// SVG file to write
    #[arg(long, short)]
    output: PathBuf,

    /// Also rasterize the drawing to this PNG file
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Preview resolution in pixels per millimetre
    #[arg(long, default_value_t = 4.0)]
    preview_resolution: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let mut scale = SlideRuleScale::from_dir(&cli.specs)
        .with_context(|| format!("Failed to import scale specs from {}", cli.specs.display()))?;

    if let Some(config) = cli.scale {
        scale.set_scale_type(config).context("Failed to set scale")?;
    }

    match cli.command {
        Command::Straight(args) => {
            let drawing = scale.draw_straight(&args.output, &args.config)?;
            write_preview(&drawing, &args)?;
            info!(output = %args.output.display(), "Straight scale written");
        }
        Command::Circular(args) => {
            let drawing = scale.draw_circular(&args.output, &args.config)?;
            write_preview(&drawing, &args)?;
            info!(output = %args.output.display(), "Circular scale written");
        }
        Command::Dump { output } => {
            scale.dump(&output)?;
            info!(output = %output.display(), "Scale spec dumped");
        }
    }

    Ok(())
}

fn write_preview(drawing: &sliderule::Drawing, args: &DrawArgs) -> Result<()> {
    if let Some(path) = &args.preview {
        graph::save_png(drawing, args.preview_resolution, path)?;
        info!(preview = %path.display(), "Preview written");
    }
    Ok(())
}

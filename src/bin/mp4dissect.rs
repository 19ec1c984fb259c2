use anyhow::Context;
use clap::{ArgAction, Parser};
use mp4dissect::{Dissector, Options};
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Dissect the box structure of an MP4/ISOBMFF file")]
struct Args {
    /// MP4/ISOBMFF file path
    path: PathBuf,

    /// Load display options from a JSON file (flags below override it)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Force colored output
    #[arg(short = 'C', long, action = ArgAction::SetTrue, overrides_with = "no_color")]
    color: bool,

    #[arg(long, action = ArgAction::SetTrue, overrides_with = "color")]
    no_color: bool,

    /// Maximum rows shown for tables and hex dumps (0 hides dumps)
    #[arg(short, long, value_name = "N")]
    rows: Option<usize>,

    /// Show box offsets
    #[arg(long, action = ArgAction::SetTrue, overrides_with = "no_offsets")]
    offsets: bool,
    #[arg(long, action = ArgAction::SetTrue, overrides_with = "offsets")]
    no_offsets: bool,

    /// Show box body lengths
    #[arg(long, action = ArgAction::SetTrue, overrides_with = "no_lengths")]
    lengths: bool,
    #[arg(long, action = ArgAction::SetTrue, overrides_with = "lengths")]
    no_lengths: bool,

    /// Show box class names and meanings of values
    #[arg(long, action = ArgAction::SetTrue, overrides_with = "no_descriptions")]
    descriptions: bool,
    #[arg(long, action = ArgAction::SetTrue, overrides_with = "descriptions")]
    no_descriptions: bool,

    /// Show fields that hold their default value
    #[arg(long, action = ArgAction::SetTrue)]
    defaults: bool,

    /// Spaces per nesting level
    #[arg(long, value_name = "N")]
    indent: Option<usize>,

    /// Bytes per hex dump line
    #[arg(long, value_name = "N")]
    bytes_per_line: Option<usize>,
}

/// A `--x` / `--no-x` pair; `None` when neither was given.
fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn build_options(args: &Args) -> anyhow::Result<Options> {
    let mut opts = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            Options::from_json(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => Options {
            colorize: std::io::stdout().is_terminal(),
            ..Options::default()
        },
    };

    if let Some(c) = toggle(args.color, args.no_color) {
        opts.colorize = c;
    }
    if let Some(v) = toggle(args.offsets, args.no_offsets) {
        opts.show_offsets = v;
    }
    if let Some(v) = toggle(args.lengths, args.no_lengths) {
        opts.show_lengths = v;
    }
    if let Some(v) = toggle(args.descriptions, args.no_descriptions) {
        opts.show_descriptions = v;
    }
    if args.defaults {
        opts.show_defaults = true;
    }
    if let Some(n) = args.rows {
        opts.max_rows = n;
    }
    if let Some(n) = args.indent {
        opts.indent = n;
    }
    if let Some(n) = args.bytes_per_line {
        opts.bytes_per_line = n;
    }
    Ok(opts)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let opts = build_options(&args)?;
    log::debug!("options: {opts:?}");
    let dissector = Dissector::new(opts).context("invalid descriptor tables")?;

    let data = std::fs::read(&args.path).with_context(|| format!("opening {}", args.path.display()))?;
    dissector.dissect(&data)?;
    Ok(())
}

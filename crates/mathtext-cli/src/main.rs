use std::{
    io::Read,
    path::{Path, PathBuf},
};

use clap::{Parser, ValueEnum};

use mathtext::renderer::font::ApproxMetrics;
use mathtext::renderer::metrics::BoxMetrics;
use mathtext::renderer::svg::SvgCanvas;
use mathtext::MathText;

mod config_file;

use config_file::{Config, load_config_file};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Html,
    Svg,
    /// Width and heights of the formula box, one per line
    Metrics,
}

/// Renders LaTeX-like formula markup
#[derive(Parser, Debug)]
#[command(version, about = "Renders LaTeX-like formula markup", long_about = None)]
struct Args {
    /// File containing the formula; "-" or nothing reads standard input
    #[arg(conflicts_with = "formula", value_name = "FILE")]
    file: Option<PathBuf>,

    /// Specifies the formula on the command line
    #[arg(short, long)]
    formula: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Start in math mode, as if the input were wrapped in `$...$`
    #[arg(short, long)]
    math: bool,

    /// Overrides the font size of the configuration
    #[arg(long, value_name = "SIZE")]
    font_size: Option<f64>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Outline the box of every node in SVG output
    #[arg(long)]
    debug_boxes: bool,

    /// Exit with status 2 if the formula has any error or warning
    #[arg(long)]
    strict: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => load_config_file(path).unwrap_or_else(|e| {
            eprintln!("Error loading config file '{}': {}", path.display(), e);
            std::process::exit(1);
        }),
        None => Config::default(),
    };
    if args.math {
        config.mathtext.initial_math_mode = true;
    }
    if let Some(size) = args.font_size {
        config.mathtext.font_size = size;
    }

    let (source, source_name) = match (&args.formula, &args.file) {
        (Some(formula), _) => (formula.clone(), "<formula>".to_string()),
        (None, Some(path)) if path != Path::new("-") => (
            std::fs::read_to_string(path).unwrap_or_else(|e| exit_io_error(e)),
            path.display().to_string(),
        ),
        _ => (read_stdin(), "<stdin>".to_string()),
    };
    // A trailing newline from a file or pipe is not part of the formula.
    let source = source.strip_suffix('\n').unwrap_or(&source);

    let mut formula = MathText::new(config.mathtext);
    formula.set_debug_boxes(args.debug_boxes);
    formula.parse(source);
    for error in formula.errors() {
        let report = error.to_report(&source_name, true);
        let _ = report.eprint((source_name.as_str(), ariadne::Source::from(source)));
    }

    let metrics = ApproxMetrics::default();
    match args.format {
        Format::Html => {
            let (html, faithful) = formula.to_html();
            if !faithful {
                log::info!("parts of the formula could only be approximated in HTML");
            }
            println!("{html}");
        }
        Format::Svg => {
            let size = formula.measure(&metrics);
            let mut canvas = SvgCanvas::new();
            formula.draw(&mut canvas, &metrics, 0.0, size.baseline_height);
            println!(
                "{}",
                canvas.finish(size.width, size.overall_height, config.background)
            );
        }
        Format::Metrics => print_metrics(&formula.measure(&metrics)),
    }

    if args.strict && !formula.errors().is_empty() {
        std::process::exit(2);
    }
}

fn print_metrics(size: &BoxMetrics) {
    println!("width: {:.3}", size.width);
    println!("baseline-height: {:.3}", size.baseline_height);
    println!("overall-height: {:.3}", size.overall_height);
    println!("strikeout-pos: {:.3}", size.strikeout_pos);
}

fn read_stdin() -> String {
    let mut buffer = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
        exit_io_error(e);
    }
    buffer
}

fn exit_io_error(e: std::io::Error) -> ! {
    eprintln!("IO Error: {e}");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_args() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_flags() {
        let args = Args::try_parse_from([
            "mathtext",
            "--format",
            "svg",
            "--math",
            "--font-size",
            "12",
            "-f",
            r"\frac{a}{b}",
        ])
        .unwrap();
        assert_eq!(args.format, Format::Svg);
        assert!(args.math);
        assert_eq!(args.font_size, Some(12.0));
        assert_eq!(args.formula.as_deref(), Some(r"\frac{a}{b}"));
        assert!(!args.strict);
    }

    #[test]
    fn formula_conflicts_with_file() {
        let result = Args::try_parse_from(["mathtext", "-f", "x", "input.txt"]);
        assert!(result.is_err());
    }
}

use std::path::PathBuf;

use clap::Parser;
use design_lens::{render_markdown, AppError, Configuration, OutputFormat, ScreenshotAnalyzer};
use tracing::{error, Level};

/// Structural analysis of website and app screenshots.
#[derive(Parser, Debug)]
#[command(name = "design-lens")]
#[command(version, about = "Extract layout, colors, typography and components from a screenshot")]
struct Args {
    /// Screenshot to analyze (PNG, JPEG, ...)
    image: PathBuf,

    /// TOML file with analysis thresholds and output options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (overrides the configuration file)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Skip text recognition
    #[arg(long)]
    no_ocr: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<(), AppError> {
    let mut configuration = Configuration::load(args.config.as_deref())?;
    if args.no_ocr {
        configuration.analysis = configuration.analysis.without_ocr();
    }
    if let Some(format) = args.format {
        configuration.output.format = format;
    }
    let pretty = args.pretty || configuration.output.pretty;

    let bytes = tokio::fs::read(&args.image).await?;
    let filename = args
        .image
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.image.display().to_string());

    let analyzer = ScreenshotAnalyzer::new(configuration.analysis)?;
    let result = analyzer.analyze(&bytes, &filename).await?;

    let rendered = match configuration.output.format {
        OutputFormat::Json if pretty => serde_json::to_string_pretty(&result)?,
        OutputFormat::Json => serde_json::to_string(&result)?,
        OutputFormat::Markdown => render_markdown(&result),
    };
    println!("{rendered}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args).await {
        error!("Analysis failed: {}", e);
        return Err(e);
    }
    Ok(())
}

//! CLI tool that converts slide images into an editable PPTX.

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use slidesnap_input::collect_images;
use slidesnap_pptx::{compose_slide, Presentation};
use slidesnap_vision::{GeminiClient, LayoutAnalyzer, DEFAULT_MODEL, KNOWN_MODELS};
use std::path::PathBuf;

/// Rebuild slide screenshots, images, and PDF pages as an editable .pptx.
#[derive(Parser, Debug)]
#[command(name = "slidesnap")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input image or PDF file(s), converted in order
    input: Vec<PathBuf>,

    /// Start from the image currently on the clipboard
    #[arg(long)]
    clipboard: bool,

    /// Output .pptx path
    #[arg(short, long, default_value = "presentation.pptx")]
    output: PathBuf,

    /// Gemini API key (defaults to the GEMINI_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,

    /// Vision model to use for layout analysis
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Rasterization resolution for PDF pages
    #[arg(long, default_value = "144")]
    dpi: u32,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let api_key = args
        .api_key
        .clone()
        .or_else(|| std::env::var("GEMINI_API_KEY").ok())
        .context("no API key: pass --api-key or set GEMINI_API_KEY")?;

    if args.input.is_empty() && !args.clipboard {
        bail!("no input: pass image/PDF files or --clipboard");
    }

    let pages = collect_images(args.clipboard, &args.input, args.dpi)?;
    if pages.is_empty() {
        bail!("none of the given inputs produced a usable image");
    }

    if args.verbose {
        eprintln!("Collected {} page(s)", pages.len());
    }

    if !KNOWN_MODELS.contains(&args.model.as_str()) {
        log::warn!(
            "model {} is untested; known-good models: {}",
            args.model,
            KNOWN_MODELS.join(", ")
        );
    }

    let analyzer = GeminiClient::new(api_key, args.model.clone())?;
    let mut prs = Presentation::new();

    let bar = ProgressBar::new(pages.len() as u64);
    bar.set_style(ProgressStyle::with_template("[{bar:30}] {pos}/{len} {msg}").unwrap());

    for (index, page) in pages.iter().enumerate() {
        bar.set_message(format!("slide {}/{}", index + 1, pages.len()));

        // A page the model cannot analyze still gets a slide, just a
        // blank one, so page numbering stays aligned with the input.
        let regions = match page.png_bytes() {
            Ok(png) => match analyzer.analyze(&png).await {
                Ok(regions) => regions,
                Err(e) => {
                    log::warn!("layout analysis failed for {}: {}", page.origin, e);
                    Vec::new()
                }
            },
            Err(e) => {
                log::warn!("could not encode {}: {}", page.origin, e);
                Vec::new()
            }
        };

        if args.verbose {
            eprintln!("  {}: {} region(s)", page.origin, regions.len());
        }

        compose_slide(&mut prs, &page.image, &regions);
        bar.inc(1);
    }
    bar.finish_and_clear();

    slidesnap_pptx::save(&prs, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    eprintln!(
        "Wrote {} slide(s) to {}",
        prs.slide_count(),
        args.output.display()
    );

    Ok(())
}

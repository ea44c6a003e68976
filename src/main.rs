use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use snapdeck::{
    export, CodeRenderer, Error, FontSize, Result, SegmentOptions, Studio, StudioConfig,
    StyleConfig, Template,
};

#[derive(Parser)]
#[command(name = "snapdeck", version, about = "Render text into square share images")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a source file as an editor-style code image
    Code {
        /// Source file to render
        input: PathBuf,
        /// Output PNG path
        #[arg(short, long, default_value = "code-image.png")]
        output: PathBuf,
    },
    /// Segment a text file into carousel slides
    Carousel {
        /// Text file to segment
        input: PathBuf,
        /// Output directory for slide PNGs and the manifest
        #[arg(short, long, default_value = "carousel")]
        output: PathBuf,
        #[arg(long, value_enum, default_value = "professional")]
        template: Template,
        #[arg(long, value_enum, default_value = "medium")]
        font_size: FontSize,
        /// Word budget per slide
        #[arg(long, default_value_t = 30)]
        max_words: usize,
        /// Also write slides.zip next to the PNGs
        #[arg(long)]
        zip: bool,
    },
}

fn render_code(input: &PathBuf, output: &PathBuf) -> Result<()> {
    let code = fs::read_to_string(input)?;
    if code.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{} is empty", input.display())));
    }
    let image = CodeRenderer::new().render(&code)?;
    fs::write(output, &image.png_data)?;
    log::info!("wrote {}", output.display());
    Ok(())
}

async fn render_carousel(
    input: &PathBuf,
    output: &PathBuf,
    style: StyleConfig,
    max_words: usize,
    zip: bool,
) -> Result<()> {
    let text = fs::read_to_string(input)?;

    let mut config = StudioConfig::carousel();
    config.style = style;
    config.segment = SegmentOptions::with_max_words(max_words);
    let stem = config.export_stem.clone();

    let studio = Studio::new(config).await?;
    let count = studio.set_input(&text).await?;
    let snapshot = studio.snapshot().await?;

    fs::create_dir_all(output)?;
    for chunk in &snapshot.chunks {
        let filename = export::entry_name(&stem, chunk.order);
        if !chunk.has_image {
            log::warn!("skipping {filename}: no rendered image");
            continue;
        }
        studio.jump(chunk.order - 1).await?;
        let exported = studio.export_current().await?;
        fs::write(output.join(&exported.filename), &exported.png_data)?;
    }

    let manifest = serde_json::to_vec_pretty(&snapshot)
        .map_err(|e| Error::Other(format!("manifest serialization failed: {e}")))?;
    fs::write(output.join("manifest.json"), manifest)?;

    if zip {
        let archive = studio.export_all().await?;
        fs::write(output.join("slides.zip"), archive)?;
    }

    studio.close().await?;
    log::info!("wrote {count} slide(s) to {}", output.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Code { input, output } => render_code(&input, &output),
        Command::Carousel {
            input,
            output,
            template,
            font_size,
            max_words,
            zip,
        } => {
            let style = StyleConfig {
                template,
                font_size,
            };
            render_carousel(&input, &output, style, max_words, zip).await
        }
    }
}

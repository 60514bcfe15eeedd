//! `mediaembed` CLI - classify media URLs and render embed markup

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use mediaembed::config::config_path;
use mediaembed::{
    classify, extract, load_settings, EmbedPipeline, MediaReference, RenderOptions, Settings,
    SourceType,
};

#[derive(Parser)]
#[command(name = "mediaembed")]
#[command(about = "Resolve media URLs into embeddable player markup")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Markup only
    Html,
    /// Descriptor as JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the source type a URL classifies as
    Classify {
        /// URL to classify
        url: String,
    },

    /// Print the canonical identifier for a URL
    Extract {
        /// URL to extract from
        url: String,

        /// Treat the URL as this source instead of classifying it
        #[arg(short, long)]
        source: Option<SourceType>,
    },

    /// Render embed markup for a URL
    Render {
        /// URL to render
        url: String,

        #[command(flatten)]
        overrides: RenderArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: OutputFormat,
    },

    /// Show the config file path and effective settings
    Config,
}

/// Per-call overrides on top of the `[render]` config table.
#[derive(clap::Args)]
struct RenderArgs {
    /// Render as this source instead of classifying the URL
    #[arg(short, long)]
    source: Option<SourceType>,

    /// Container width (CSS)
    #[arg(long)]
    width: Option<String>,

    /// Container height (CSS)
    #[arg(long)]
    height: Option<String>,

    /// Start playback automatically (muted where required)
    #[arg(long)]
    autoplay: bool,

    /// Omit the custom controls block
    #[arg(long)]
    no_controls: bool,

    /// Extra CSS class for the container
    #[arg(long = "class")]
    css_class: Option<String>,

    /// Accent color, e.g. "#ff5500"
    #[arg(long)]
    primary_color: Option<String>,

    #[arg(long)]
    secondary_color: Option<String>,

    /// Poster / artwork image URL
    #[arg(long)]
    featured_image: Option<String>,

    #[arg(long)]
    title: Option<String>,

    /// Raw embed code to sanitize and use instead of the URL
    #[arg(long)]
    custom_embed: Option<String>,
}

impl RenderArgs {
    fn apply(self, mut options: RenderOptions) -> RenderOptions {
        if self.source.is_some() {
            options.source_override = self.source;
        }
        if let Some(width) = self.width {
            options.width = width;
        }
        if self.height.is_some() {
            options.height = self.height;
        }
        if self.autoplay {
            options.autoplay = true;
        }
        if self.no_controls {
            options.show_controls = false;
        }
        if let Some(class) = self.css_class {
            options.css_class = class;
        }
        if let Some(color) = self.primary_color {
            options.primary_color = color;
        }
        if let Some(color) = self.secondary_color {
            options.secondary_color = color;
        }
        if self.featured_image.is_some() {
            options.featured_image_url = self.featured_image;
        }
        if self.title.is_some() {
            options.title = self.title;
        }
        if self.custom_embed.is_some() {
            options.custom_embed_code = self.custom_embed;
        }
        options
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so rendered markup on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Classify { url } => {
            println!("{}", classify(&url));
        }
        Commands::Extract { url, source } => {
            cmd_extract(&url, source)?;
        }
        Commands::Render {
            url,
            overrides,
            format,
        } => {
            let settings = load_settings()?;
            cmd_render(&url, overrides, format, &settings).await?;
        }
        Commands::Config => {
            cmd_config()?;
        }
    }

    Ok(())
}

fn cmd_extract(url: &str, source: Option<SourceType>) -> Result<()> {
    let reference = MediaReference::resolve(url, source);
    match extract(&reference.url, reference.resolved_source) {
        Some(identifier) => {
            println!("{identifier}");
            Ok(())
        }
        None => anyhow::bail!(
            "no identifier for {} source: {url}",
            reference.resolved_source
        ),
    }
}

async fn cmd_render(
    url: &str,
    overrides: RenderArgs,
    format: OutputFormat,
    settings: &Settings,
) -> Result<()> {
    let options = overrides.apply(settings.render.clone());
    let pipeline = EmbedPipeline::new(settings).context("failed to build HTTP client")?;
    let descriptor = pipeline.render(url, &options).await;

    match format {
        OutputFormat::Html => println!("{}", descriptor.markup),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&descriptor)?),
    }

    Ok(())
}

fn cmd_config() -> Result<()> {
    let path = config_path();
    let settings = load_settings()?;
    let status = if path.exists() { "" } else { " (not found, using defaults)" };

    println!("# {}{status}", path.display());
    println!("{}", toml::to_string_pretty(&settings)?);
    Ok(())
}

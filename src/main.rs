//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::commands::list::ListOptions;
use folio::commands::show::ShowFormat;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Content pipeline for a Markdown portfolio blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List site content
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, tag, slug)
        #[arg(default_value = "post")]
        r#type: String,

        /// Only posts carrying this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// At most this many posts
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single post
    Show {
        slug: String,

        /// Render the body to HTML
        #[arg(long, conflicts_with = "json")]
        html: bool,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a post's heading outline
    Toc {
        slug: String,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate sitemap.xml
    Sitemap {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Watch the content directory and reprint the listing on change
    #[command(alias = "w")]
    Watch,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List {
            r#type,
            tag,
            limit,
            json,
        } => {
            let folio = folio::Folio::new(&base_dir)?;
            let options = ListOptions { tag, limit, json };
            folio::commands::list::run(&folio, &r#type, &options)?;
        }

        Commands::Show { slug, html, json } => {
            let folio = folio::Folio::new(&base_dir)?;
            let format = if json {
                ShowFormat::Json
            } else if html {
                ShowFormat::Html
            } else {
                ShowFormat::Text
            };
            folio::commands::show::run(&folio, &slug, format)?;
        }

        Commands::Toc { slug, json } => {
            let folio = folio::Folio::new(&base_dir)?;
            folio::commands::toc::run(&folio, &slug, json)?;
        }

        Commands::Sitemap { output } => {
            let folio = folio::Folio::new(&base_dir)?;
            tracing::info!("Generating sitemap...");
            folio::commands::sitemap::run(&folio, output.as_deref())?;
        }

        Commands::Watch => {
            let folio = folio::Folio::new(&base_dir)?;
            folio::commands::watch::run(&folio)?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

//! Swwim content kernel CLI.
//!
//! Renders CMS documents to HTML and inspects signup form resolution.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use swwim_kernel::config::Config;
use swwim_kernel::page::{PageComposer, PageDocument, PageKind, ResolvedSignup};
use swwim_kernel::signup::resolve;
use swwim_kernel::theme::ThemeEngine;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a CMS document to a full HTML page.
    Render {
        /// Page kind: home, news, news-index, event or case-study.
        #[arg(long)]
        kind: PageKind,

        /// JSON file holding the fetched document.
        #[arg(long)]
        document: PathBuf,

        /// Request path, used for the canonical URL.
        #[arg(long, default_value = "/")]
        path: String,

        /// Write the page here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the signup form that applies to a page.
    Signup {
        /// JSON file holding the fetched document.
        #[arg(long)]
        document: PathBuf,

        /// Page type, e.g. home, news, events.
        #[arg(long)]
        page_type: String,

        /// Document id of the page.
        #[arg(long)]
        page_id: String,
    },
}

#[derive(Serialize)]
struct SignupReport<'a> {
    page_type: &'a str,
    page_id: &'a str,
    #[serde(flatten)]
    form: ResolvedSignup,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();
    let config = Config::from_env().context("failed to load configuration")?;
    info!(site_url = %config.site_url, "configuration loaded");

    match args.command {
        Command::Render {
            kind,
            document,
            path,
            output,
        } => {
            let doc = read_document(&document)?;
            let page = PageComposer::from_config(&config)
                .compose(kind, &doc, &path)
                .with_context(|| format!("failed to compose {kind} page"))?;
            let engine = ThemeEngine::from_config(&config)?;
            let html = engine.render_page(&page)?;

            match output {
                Some(out) => {
                    fs::write(&out, html)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                    info!(kind = %kind, output = %out.display(), "page written");
                }
                None => println!("{html}"),
            }
        }
        Command::Signup {
            document,
            page_type,
            page_id,
        } => {
            let doc = read_document(&document)?;
            let form = resolve(&doc.signup_forms, &page_type, &page_id);
            let report = SignupReport {
                page_type: &page_type,
                page_id: &page_id,
                form: ResolvedSignup::from_form(form),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("failed to serialize signup")?
            );
        }
    }

    Ok(())
}

fn read_document(path: &Path) -> Result<PageDocument> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read document {}", path.display()))?;
    PageDocument::from_json(&json).with_context(|| format!("failed to parse {}", path.display()))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

//! # quill
//!
//! Command-line entry point: loads `.env` and settings, initializes logging,
//! wires the inference client, prompt store, vault and `yt-dlp`, then runs
//! one subcommand.

#![deny(unsafe_code)]

mod commands;
mod wiring;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use quill_core::logging::{LogFormat, init_subscriber};
use quill_settings::QuillSettings;

/// Prompt-templated article generation and markdown note writing.
#[derive(Parser, Debug)]
#[command(name = "quill", version, about)]
struct Cli {
    /// Settings file (defaults to `~/.quill/settings.json`).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Log filter directive; overrides settings. `RUST_LOG` still wins.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit JSON log lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available prompt templates.
    Prompts,
    /// Generate a multi-section article from topic blocks.
    Article(ArticleArgs),
    /// Write a note into the vault.
    Note(NoteArgs),
    /// Summarize a video into a vault note.
    VideoNote(VideoNoteArgs),
    /// Print video metadata as JSON.
    VideoInfo {
        /// Video page URL.
        url: String,
    },
}

#[derive(Args, Debug)]
struct ArticleArgs {
    /// Topic for one section, in order. Repeatable.
    #[arg(long = "block", value_name = "TOPIC")]
    blocks: Vec<String>,

    /// File with one topic per line. Appended after `--block` topics.
    #[arg(long, value_name = "PATH")]
    blocks_file: Option<PathBuf>,

    /// Write the article here instead of stdout.
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,

    /// After generating, regenerate the section at this index.
    #[arg(long, value_name = "INDEX", requires = "rules")]
    modify: Option<usize>,

    /// Rules applied when regenerating a section.
    #[arg(long, requires = "modify")]
    rules: Option<String>,

    /// Template used for the regenerated section.
    #[arg(long, value_name = "ID", requires = "modify")]
    template: Option<String>,

    /// Role preamble; overrides settings.
    #[arg(long)]
    personality: Option<String>,
}

#[derive(Args, Debug)]
struct NoteArgs {
    /// Note title, also the file name.
    #[arg(long)]
    title: String,

    /// Page to cross-reference. Repeatable.
    #[arg(long = "page", value_name = "NAME")]
    pages: Vec<String>,

    /// Tag for the card. Repeatable.
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Resource link.
    #[arg(long)]
    link: Option<String>,

    /// Card image URL.
    #[arg(long)]
    image: Option<String>,

    /// Existing note text to extend.
    #[arg(long, conflicts_with = "extend_file")]
    extend: Option<String>,

    /// File holding the note text to extend.
    #[arg(long, value_name = "PATH")]
    extend_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct VideoNoteArgs {
    /// Video page URL.
    url: String,

    /// Page to cross-reference. Repeatable.
    #[arg(long = "page", value_name = "NAME")]
    pages: Vec<String>,
}

/// Settings from `explicit`, or from the default location when `None`.
fn load_settings(explicit: Option<&Path>) -> Result<QuillSettings> {
    match explicit {
        Some(path) => quill_settings::load_settings_from_path(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => quill_settings::load_settings().with_context(|| {
            format!(
                "failed to load settings from {}",
                quill_settings::settings_path().display()
            )
        }),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut settings = load_settings(cli.settings.as_deref())?;
    if let Some(level) = &cli.log_level {
        settings.logging.level.clone_from(level);
    }
    if cli.json_logs {
        settings.logging.json = true;
    }

    let format = if settings.logging.json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    init_subscriber(&settings.logging.level, format);
    tracing::debug!(model = %settings.inference.model, "settings loaded");

    match cli.command {
        Command::Prompts => commands::prompts(&settings),
        Command::Article(args) => commands::article(&settings, args).await,
        Command::Note(args) => commands::note(&settings, args).await,
        Command::VideoNote(args) => commands::video_note(&settings, args).await,
        Command::VideoInfo { url } => commands::video_info(&settings, &url).await,
    }
}

//! CLI definitions for SIWOTI.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use siwoti_protocols::Tone;

/// SIWOTI CLI.
#[derive(Parser)]
#[command(name = "siwoti")]
#[command(about = "Find comments worth answering and suggest replies")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Scan a saved HTML page and list the comments found
    Scan {
        /// Path to the HTML file
        html: PathBuf,

        /// URL the page was saved from
        #[arg(long)]
        url: String,
    },

    /// Scan a saved HTML page and generate a reply for one comment
    Reply {
        /// Path to the HTML file
        html: PathBuf,

        /// URL the page was saved from
        #[arg(long)]
        url: String,

        /// Comment index as listed by `scan` (default: the worst one)
        #[arg(long)]
        index: Option<usize>,

        /// Reply tone (funny, sarcastic, mild)
        #[arg(long, value_parser = parse_tone)]
        tone: Option<Tone>,
    },

    /// Generate a reply for arbitrary text
    Suggest {
        /// Text to reply to
        text: String,

        /// Reply tone (default: the stored tone)
        #[arg(long, value_parser = parse_tone)]
        tone: Option<Tone>,

        /// Page URL, used for site-specific article context
        #[arg(long)]
        url: Option<String>,

        /// Saved HTML of the page at `--url`
        #[arg(long, requires = "url")]
        html: Option<PathBuf>,
    },

    /// Show or change persisted settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Inspect the site configuration
    Sites {
        #[command(subcommand)]
        action: SitesAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum SettingsAction {
    /// Print the current settings
    Show,

    /// Set the API key (empty to clear)
    SetKey { api_key: String },

    /// Set the API base URL (empty for the OpenAI default)
    SetBase { api_base: String },

    /// Set the model (empty to pick by backend)
    SetModel { model: String },

    /// Set the default tone
    SetTone {
        #[arg(value_parser = parse_tone)]
        tone: Tone,
    },

    /// Stop scanning a site
    DisableSite { hostname: String },

    /// Resume scanning a site
    EnableSite { hostname: String },
}

#[derive(Subcommand)]
pub(crate) enum SitesAction {
    /// Print the descriptor a hostname resolves to
    Resolve { hostname: String },

    /// List every configured pattern
    List,
}

fn parse_tone(value: &str) -> Result<Tone, String> {
    value.parse()
}

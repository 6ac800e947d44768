use crate::filter::Subset;
use crate::resource::Category;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// contenthub – browse your content resources from the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to $CONTENTHUB_CONFIG or ~/.config/contenthub/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// JSON file with the resource collection instead of the built-in sample library
    #[arg(long, value_name = "PATH")]
    pub resources: Option<PathBuf>,

    /// Print the filtered library and exit without starting the TUI.
    #[arg(long)]
    pub headless: bool,

    /// Subset to show: all, recent, favorites or shared.
    #[arg(long, value_name = "SUBSET", default_value = "all")]
    pub subset: Subset,

    /// Case-insensitive text the resource name must contain.
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub search: String,

    /// Comma-separated resource types to include (document, image, video, other).
    /// Defaults to every type.
    #[arg(long, value_delimiter = ',', value_name = "TYPES")]
    pub types: Vec<Category>,

    /// Output format for --headless.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write logs to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

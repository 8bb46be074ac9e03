use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::state::ThemePreference;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Optional command to run instead of the terminal UI
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to open first, e.g. /ai-assistant
    #[arg(long, global = true)]
    pub route: Option<String>,

    /// Colour theme
    #[arg(long, global = true, value_enum)]
    pub theme: Option<ThemePreference>,

    /// Multiplier applied to every simulated delay (0 disables them)
    #[arg(long, global = true)]
    pub delay_scale: Option<f64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask the assistant a one-off question
    Ask {
        /// The question to send
        #[arg(required = true)]
        message: Vec<String>,

        /// Unit id to scope the question to
        #[arg(short, long)]
        unit: Option<String>,

        /// Topic inside the unit
        #[arg(short, long, requires = "unit")]
        topic: Option<String>,
    },

    /// List syllabus units and their topics
    Units {
        /// Only show this unit
        #[arg(long)]
        unit: Option<String>,
    },

    /// Print the effective configuration
    Config,
}

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mixtape")]
#[command(about = "Console harness for the mixtape playlist bot", long_about = None)]
#[command(version = version_string())]
pub struct Cli {
    /// Path to a JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path of the JSON data file (overrides the config)
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// User id the console session is attributed to
    #[arg(long, default_value = "console")]
    pub user: String,

    /// Conversation id of the console session
    #[arg(long, default_value_t = 1)]
    pub chat: i64,

    /// Fail operations when the data file cannot be written
    #[arg(long)]
    pub strict: bool,
}

fn version_string() -> String {
    let hash = env!("GIT_HASH");
    if env!("IS_RELEASE") == "true" || hash.is_empty() {
        env!("CARGO_PKG_VERSION").to_string()
    } else {
        format!("{} ({})", env!("CARGO_PKG_VERSION"), hash)
    }
}

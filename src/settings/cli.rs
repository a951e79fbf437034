use super::Parser;

#[derive(Parser, Debug)]
#[command(about = "Interactive shell over a single-session friend network")]
pub struct Cli {
    /// Settings file; defaults to settings/dev.toml (settings/release.toml in release builds).
    #[arg(long)]
    pub settings: Option<String>,
    /// Read commands from this file instead of stdin.
    #[arg(long)]
    pub script: Option<String>,
}

use clap::Parser;

/// Outpost — a terminal adventure narrated by a completion service.
#[derive(Parser, Debug)]
#[command(name = "outpost", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Transcript log path override.
    #[arg(long)]
    pub transcript: Option<std::path::PathBuf>,

    /// JSON key file override (field "groq").
    #[arg(long)]
    pub key_file: Option<std::path::PathBuf>,
}

pub fn parse() -> Args {
    Args::parse()
}

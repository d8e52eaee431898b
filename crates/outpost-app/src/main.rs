mod cli;
mod persona;
mod transcript;
mod ui;
mod worker;

use tracing_subscriber::EnvFilter;

use outpost_ai::{GroqClient, GroqConfig};
use transcript::Transcript;
use ui::ChatUi;

/// Restore the terminal before the default panic output so the report is
/// readable outside the alternate screen.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        eprintln!("\n--- Outpost crashed ---");
        eprintln!("Please report this issue at: https://github.com/dylan/outpost/issues");
        eprintln!("-----------------------\n");
        default_hook(info);
    }));
}

/// Load environment variables from a .env file (KEY=VALUE lines).
fn load_dotenv() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let candidates = [
        // Workspace root — two levels up from crates/outpost-app/
        manifest_dir.join("..").join("..").join(".env"),
        // Current directory
        std::path::PathBuf::from(".env"),
    ];

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
            return;
        }
    }
}

/// Log to a file under the local data dir; stderr would fight the TUI.
fn init_logging(directive: &str) {
    let filter = EnvFilter::from_default_env().add_directive(
        directive
            .parse()
            .unwrap_or_else(|_| "outpost=info".parse().unwrap()),
    );

    match open_log_file() {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}

fn open_log_file() -> Option<std::fs::File> {
    let dir = dirs::data_local_dir()?.join("outpost");
    std::fs::create_dir_all(&dir).ok()?;
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("outpost.log"))
        .ok()
}

#[tokio::main]
async fn main() {
    load_dotenv();

    let args = cli::parse();

    // Config first so its logging level can seed the filter; CLI wins.
    let config = match args.config.as_deref() {
        Some(path) => outpost_config::load_from_path(std::path::Path::new(path)),
        None => outpost_config::load_config(),
    }
    .unwrap_or_else(|e| {
        eprintln!("Config load failed, using defaults: {e}");
        outpost_config::OutpostConfig::default()
    });

    let directive = match args.log_level.as_deref() {
        Some(level) => format!("outpost={level}"),
        None => format!("outpost={}", config.logging.level),
    };
    init_logging(&directive);

    install_panic_hook();

    tracing::info!("Outpost v{} starting...", env!("CARGO_PKG_VERSION"));
    tracing::info!("Config loaded (model: {})", config.model.id);

    // Credential resolution: --key-file, then [keys].file, then env/default.
    let key_file = args.key_file.as_ref().or(config.keys.file.as_ref());
    let groq_config = match key_file {
        Some(path) => GroqConfig::from_key_file(path),
        None => GroqConfig::from_env(),
    };

    let client = match groq_config {
        Ok(groq) => Some(GroqClient::new(
            groq.with_model(config.model.id.clone())
                .with_max_tokens(config.model.max_tokens)
                .with_temperature(config.model.temperature)
                .with_top_p(config.model.top_p),
        )),
        Err(e) => {
            // The rest of the client still runs; submissions will surface
            // the failure instead of making calls.
            tracing::error!("completion service unavailable: {e}");
            eprintln!("Warning: {e}");
            None
        }
    };

    let transcript_path = args
        .transcript
        .unwrap_or_else(|| config.transcript.path.clone());
    let transcript = Transcript::new(transcript_path, config.transcript.enabled);

    let worker = worker::spawn(client, persona::SYSTEM_PROMPT, config.model.stream);

    if let Err(e) = ChatUi::new(worker, transcript).run().await {
        tracing::error!("UI error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}

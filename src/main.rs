use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dashdeck", version, about = "dashdeck: terminal admin dashboard")]
struct Cli {
    /// Write debug logs to /tmp/dashdeck-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Preference file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    prefs: Option<PathBuf>,

    /// Forget the stored theme, tab and settings before starting.
    #[arg(long)]
    reset_prefs: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/dashdeck-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("dashdeck debug log started, tail -f /tmp/dashdeck-debug.log");
    }

    dashdeck_tui::run(dashdeck_tui::RunOptions {
        prefs_path: cli.prefs,
        reset_prefs: cli.reset_prefs,
    })
}

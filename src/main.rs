use std::error::Error;
use std::sync::Arc;

use quotebook::session::share::StdoutShare;
use quotebook::session::QuoteSession;
use quotebook::storage::settings::{load_settings, QuoteSettings};
use quotebook::ui::terminal;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quotebook=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_terminal(settings: QuoteSettings) -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut session = QuoteSession::from_settings(&settings, Arc::new(StdoutShare))?;
        terminal::run(&mut session).await?;
        Ok::<(), Box<dyn Error>>(())
    })
}

#[cfg(feature = "desktop")]
fn run_desktop(settings: QuoteSettings) -> Result<(), Box<dyn Error>> {
    use quotebook::app::{App, SharedSession};
    use quotebook::session::share::ClipboardShare;

    let session = QuoteSession::from_settings(&settings, Arc::new(ClipboardShare))?;
    let shared: SharedSession = Arc::new(tokio::sync::Mutex::new(session));
    dioxus::LaunchBuilder::desktop()
        .with_context(shared)
        .launch(App);
    Ok(())
}

fn main() {
    init_tracing();
    let settings = load_settings();
    tracing::info!("Using quote API {}", settings.api_url);

    let terminal_requested = std::env::args().skip(1).any(|arg| arg == "--terminal");

    #[cfg(feature = "desktop")]
    let result = if terminal_requested {
        run_terminal(settings)
    } else {
        run_desktop(settings)
    };

    #[cfg(not(feature = "desktop"))]
    let result = {
        if !terminal_requested {
            tracing::debug!("Built without the desktop feature, using the terminal");
        }
        run_terminal(settings)
    };

    if let Err(e) = result {
        tracing::error!("Quotebook exited with an error: {}", e);
        std::process::exit(1);
    }
}

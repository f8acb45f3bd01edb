//! Share capability
//!
//! Hands a quote's text to whatever the platform uses for sharing. The session never
//! observes what the share target does with it.

use std::io::Write;
use thiserror::Error;

const TWEET_INTENT_URL: &str = "https://twitter.com/intent/tweet";

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Share target unavailable: {0}")]
    Unavailable(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Destination for shared quote text
pub trait ShareTarget: Send + Sync {
    fn share(&self, message: &str) -> Result<(), ShareError>;
}

/// Build a tweet intent link prefilled with `text`
pub fn tweet_intent_url(text: &str) -> String {
    match reqwest::Url::parse_with_params(TWEET_INTENT_URL, &[("text", text)]) {
        Ok(url) => url.to_string(),
        Err(_) => TWEET_INTENT_URL.to_string(),
    }
}

/// Prints shared text to standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutShare;

impl ShareTarget for StdoutShare {
    fn share(&self, message: &str) -> Result<(), ShareError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", message)?;
        writeln!(stdout, "Tweet it: {}", tweet_intent_url(message))?;
        stdout.flush()?;
        Ok(())
    }
}

/// Copies shared text to the system clipboard
///
/// On Linux the selection belongs to the `Clipboard` that set it, so a background thread
/// keeps it alive until another application takes ownership.
#[cfg(feature = "desktop")]
#[derive(Debug, Default, Clone, Copy)]
pub struct ClipboardShare;

#[cfg(feature = "desktop")]
impl ShareTarget for ClipboardShare {
    #[cfg(target_os = "linux")]
    fn share(&self, message: &str) -> Result<(), ShareError> {
        let text = message.to_string();
        std::thread::Builder::new()
            .name("clipboard-share".to_string())
            .spawn(move || match arboard::Clipboard::new() {
                Ok(mut clipboard) => {
                    use arboard::SetExtLinux;
                    let len = text.len();
                    match clipboard.set().wait().text(text) {
                        Ok(()) => tracing::debug!("Clipboard released after sharing {} chars", len),
                        Err(e) => tracing::warn!("Failed to copy to clipboard: {}", e),
                    }
                }
                Err(e) => tracing::warn!("Failed to access clipboard: {}", e),
            })?;
        Ok(())
    }

    #[cfg(not(target_os = "linux"))]
    fn share(&self, message: &str) -> Result<(), ShareError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ShareError::Unavailable(e.to_string()))?;
        clipboard
            .set_text(message)
            .map_err(|e| ShareError::Unavailable(e.to_string()))?;
        tracing::debug!("Copied {} chars to clipboard", message.len());
        Ok(())
    }
}

//! Notification sinks.
//!
//! Delivery failures are a logging concern, never a pipeline failure: the
//! session loop calls `send_best_effort` and keeps going whatever happens.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification transport error: {0}")]
    Transport(String),

    #[error("notification rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("missing credentials: {0}")]
    MissingCredentials(String),
}

/// Accepts a markdown-flavored message for a destination channel.
pub trait Notifier {
    fn name(&self) -> &str;

    fn send(&self, channel: &str, text: &str) -> Result<(), NotifyError>;
}

/// Send and swallow: failures are logged to stderr and never propagate.
pub fn send_best_effort(notifier: &dyn Notifier, channel: &str, text: &str) {
    if let Err(e) = notifier.send(channel, text) {
        eprintln!("[{}] notification delivery failed: {e}", notifier.name());
    }
}

/// Telegram Bot API sendMessage.
///
/// The bot token comes from the environment (`TELEGRAM_TOKEN`), never from
/// config files; the chat id is the channel argument.
pub struct TelegramNotifier {
    client: reqwest::blocking::Client,
    token: String,
}

pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_TOKEN";

impl TelegramNotifier {
    pub fn new(token: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            token: token.into(),
        }
    }

    /// Build from the environment. Errors when the token is unset so the
    /// caller can fall back to stdout.
    pub fn from_env() -> Result<Self, NotifyError> {
        let token = std::env::var(TELEGRAM_TOKEN_ENV)
            .map_err(|_| NotifyError::MissingCredentials(TELEGRAM_TOKEN_ENV.into()))?;
        Ok(Self::new(token))
    }
}

impl Notifier for TelegramNotifier {
    fn name(&self) -> &str {
        "telegram"
    }

    fn send(&self, channel: &str, text: &str) -> Result<(), NotifyError> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.token);
        let payload = serde_json::json!({
            "chat_id": channel,
            "text": text,
            "parse_mode": "Markdown",
        });

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

/// Prints messages to stdout; the default when no Telegram token is set.
#[derive(Debug, Default)]
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn name(&self) -> &str {
        "stdout"
    }

    fn send(&self, channel: &str, text: &str) -> Result<(), NotifyError> {
        if channel.is_empty() {
            println!("{text}");
        } else {
            println!("[{channel}] {text}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl Notifier for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn send(&self, _channel: &str, _text: &str) -> Result<(), NotifyError> {
            Err(NotifyError::Transport("boom".into()))
        }
    }

    #[test]
    fn best_effort_swallows_failures() {
        // Must not panic or propagate.
        send_best_effort(&Failing, "chan", "message");
    }

    #[test]
    fn stdout_notifier_always_succeeds() {
        assert!(StdoutNotifier.send("", "hello").is_ok());
        assert!(StdoutNotifier.send("chan", "hello").is_ok());
    }

    #[test]
    fn rejected_error_carries_status() {
        let err = NotifyError::Rejected {
            status: 403,
            body: "forbidden".into(),
        };
        assert!(err.to_string().contains("403"));
    }
}

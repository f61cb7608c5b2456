//! Handler error type and the dispatcher's error handler
//!
//! Handlers do not retry. Anything they cannot turn into a user-facing
//! reply propagates to [`BotErrorHandler`], which classifies Telegram
//! errors, logs them, and counts them in the health metrics.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use teloxide::error_handlers::ErrorHandler;
use teloxide::types::ChatId;
use teloxide::{ApiError, RequestError};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::health::AppState;
use crate::media::DownloadError;
use crate::tags::TagError;

pub type HandlerResult = Result<(), HandlerError>;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Telegram request failed: {0}")]
    Request(#[from] RequestError),

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error(transparent)]
    Tags(#[from] TagError),

    #[error("Registry store error: {0}")]
    Store(#[from] squonk_store::StoreError),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// What a failed Telegram request means for the bot
#[derive(Debug, PartialEq, Eq)]
pub enum ErrorOutcome {
    /// Flood control; Telegram asks to wait this long
    RateLimited(Duration),
    /// Group was upgraded to a supergroup with a new id
    Migrated(ChatId),
    /// Will fail again no matter how often it is repeated
    Permanent(String),
    /// Network hiccup or unknown API error
    Transient(String),
}

/// Classify a `RequestError`.
pub fn classify(err: &RequestError) -> ErrorOutcome {
    match err {
        RequestError::RetryAfter(secs) => {
            ErrorOutcome::RateLimited(Duration::from_secs(secs.duration().as_secs().max(1)))
        }
        RequestError::MigrateToChatId(new_id) => ErrorOutcome::Migrated(*new_id),
        RequestError::Network(_) | RequestError::Io(_) => ErrorOutcome::Transient(err.to_string()),
        RequestError::InvalidJson { raw, .. } => {
            ErrorOutcome::Transient(format!("Invalid JSON response: {}", raw))
        }
        RequestError::Api(api_err) => classify_api(api_err),
    }
}

fn classify_api(api_err: &ApiError) -> ErrorOutcome {
    let message = match api_err {
        // The bot cannot reach this chat at all
        ApiError::BotBlocked => "Bot was blocked by the user",
        ApiError::BotKicked => "Bot was kicked from the group",
        ApiError::BotKickedFromSupergroup => "Bot was kicked from the supergroup",
        ApiError::BotKickedFromChannel => "Bot was kicked from the channel",
        ApiError::ChatNotFound => "Chat not found",
        ApiError::UserDeactivated => "User is deactivated",
        ApiError::GroupDeactivated => "Group is deactivated",
        ApiError::CantInitiateConversation => "Can't initiate conversation with the user",
        ApiError::NotEnoughRightsToPostMessages => "Not enough rights to post messages",
        ApiError::InvalidToken => "Bot token is invalid",

        // The stored file reference or the payload is unusable
        ApiError::WrongFileId => "Wrong file ID",
        ApiError::WrongFileIdOrUrl => "Wrong file ID or URL",
        ApiError::FileIdInvalid => "File ID is invalid",
        ApiError::RequestEntityTooLarge => "Request entity too large (file too big)",
        ApiError::MessageIsTooLong => "Message is too long (max 4096 characters)",
        ApiError::InvalidQueryId => "Query ID is invalid or expired (answer within 10s)",

        _ => return ErrorOutcome::Transient(format!("Telegram API error: {}", api_err)),
    };
    ErrorOutcome::Permanent(message.to_string())
}

/// Logs handler failures; the user's action is dropped.
pub struct BotErrorHandler {
    health: AppState,
}

impl BotErrorHandler {
    pub fn new(health: AppState) -> Arc<Self> {
        Arc::new(Self { health })
    }
}

impl ErrorHandler<HandlerError> for BotErrorHandler {
    fn handle_error(self: Arc<Self>, error: HandlerError) -> BoxFuture<'static, ()> {
        Box::pin(async move {
            self.health.increment_errors().await;

            let HandlerError::Request(ref request_err) = error else {
                error!("Handler failed: {}", error);
                return;
            };

            match classify(request_err) {
                ErrorOutcome::RateLimited(wait) => {
                    warn!("Flood control: Telegram asks to wait {:?}; request dropped", wait)
                }
                ErrorOutcome::Migrated(new_id) => {
                    warn!("Chat migrated to {}; request dropped", new_id.0)
                }
                ErrorOutcome::Permanent(message) => {
                    warn!("Permanent Telegram error: {}", message)
                }
                ErrorOutcome::Transient(message) => {
                    debug!("Transient Telegram error: {}", message)
                }
            }
        })
    }
}

//! Fetching uploaded files from Telegram

use teloxide::requests::Requester;
use teloxide::{Bot, RequestError};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Failed to resolve file: {0}")]
    Resolve(#[from] RequestError),

    #[error("Failed to download file: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to download file: HTTP {0}")]
    Status(reqwest::StatusCode),
}

/// Download URL of a file resolved through `getFile`
pub fn file_download_url(api_url: &str, token: &str, file_path: &str) -> String {
    format!(
        "{}/file/bot{}/{}",
        api_url.trim_end_matches('/'),
        token,
        file_path.trim_start_matches('/')
    )
}

/// Resolve `file_id` and download its whole content into memory
pub async fn download_file(bot: &Bot, file_id: &str) -> Result<Vec<u8>, DownloadError> {
    let file = bot.get_file(teloxide::types::FileId(file_id.to_string())).await?;
    let url = file_download_url(bot.api_url().as_str(), bot.token(), &file.path);

    debug!("Downloading file {} ({} bytes)", file_id, file.size);

    let response = reqwest::get(&url).await?;
    if !response.status().is_success() {
        return Err(DownloadError::Status(response.status()));
    }

    let bytes = response.bytes().await?;
    Ok(bytes.to_vec())
}

//! Store-side steps of each bot action, kept apart from the Telegram calls

use squonk_store::fs::StoreFs;
use squonk_store::{RegistryStore, Result};
use squonk_types::{replies, GroupId, Playlist, SongRecord, UserKey};

use crate::tags::TrackTags;

/// Outcome of storing an uploaded track
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The uploader never sent `GroupID: ...`
    NotRegistered,
    Saved { group: GroupId, song: SongRecord },
}

impl UploadOutcome {
    pub fn reply_text(&self) -> String {
        match self {
            UploadOutcome::NotRegistered => replies::NOT_REGISTERED.to_string(),
            UploadOutcome::Saved { group, song } => replies::song_saved(song, group),
        }
    }
}

/// Reply to the playlist button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistReply {
    /// Shown as a callback notification, not a chat message
    Empty,
    Listing(String),
}

pub async fn register<F: StoreFs>(
    store: &RegistryStore<F>,
    user: &UserKey,
    group: GroupId,
) -> Result<String> {
    let reply = replies::group_saved(&group);
    store.register(user, group).await?;
    Ok(reply)
}

/// Group the uploader registered, if any. Checked before downloading.
///
/// A blank registration (`GroupID:` with nothing after it) is stored as
/// sent but does not count as a target.
pub async fn upload_target<F: StoreFs>(
    store: &RegistryStore<F>,
    user: &UserKey,
) -> Result<Option<GroupId>> {
    let group = store.group_for(user).await?;
    Ok(group.filter(|g| !g.as_str().is_empty()))
}

/// Append the uploaded track to the uploader's group.
///
/// The registration is read again here; it may have changed while the file
/// was downloading.
pub async fn store_upload<F: StoreFs>(
    store: &RegistryStore<F>,
    user: &UserKey,
    file_id: &str,
    tags: TrackTags,
) -> Result<UploadOutcome> {
    let Some(group) = upload_target(store, user).await? else {
        return Ok(UploadOutcome::NotRegistered);
    };

    let song = SongRecord::from_tags(file_id, tags.title, tags.artist);
    store.append_song(&group, song.clone()).await?;

    Ok(UploadOutcome::Saved { group, song })
}

/// Song to send for `/play`: always the first one stored
pub async fn next_to_play<F: StoreFs>(
    store: &RegistryStore<F>,
    group: &GroupId,
) -> Result<Option<SongRecord>> {
    let playlist: Playlist = store.playlist(group).await?;
    Ok(playlist.first().cloned())
}

pub async fn playlist_reply<F: StoreFs>(
    store: &RegistryStore<F>,
    group: &GroupId,
) -> Result<PlaylistReply> {
    let playlist = store.playlist(group).await?;
    if playlist.is_empty() {
        Ok(PlaylistReply::Empty)
    } else {
        Ok(PlaylistReply::Listing(playlist.render()))
    }
}

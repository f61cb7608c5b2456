//! User-facing reply texts

use crate::keys::GroupId;
use crate::songs::SongRecord;

pub const WELCOME: &str = "👋 Welcome to Squonk Radio V0.4.6!\nUse /setup to link your group.";

pub const SETUP: &str = "📩 Send me `GroupID: <your_group_id>` to register a group.";

pub const NOT_REGISTERED: &str =
    "❗ Please first send `GroupID: <your_group_id>` in this private chat.";

pub const NO_SONGS: &str = "❌ No songs found for this group.";

pub const EMPTY_PLAYLIST: &str = "No songs in playlist.";

pub const PLAY_CAPTION: &str = "🎶 Squonking time!";

pub fn group_saved(group_id: &GroupId) -> String {
    format!("✅ Group ID `{}` saved. Now send me .mp3 files!", group_id)
}

pub fn song_saved(song: &SongRecord, group_id: &GroupId) -> String {
    format!(
        "✅ Saved `{}` by `{}` for group {}",
        song.title, song.artist, group_id
    )
}

pub fn file_too_large(max_mb: u64) -> String {
    format!("❌ This file is too large. Files up to {} MB are supported.", max_mb)
}

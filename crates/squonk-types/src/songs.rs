//! Song records and playlists

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::keys::GroupId;

/// Placeholder stored when an audio file carries no title or artist tag
pub const UNKNOWN: &str = "Unknown";

/// One uploaded track: the Telegram file reference plus its tag metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SongRecord {
    pub file_id: String,
    pub title: String,
    pub artist: String,
}

impl SongRecord {
    /// Build a record from optional tag values, substituting [`UNKNOWN`]
    /// for missing or blank fields.
    pub fn from_tags(
        file_id: impl Into<String>,
        title: Option<String>,
        artist: Option<String>,
    ) -> Self {
        Self {
            file_id: file_id.into(),
            title: or_unknown(title),
            artist: or_unknown(artist),
        }
    }
}

fn or_unknown(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Value stored under a registry key
///
/// The file does not tag its entries; a string is a registration pointing
/// at a group, an array is that key's song list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RegistryEntry {
    Group(GroupId),
    Songs(Vec<SongRecord>),
}

/// Ordered song list of one group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    songs: Vec<SongRecord>,
}

impl Playlist {
    pub fn new(songs: Vec<SongRecord>) -> Self {
        Self { songs }
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Song picked for playback. Always the earliest upload.
    pub fn first(&self) -> Option<&SongRecord> {
        self.songs.first()
    }

    pub fn songs(&self) -> &[SongRecord] {
        &self.songs
    }

    /// Listing text sent in reply to the playlist button
    pub fn render(&self) -> String {
        let mut text = String::from("🎵 Playlist:\n");
        for (idx, song) in self.songs.iter().enumerate() {
            let _ = writeln!(text, "{}. {} - {}", idx + 1, song.title, song.artist);
        }
        text
    }
}

impl From<Vec<SongRecord>> for Playlist {
    fn from(songs: Vec<SongRecord>) -> Self {
        Self::new(songs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(file_id: &str, title: &str, artist: &str) -> SongRecord {
        SongRecord {
            file_id: file_id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
        }
    }

    // ── SongRecord ────────────────────────────────────────────────────────────

    #[test]
    fn test_from_tags_keeps_present_values() {
        let record = SongRecord::from_tags(
            "AAA",
            Some("Squonk Song".to_string()),
            Some("The Squonks".to_string()),
        );
        assert_eq!(record.file_id, "AAA");
        assert_eq!(record.title, "Squonk Song");
        assert_eq!(record.artist, "The Squonks");
    }

    #[test]
    fn test_from_tags_without_tags_is_unknown() {
        let record = SongRecord::from_tags("AAA", None, None);
        assert_eq!(record.title, UNKNOWN);
        assert_eq!(record.artist, UNKNOWN);
    }

    #[test]
    fn test_from_tags_defaults_each_field_independently() {
        let record = SongRecord::from_tags("AAA", Some("Only Title".to_string()), None);
        assert_eq!(record.title, "Only Title");
        assert_eq!(record.artist, UNKNOWN);
    }

    #[test]
    fn test_from_tags_blank_value_is_unknown() {
        let record = SongRecord::from_tags("AAA", Some("   ".to_string()), Some(String::new()));
        assert_eq!(record.title, UNKNOWN);
        assert_eq!(record.artist, UNKNOWN);
    }

    #[test]
    fn test_song_record_json_field_names() {
        let json = serde_json::to_value(song("F1", "T", "A")).unwrap();
        assert_eq!(json["file_id"], "F1");
        assert_eq!(json["title"], "T");
        assert_eq!(json["artist"], "A");
    }

    // ── RegistryEntry ─────────────────────────────────────────────────────────

    #[test]
    fn test_entry_string_is_registration() {
        let entry: RegistryEntry = serde_json::from_str("\"-100200\"").unwrap();
        assert_eq!(entry, RegistryEntry::Group(GroupId::from("-100200")));
    }

    #[test]
    fn test_entry_array_is_song_list() {
        let entry: RegistryEntry = serde_json::from_str(
            r#"[{"file_id": "F1", "title": "T", "artist": "A"}]"#,
        )
        .unwrap();
        assert_eq!(entry, RegistryEntry::Songs(vec![song("F1", "T", "A")]));
    }

    #[test]
    fn test_entry_rejects_other_shapes() {
        assert!(serde_json::from_str::<RegistryEntry>("42").is_err());
        assert!(serde_json::from_str::<RegistryEntry>(r#"{"title": "x"}"#).is_err());
    }

    // ── Playlist ──────────────────────────────────────────────────────────────

    #[test]
    fn test_first_is_earliest_upload() {
        let playlist = Playlist::new(vec![song("F1", "One", "A"), song("F2", "Two", "B")]);
        assert_eq!(playlist.first().map(|s| s.file_id.as_str()), Some("F1"));
    }

    #[test]
    fn test_empty_playlist_has_no_first() {
        let playlist = Playlist::default();
        assert!(playlist.is_empty());
        assert!(playlist.first().is_none());
    }

    #[test]
    fn test_render_numbers_from_one() {
        let playlist = Playlist::new(vec![
            song("F1", "One", "Alpha"),
            song("F2", "Two", "Beta"),
        ]);
        assert_eq!(
            playlist.render(),
            "🎵 Playlist:\n1. One - Alpha\n2. Two - Beta\n"
        );
    }

    #[test]
    fn test_render_keeps_duplicates() {
        let playlist = Playlist::new(vec![song("F1", "Same", "X"), song("F1", "Same", "X")]);
        assert_eq!(playlist.render(), "🎵 Playlist:\n1. Same - X\n2. Same - X\n");
    }
}

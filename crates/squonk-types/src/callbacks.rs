//! Inline button callback data

/// Actions attached to the buttons under a played song
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// Skip to the next song. The bot registers no handler for it.
    Next,
    /// Show the group's playlist
    Playlist,
}

impl CallbackAction {
    /// Callback data sent with the button (max 64 bytes on Telegram)
    pub fn as_data(&self) -> &'static str {
        match self {
            CallbackAction::Next => "next",
            CallbackAction::Playlist => "playlist",
        }
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            CallbackAction::Next => "▶️ Next",
            CallbackAction::Playlist => "📃 Playlist",
        }
    }

    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "next" => Some(CallbackAction::Next),
            "playlist" => Some(CallbackAction::Playlist),
            _ => None,
        }
    }

    /// Buttons shown under a played song, in display order
    pub fn player_row() -> [CallbackAction; 2] {
        [CallbackAction::Next, CallbackAction::Playlist]
    }
}

//! Bot commands and the group registration text convention

use crate::keys::GroupId;

/// Prefix of the free-text message that registers a target group
pub const GROUP_ID_PREFIX: &str = "GroupID:";

/// Slash commands understood by the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Setup,
    Play,
}

impl Command {
    /// Parse the leading command of a message text.
    ///
    /// Accepts `/play`, `/play@botname` and trailing arguments (ignored).
    /// A command addressed to a different bot, or an unknown command,
    /// yields `None`. Matching is case-insensitive.
    pub fn parse(text: &str, bot_username: Option<&str>) -> Option<Self> {
        let first = text.split_whitespace().next()?;
        let name = first.strip_prefix('/')?;

        let (name, addressee) = match name.split_once('@') {
            Some((name, addressee)) => (name, Some(addressee)),
            None => (name, None),
        };

        if let (Some(addressee), Some(username)) = (addressee, bot_username) {
            if !addressee.eq_ignore_ascii_case(username) {
                return None;
            }
        }

        match name.to_lowercase().as_str() {
            "start" => Some(Command::Start),
            "setup" => Some(Command::Setup),
            "play" => Some(Command::Play),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Setup => "setup",
            Command::Play => "play",
        }
    }
}

/// Extract the group id from a `GroupID: <id>` message.
///
/// Everything after the first `:` is taken, trimmed. The id is not
/// validated and may be empty.
pub fn parse_group_registration(text: &str) -> Option<GroupId> {
    if !text.starts_with(GROUP_ID_PREFIX) {
        return None;
    }
    let (_, rest) = text.split_once(':')?;
    Some(GroupId::from(rest.trim()))
}

//! Update handlers
//!
//! Each endpoint receives its dependencies from the dispatcher: the bot, the
//! update, whatever the filter in `main` extracted, the registry store and
//! the health state.

use squonk_store::fs::SystemFs;
use squonk_store::RegistryStore;
use squonk_types::{replies, CallbackAction, Command, GroupId, UserKey};
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQuery, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, Message, MessageId,
    ReplyMarkup, ReplyParameters,
};
use tracing::{debug, info, warn};

use crate::config::LimitConfig;
use crate::errors::HandlerResult;
use crate::health::AppState;
use crate::media::download_file;
use crate::radio::{self, PlaylistReply};
use crate::tags::read_tags;

pub type SongStore = RegistryStore<SystemFs>;

/// Handle `/start`, `/setup` and `/play`
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    store: SongStore,
    health: AppState,
) -> HandlerResult {
    debug!("Received /{} in chat {}", cmd.as_str(), msg.chat.id);
    health.increment_messages_received().await;

    match cmd {
        Command::Start => reply(&bot, &msg, replies::WELCOME).await,
        Command::Setup => reply(&bot, &msg, replies::SETUP).await,
        Command::Play => handle_play(&bot, &msg, &store, &health).await,
    }
}

async fn handle_play(bot: &Bot, msg: &Message, store: &SongStore, health: &AppState) -> HandlerResult {
    let group = GroupId::from_chat_id(msg.chat.id.0);

    let Some(song) = radio::next_to_play(store, &group).await? else {
        return reply(bot, msg, replies::NO_SONGS).await;
    };

    info!("Playing '{}' by '{}' in chat {}", song.title, song.artist, group);

    let mut req = bot.send_audio(msg.chat.id, InputFile::file_id(teloxide::types::FileId(song.file_id)));
    req.caption = Some(replies::PLAY_CAPTION.to_string());
    req.reply_markup = Some(ReplyMarkup::InlineKeyboard(player_keyboard()));
    req.await?;

    health.increment_playbacks().await;
    Ok(())
}

/// Handle a `GroupID: <id>` message
pub async fn handle_group_registration(
    bot: Bot,
    msg: Message,
    group: GroupId,
    store: SongStore,
    health: AppState,
) -> HandlerResult {
    health.increment_messages_received().await;

    let Some(user) = msg.from.as_ref() else {
        debug!("Ignoring group registration without a sender");
        return Ok(());
    };
    let user = UserKey::from_user_id(user.id.0);

    info!("User {} registered group {}", user, group);
    let text = radio::register(&store, &user, group).await?;
    health.increment_registrations().await;

    reply(&bot, &msg, &text).await
}

/// Handle an uploaded audio file
pub async fn handle_audio(
    bot: Bot,
    msg: Message,
    store: SongStore,
    limits: LimitConfig,
    health: AppState,
) -> HandlerResult {
    health.increment_messages_received().await;

    let (Some(user), Some(audio)) = (msg.from.as_ref(), msg.audio()) else {
        debug!("Ignoring audio message without a sender");
        return Ok(());
    };
    let user = UserKey::from_user_id(user.id.0);

    if radio::upload_target(&store, &user).await?.is_none() {
        return reply(&bot, &msg, replies::NOT_REGISTERED).await;
    }

    if u64::from(audio.file.size) > limits.max_bytes() {
        warn!(
            "Rejecting {} byte upload from user {} (limit {} MB)",
            audio.file.size, user, limits.media_max_mb
        );
        return reply(&bot, &msg, &replies::file_too_large(limits.media_max_mb)).await;
    }

    let file_id = audio.file.id.to_string();
    let bytes = download_file(&bot, &file_id).await?;
    let tags = tokio::task::spawn_blocking(move || read_tags(&bytes)).await??;

    let outcome = radio::store_upload(&store, &user, &file_id, tags).await?;
    if let radio::UploadOutcome::Saved { ref group, ref song } = outcome {
        info!("Saved '{}' by '{}' for group {}", song.title, song.artist, group);
        health.increment_uploads().await;
    }

    reply(&bot, &msg, &outcome.reply_text()).await
}

/// Handle the playlist button under a played song
pub async fn handle_playlist_callback(
    bot: Bot,
    query: CallbackQuery,
    store: SongStore,
    health: AppState,
) -> HandlerResult {
    health.increment_playlist_requests().await;

    let Some(chat_id) = query.message.as_ref().map(|m| m.chat().id) else {
        debug!("Playlist callback without a message; nothing to list");
        bot.answer_callback_query(query.id.clone()).await?;
        return Ok(());
    };

    let group = GroupId::from_chat_id(chat_id.0);
    match radio::playlist_reply(&store, &group).await? {
        PlaylistReply::Empty => {
            let mut req = bot.answer_callback_query(query.id.clone());
            req.text = Some(replies::EMPTY_PLAYLIST.to_string());
            req.await?;
        }
        PlaylistReply::Listing(text) => {
            message_request(&bot, chat_id, None, &text).await?;
            bot.answer_callback_query(query.id.clone()).await?;
        }
    }

    Ok(())
}

/// Inline keyboard shown under a played song
pub fn player_keyboard() -> InlineKeyboardMarkup {
    let row = CallbackAction::player_row()
        .into_iter()
        .map(|action| InlineKeyboardButton::callback(action.label(), action.as_data()))
        .collect::<Vec<_>>();
    InlineKeyboardMarkup::new(vec![row])
}

/// Text message to `chat_id`, attached to `reply_to` when given
fn message_request(
    bot: &Bot,
    chat_id: ChatId,
    reply_to: Option<MessageId>,
    text: &str,
) -> <Bot as Requester>::SendMessage {
    let mut req = bot.send_message(chat_id, text);
    req.reply_parameters = reply_to.map(ReplyParameters::new);
    req
}

/// Answer `msg` in its chat as a reply to it
async fn reply(bot: &Bot, msg: &Message, text: &str) -> HandlerResult {
    message_request(bot, msg.chat.id, Some(msg.id), text).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::requests::HasPayload;
    use teloxide::types::InlineKeyboardButtonKind;

    fn bot() -> Bot {
        Bot::new("123456:TEST")
    }

    #[test]
    fn test_reply_is_attached_to_triggering_message() {
        let bot = bot();
        let req = message_request(&bot, ChatId(-100), Some(MessageId(42)), replies::WELCOME);

        let payload = req.payload_ref();
        assert_eq!(payload.text, replies::WELCOME);
        assert_eq!(
            payload.reply_parameters.as_ref().map(|p| p.message_id),
            Some(MessageId(42))
        );
    }

    #[test]
    fn test_playlist_listing_is_not_a_reply() {
        let bot = bot();
        let req = message_request(&bot, ChatId(-100), None, "🎵 Playlist:\n1. One - A\n");

        assert!(req.payload_ref().reply_parameters.is_none());
    }

    #[test]
    fn test_player_keyboard_is_one_row() {
        let keyboard = player_keyboard();
        assert_eq!(keyboard.inline_keyboard.len(), 1);
        assert_eq!(keyboard.inline_keyboard[0].len(), 2);
    }

    #[test]
    fn test_player_keyboard_buttons() {
        let keyboard = player_keyboard();
        let buttons: Vec<(String, String)> = keyboard.inline_keyboard[0]
            .iter()
            .map(|button| match &button.kind {
                InlineKeyboardButtonKind::CallbackData(data) => (button.text.clone(), data.clone()),
                other => panic!("unexpected button kind: {:?}", other),
            })
            .collect();

        assert_eq!(
            buttons,
            vec![
                ("▶️ Next".to_string(), "next".to_string()),
                ("📃 Playlist".to_string(), "playlist".to_string()),
            ]
        );
    }
}

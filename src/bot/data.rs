use crate::auth::AccessToken;
use crate::chat::data::ChatClientData;

/// The prefix marking chat commands.
pub const COMMAND_PREFIX: &str = "!";

/// How a [Bot](super::Bot) connects to chat.
///
/// A bot always listens on exactly one channel, with [COMMAND_PREFIX] as its
/// prefix.
#[derive(Debug, Clone)]
pub struct BotData {
    token: AccessToken,
    prefix: &'static str,
    channel: String,
    nick: String,
}

impl BotData {
    pub fn new<S: Into<String>>(token: AccessToken, channel: S, nick: S) -> Self {
        Self {
            token,
            prefix: COMMAND_PREFIX,
            channel: channel.into(),
            nick: nick.into(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        self.prefix
    }
    /// The channels joined on connect, as they were given.
    #[must_use]
    pub fn initial_channels(&self) -> &[String] {
        std::slice::from_ref(&self.channel)
    }
    #[must_use]
    pub fn nick(&self) -> &str {
        &self.nick
    }

    #[must_use]
    pub fn chat_data(&self) -> ChatClientData {
        ChatClientData::new(
            self.nick.to_lowercase(),
            self.token.irc_password(),
            &self.channel,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_channel_and_prefix() {
        for (token, channel) in [
            ("abc", "eye_motif"),
            ("oauth:xyz", "#SomeStreamer"),
            ("", ""),
            ("t", "canal con espacios"),
        ] {
            let data = BotData::new(AccessToken::new(token), channel, "eye___bot");
            assert_eq!(data.initial_channels(), [String::from(channel)]);
            assert_eq!(data.prefix(), "!");
        }
    }

    #[test]
    fn chat_data_logs_in_with_token() {
        let data = BotData::new(AccessToken::new("oauth:abc"), "#Eye_Motif", "Eye___Bot");
        let chat = data.chat_data();
        assert_eq!(chat.nickname, "eye___bot");
        assert_eq!(chat.password, "oauth:abc");
        assert_eq!(chat.irc_channel(), "#eye_motif");
    }
}

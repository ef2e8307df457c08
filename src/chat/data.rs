pub const TWITCH_IRC_SERVER: &str = "irc.chat.twitch.tv";
pub const TWITCH_IRC_TLS_PORT: u16 = 6697;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatClientData {
    pub server: String,
    pub nickname: String,
    /// Sent with `PASS`, including the `oauth:` prefix.
    pub password: String,
    /// Channel name without the leading `#`.
    pub channel: String,
}

/// Something that happened in the bot's channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Message {
        channel: String,
        username: String,
        text: String,
        is_subscriber: bool,
        is_moderator: bool,
    },
    Bits {
        channel: String,
        username: String,
        bits: u64,
        text: String,
    },
    Subscription {
        channel: String,
        username: String,
        kind: SubscriptionKind,
        months: u64,
        /// Display name of the gift recipient.
        recipient: Option<String>,
        text: Option<String>,
    },
    /// A new follower, reported over EventSub rather than chat.
    Follow { channel: String, username: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionKind {
    Sub,
    Resub,
    SubGift,
    AnonSubGift,
}

impl ChatClientData {
    pub fn new<S: Into<String>>(nickname: S, password: S, channel: &str) -> Self {
        Self {
            server: String::from(TWITCH_IRC_SERVER),
            nickname: nickname.into(),
            password: password.into(),
            channel: channel.trim().trim_start_matches('#').to_lowercase(),
        }
    }

    #[must_use]
    pub fn irc_channel(&self) -> String {
        format!("#{}", self.channel)
    }

    #[must_use]
    pub fn irc_config(&self) -> irc::client::prelude::Config {
        irc::client::prelude::Config {
            nickname: Some(self.nickname.clone()),
            username: Some(self.nickname.clone()),
            password: Some(self.password.clone()),
            server: Some(self.server.clone()),
            port: Some(TWITCH_IRC_TLS_PORT),
            use_tls: Some(true),
            channels: vec![self.irc_channel()],
            ..Default::default()
        }
    }
}

impl SubscriptionKind {
    /// Parses the `msg-id` of a `USERNOTICE`.
    pub fn from_msg_id(msg_id: &str) -> Option<Self> {
        Some(match msg_id {
            "sub" => SubscriptionKind::Sub,
            "resub" => SubscriptionKind::Resub,
            "subgift" => SubscriptionKind::SubGift,
            "anonsubgift" => SubscriptionKind::AnonSubGift,
            _ => return None,
        })
    }
}

impl std::fmt::Display for ChatEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatEvent::Message {
                channel,
                username,
                text,
                ..
            } => f.write_fmt(format_args!("[#{channel}] {username}: {text}")),
            ChatEvent::Bits {
                channel,
                username,
                bits,
                ..
            } => f.write_fmt(format_args!("[#{channel}] {username} cheered {bits} bits")),
            ChatEvent::Subscription {
                channel,
                username,
                kind,
                months,
                recipient,
                ..
            } => match recipient {
                Some(recipient) => f.write_fmt(format_args!(
                    "[#{channel}] {username} gifted {recipient} a sub ({months} months)"
                )),
                None => f.write_fmt(format_args!(
                    "[#{channel}] {username} {kind:?} ({months} months)"
                )),
            },
            ChatEvent::Follow { channel, username } => {
                f.write_fmt(format_args!("[#{channel}] {username} followed"))
            }
        }
    }
}

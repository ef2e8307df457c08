#[derive(Debug)]
pub enum BotError {
    Chat(crate::chat::error::ChatError),
    /// Twitch closed the connection before accepting the login, with the
    /// reason it gave, if any.
    LoginFailed(Option<String>),
    Close,
}

impl std::fmt::Display for BotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotError::Chat(err) => f.write_fmt(format_args!("{err}")),
            BotError::LoginFailed(Some(reason)) => {
                f.write_fmt(format_args!("Twitch rejected the chat login: {reason}"))
            }
            BotError::LoginFailed(None) => {
                f.write_str("Twitch closed the connection before accepting the login")
            }
            BotError::Close => f.write_str("Bot is closing"),
        }
    }
}
impl std::error::Error for BotError {}

impl From<crate::chat::error::ChatError> for BotError {
    fn from(value: crate::chat::error::ChatError) -> Self {
        BotError::Chat(value)
    }
}
impl From<irc::error::Error> for BotError {
    fn from(value: irc::error::Error) -> Self {
        BotError::Chat(value.into())
    }
}

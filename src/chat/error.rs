#[derive(Debug)]
pub enum ChatError {
    Irc(irc::error::Error),
}

impl std::fmt::Display for ChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatError::Irc(err) => f.write_fmt(format_args!("Chat error: {err}")),
        }
    }
}
impl std::error::Error for ChatError {}
impl From<irc::error::Error> for ChatError {
    fn from(value: irc::error::Error) -> Self {
        ChatError::Irc(value)
    }
}

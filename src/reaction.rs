use crate::chat::data::ChatEvent;

/// The avatar pose an event asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reaction {
    #[default]
    Default,
    Follow,
    Subscription,
    Bits,
    Clown,
}

/// Chat words that pick a reaction, in order of precedence. Each is matched
/// after the command prefix, anywhere in the message.
const CHAT_TRIGGERS: [(&str, Reaction); 4] = [
    ("payaso", Reaction::Clown),
    ("seguidor", Reaction::Follow),
    ("subscripcion", Reaction::Subscription),
    ("bits", Reaction::Bits),
];

impl Reaction {
    /// Picks the reaction for `event`, or `None` if the avatar should keep
    /// its current one.
    ///
    /// Follows, subscriptions and cheers always react. A chat message reacts
    /// when it mentions a trigger word behind `prefix`, ignoring case.
    #[must_use]
    pub fn from_event(event: &ChatEvent, prefix: &str) -> Option<Self> {
        match event {
            ChatEvent::Follow { .. } => Some(Reaction::Follow),
            ChatEvent::Subscription { .. } => Some(Reaction::Subscription),
            ChatEvent::Bits { .. } => Some(Reaction::Bits),
            ChatEvent::Message { text, .. } => {
                let text = text.to_lowercase();
                CHAT_TRIGGERS
                    .into_iter()
                    .find(|(word, _)| text.contains(&format!("{prefix}{word}")))
                    .map(|(_, reaction)| reaction)
            }
        }
    }
}

impl std::fmt::Display for Reaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Reaction::Default => "default",
            Reaction::Follow => "follow",
            Reaction::Subscription => "subscription",
            Reaction::Bits => "bits",
            Reaction::Clown => "clown",
        })
    }
}

use serde::Serialize;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", content = "condition")]
pub enum Subscription {
    /// Needs a token with `moderator:read:followers` for the channel.
    #[serde(rename = "channel.follow")]
    Follow {
        broadcaster_user_id: String,
        moderator_user_id: String,
    },
}

impl Subscription {
    /// Follows of a channel, as seen by its own broadcaster.
    #[must_use]
    pub fn follows_of(user_id: &str) -> Self {
        Subscription::Follow {
            broadcaster_user_id: String::from(user_id),
            moderator_user_id: String::from(user_id),
        }
    }

    #[must_use]
    pub fn version(&self) -> &'static str {
        match self {
            Subscription::Follow { .. } => "2",
        }
    }
}

/// The body of a Helix "Create EventSub Subscription" request.
#[derive(Debug, Serialize)]
pub struct SubscriptionRequest<'a> {
    #[serde(flatten)]
    pub subscription: &'a Subscription,
    pub version: &'static str,
    pub transport: Transport<'a>,
}

#[derive(Debug, Serialize)]
pub struct Transport<'a> {
    pub method: &'static str,
    pub session_id: &'a str,
}

impl<'a> SubscriptionRequest<'a> {
    /// Delivers `subscription` to the websocket session `session_id`.
    #[must_use]
    pub fn websocket(subscription: &'a Subscription, session_id: &'a str) -> Self {
        Self {
            subscription,
            version: subscription.version(),
            transport: Transport {
                method: "websocket",
                session_id,
            },
        }
    }
}

use crate::chat::data::ChatEvent;
use crate::twitch::HelixAuth;
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct EventsubClientData {
    pub auth: HelixAuth,
    /// The channel whose followers are reported.
    pub broadcaster: Broadcaster,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Broadcaster {
    pub user_id: String,
    pub login: String,
}

/// A websocket message from EventSub, reduced to what the client acts on.
#[derive(Debug, PartialEq, Eq)]
pub enum Inbound {
    Welcome { session_id: String },
    Keepalive,
    Follow(FollowEvent),
    /// Twitch is moving the session to `url`. Subscriptions carry over.
    Reconnect { url: String },
    Revocation(SubscriptionStatus),
    /// Any other message, by its `message_type`.
    Other(String),
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FollowEvent {
    pub user_login: String,
    pub user_name: String,
    pub broadcaster_user_login: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SubscriptionStatus {
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    metadata: MessageMetadata,
    payload: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct MessageMetadata {
    message_type: String,
    subscription_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionPayload {
    session: EventSession,
}

#[derive(Debug, Deserialize)]
struct EventSession {
    id: String,
    reconnect_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NotificationPayload<E> {
    event: E,
}

#[derive(Debug, Deserialize)]
struct RevocationPayload {
    subscription: SubscriptionStatus,
}

/// Parses the text of a websocket message.
pub fn parse_message(text: &str) -> Result<Inbound, serde_json::Error> {
    let Envelope { metadata, payload } = serde_json::from_str(text)?;

    Ok(match metadata.message_type.as_str() {
        "session_welcome" => {
            let payload: SessionPayload = serde_json::from_value(payload)?;
            Inbound::Welcome {
                session_id: payload.session.id,
            }
        }
        "session_keepalive" => Inbound::Keepalive,
        "session_reconnect" => {
            let payload: SessionPayload = serde_json::from_value(payload)?;
            match payload.session.reconnect_url {
                Some(url) => Inbound::Reconnect { url },
                None => Inbound::Other(metadata.message_type),
            }
        }
        "notification" if metadata.subscription_type.as_deref() == Some("channel.follow") => {
            let payload: NotificationPayload<FollowEvent> = serde_json::from_value(payload)?;
            Inbound::Follow(payload.event)
        }
        "revocation" => {
            let payload: RevocationPayload = serde_json::from_value(payload)?;
            Inbound::Revocation(payload.subscription)
        }
        _ => Inbound::Other(metadata.message_type),
    })
}

impl From<FollowEvent> for ChatEvent {
    fn from(value: FollowEvent) -> Self {
        ChatEvent::Follow {
            channel: value.broadcaster_user_login,
            username: value.user_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome() {
        let inbound = parse_message(
            r#"{"metadata":{"message_id":"96a3f3b5-5dec-4eed-908e-e11ee657416c","message_type":"session_welcome","message_timestamp":"2023-07-19T14:56:51.634234626Z"},"payload":{"session":{"id":"AQoQILE98gtqShGmLD7AM6yJThAB","status":"connected","connected_at":"2023-07-19T14:56:51.616329898Z","keepalive_timeout_seconds":10,"reconnect_url":null}}}"#,
        )
        .unwrap();
        assert_eq!(
            inbound,
            Inbound::Welcome {
                session_id: String::from("AQoQILE98gtqShGmLD7AM6yJThAB")
            }
        );
    }

    #[test]
    fn keepalive() {
        let inbound = parse_message(
            r#"{"metadata":{"message_id":"84c1e79a-2a4b-4c13-ba0b-4312293e9308","message_type":"session_keepalive","message_timestamp":"2023-07-19T10:11:12.634234626Z"},"payload":{}}"#,
        )
        .unwrap();
        assert_eq!(inbound, Inbound::Keepalive);
    }

    #[test]
    fn follow_notification() {
        let inbound = parse_message(
            r#"{"metadata":{"message_id":"befa7b53-d79d-478f-86b9-120f112b044e","message_type":"notification","message_timestamp":"2022-11-16T10:11:12.464757833Z","subscription_type":"channel.follow","subscription_version":"2"},"payload":{"subscription":{"id":"f1c2a387-161a-49f9-a165-0f21d7a4e1c4","status":"enabled","type":"channel.follow","version":"2","cost":0,"condition":{"broadcaster_user_id":"1337","moderator_user_id":"1337"},"transport":{"method":"websocket","session_id":"AQoQexAWVYKSTIu4ec_2VAxyuhAB"},"created_at":"2022-11-16T10:11:12.464757833Z"},"event":{"user_id":"1234","user_login":"cool_user","user_name":"Cool_User","broadcaster_user_id":"1337","broadcaster_user_login":"cooler_user","broadcaster_user_name":"Cooler_User","followed_at":"2020-07-15T18:16:11.17106713Z"}}}"#,
        )
        .unwrap();
        let Inbound::Follow(follow) = inbound else {
            panic!("expected a follow, got {inbound:?}");
        };
        assert_eq!(follow.user_login, "cool_user");
        assert_eq!(
            ChatEvent::from(follow),
            ChatEvent::Follow {
                channel: String::from("cooler_user"),
                username: String::from("Cool_User"),
            }
        );
    }

    #[test]
    fn reconnect_carries_url() {
        let inbound = parse_message(
            r#"{"metadata":{"message_id":"84c1e79a-2a4b-4c13-ba0b-4312293e9308","message_type":"session_reconnect","message_timestamp":"2022-11-18T09:10:11.634234626Z"},"payload":{"session":{"id":"AQoQexAWVYKSTIu4ec_2VAxyuhAB","status":"reconnecting","keepalive_timeout_seconds":null,"reconnect_url":"wss://eventsub.wss.twitch.tv?...","connected_at":"2022-11-16T10:11:12.634234626Z"}}}"#,
        )
        .unwrap();
        assert_eq!(
            inbound,
            Inbound::Reconnect {
                url: String::from("wss://eventsub.wss.twitch.tv?...")
            }
        );
    }

    #[test]
    fn revocation() {
        let inbound = parse_message(
            r#"{"metadata":{"message_id":"84c1e79a-2a4b-4c13-ba0b-4312293e9308","message_type":"revocation","message_timestamp":"2022-11-16T10:11:12.464757833Z","subscription_type":"channel.follow","subscription_version":"2"},"payload":{"subscription":{"id":"f1c2a387-161a-49f9-a165-0f21d7a4e1c4","status":"authorization_revoked","type":"channel.follow","version":"2","cost":0,"condition":{"broadcaster_user_id":"1337","moderator_user_id":"1337"},"transport":{"method":"websocket","session_id":"AQoQexAWVYKSTIu4ec_2VAxyuhAB"},"created_at":"2022-11-16T10:11:12.464757833Z"}}}"#,
        )
        .unwrap();
        assert_eq!(
            inbound,
            Inbound::Revocation(SubscriptionStatus {
                kind: String::from("channel.follow"),
                status: String::from("authorization_revoked"),
            })
        );
    }

    #[test]
    fn other_notifications_are_passed_over() {
        let inbound = parse_message(
            r#"{"metadata":{"message_id":"1","message_type":"notification","message_timestamp":"2022-11-16T10:11:12Z","subscription_type":"stream.online","subscription_version":"1"},"payload":{"event":{}}}"#,
        )
        .unwrap();
        assert_eq!(inbound, Inbound::Other(String::from("notification")));
        assert!(parse_message("not json").is_err());
    }
}

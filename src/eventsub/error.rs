use crate::twitch::TwitchError;

#[derive(Debug)]
pub enum EventsubError {
    OnConnect(tokio_tungstenite::tungstenite::Error),
    OnReconnect(tokio_tungstenite::tungstenite::Error),
    OnReceive(tokio_tungstenite::tungstenite::Error),
    ReceiveInvalid(serde_json::Error),
    OnOutbound(reqwest::Error),
    /// Twitch refused to create a subscription.
    Twitch(TwitchError),
    BadData(serde_json::Error),
}

impl std::fmt::Display for EventsubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventsubError::OnConnect(err) => f.write_fmt(format_args!(
                "Eventsub error while connecting to Twitch: {err}"
            )),
            EventsubError::OnReconnect(err) => f.write_fmt(format_args!(
                "Eventsub error while reconnecting to Twitch: {err}"
            )),
            EventsubError::OnReceive(err) => f.write_fmt(format_args!(
                "Eventsub error while receiving a message from Twitch: {err}"
            )),
            EventsubError::ReceiveInvalid(err) => {
                f.write_fmt(format_args!("Eventsub: Invalid message from Twitch: {err}"))
            }
            EventsubError::OnOutbound(err) => f.write_fmt(format_args!(
                "Eventsub error while sending data to Twitch: {err}"
            )),
            EventsubError::Twitch(err) => f.write_fmt(format_args!(
                "Eventsub: Twitch refused the follow subscription: {err}"
            )),
            EventsubError::BadData(err) => f.write_fmt(format_args!(
                "Eventsub error while parsing a response from Twitch: {err}"
            )),
        }
    }
}
impl std::error::Error for EventsubError {}

use super::data::{self, EventsubClientData, Inbound};
use super::error::EventsubError;
use super::outbound;
use super::subscription::Subscription;
use crate::chat::data::ChatEvent;
use futures_util::StreamExt;
use tokio::sync::broadcast;
use tokio_tungstenite::tungstenite::Message;

pub const EVENTSUB_URL: &str = "wss://eventsub.wss.twitch.tv/ws";

type Websocket =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

#[derive(Debug)]
pub struct EventsubClient {
    websocket: Websocket,
    data: EventsubClientData,
    subscribed: bool,
    events: broadcast::Sender<ChatEvent>,
}

impl EventsubClient {
    /// Opens the EventSub websocket. Follows are published on `events` once
    /// [run](EventsubClient::run) has subscribed to them.
    pub async fn connect(
        data: EventsubClientData,
        events: broadcast::Sender<ChatEvent>,
    ) -> Result<Self, EventsubError> {
        log::debug!("Eventsub: Connecting to Twitch");

        let websocket = EventsubClient::connect_websocket(EVENTSUB_URL)
            .await
            .map_err(EventsubError::OnConnect)?;

        Ok(Self {
            websocket,
            data,
            subscribed: false,
            events,
        })
    }

    async fn connect_websocket(url: &str) -> tokio_tungstenite::tungstenite::Result<Websocket> {
        let (websocket, _) = tokio_tungstenite::connect_async(url).await?;
        Ok(websocket)
    }

    async fn reconnect(&mut self, url: &str) -> Result<(), EventsubError> {
        log::debug!("Eventsub: Reconnecting to Twitch");

        let websocket = EventsubClient::connect_websocket(url)
            .await
            .map_err(EventsubError::OnReconnect)?;
        let mut old = std::mem::replace(&mut self.websocket, websocket);
        if let Err(err) = old.close(None).await {
            log::debug!("Eventsub: Old session did not close cleanly: {err}");
        }
        Ok(())
    }

    /// Handles messages until Twitch closes the session or revokes the
    /// subscription.
    pub async fn run(mut self) -> Result<(), EventsubError> {
        while let Some(message) = self
            .websocket
            .next()
            .await
            .transpose()
            .map_err(EventsubError::OnReceive)?
        {
            match message {
                Message::Text(text) => {
                    let inbound =
                        data::parse_message(&text).map_err(EventsubError::ReceiveInvalid)?;
                    if !self.handle(inbound).await? {
                        break;
                    }
                }
                Message::Close(_) => break,
                _ => (),
            }
        }
        Ok(())
    }

    /// Returns whether to keep listening.
    async fn handle(&mut self, inbound: Inbound) -> Result<bool, EventsubError> {
        match inbound {
            Inbound::Welcome { session_id } if !self.subscribed => {
                log::debug!("Eventsub: Subscribing to follows (session id: {session_id})");
                outbound::send_subscription(
                    &Subscription::follows_of(&self.data.broadcaster.user_id),
                    &session_id,
                    &self.data.auth,
                )
                .await?;
                self.subscribed = true;
                log::info!(
                    "Eventsub: Listening for follows on #{}",
                    self.data.broadcaster.login
                );
            }
            Inbound::Welcome { session_id } => {
                log::debug!("Eventsub: Session moved to {session_id}");
            }
            Inbound::Keepalive => (),
            Inbound::Follow(follow) => {
                log::debug!("Eventsub: {} followed", follow.user_login);
                let _ = self.events.send(follow.into());
            }
            Inbound::Reconnect { url } => self.reconnect(&url).await?,
            Inbound::Revocation(status) => {
                log::warn!(
                    "Eventsub: Twitch revoked the {} subscription ({})",
                    status.kind,
                    status.status
                );
                return Ok(false);
            }
            Inbound::Other(kind) => log::debug!("Eventsub: Ignoring {kind} message"),
        }
        Ok(true)
    }
}

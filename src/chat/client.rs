use super::data::ChatClientData;
use super::error::ChatError;
use irc::client::{Client, ClientStream};
use irc::proto::Capability;

const TWITCH_CAPABILITIES: [Capability; 3] = [
    Capability::Custom("twitch.tv/membership"),
    Capability::Custom("twitch.tv/tags"),
    Capability::Custom("twitch.tv/commands"),
];

/// A logged-in connection to Twitch chat.
#[derive(Debug)]
pub struct ChatClient {
    client: Client,
}

impl ChatClient {
    /// Connects to Twitch chat, requests the Twitch capabilities and logs in.
    /// The channel is joined once the server finishes its greeting.
    pub async fn connect(data: &ChatClientData) -> Result<Self, ChatError> {
        log::debug!("Chat: Connecting to {}", data.server);

        let client = Client::from_config(data.irc_config()).await?;
        client.send_cap_req(&TWITCH_CAPABILITIES)?;
        client.identify()?;

        log::debug!("Chat: Logging in as {}", data.nickname);
        Ok(ChatClient { client })
    }

    pub fn stream(&mut self) -> Result<ClientStream, ChatError> {
        Ok(self.client.stream()?)
    }
}

use crate::chat;
use crate::chat::data::ChatEvent;
use crate::eventsub;
use error::BotError;
use futures_util::{Stream, StreamExt};
use irc::proto::Message;
use std::future::Future;
use tokio::sync::{broadcast, mpsc};

pub mod data;
mod dispatch;
pub mod error;
pub mod interface;

/// Builds the message printed once the bot is connected.
#[must_use]
pub fn ready_message(nick: &str) -> String {
    format!("Bot conectado exitosamente a Twitch con {nick}")
}

#[derive(Debug)]
pub struct Bot {
    data: data::BotData,
    dispatcher: dispatch::Dispatcher,
    follows: Option<eventsub::data::EventsubClientData>,
    interface: interface::BotInterface,
    error_listener: mpsc::Receiver<BotError>,
}

impl Bot {
    #[must_use]
    pub fn new(data: data::BotData) -> Self {
        let (error_sender, error_receiver) = mpsc::channel(1);

        Self {
            dispatcher: dispatch::Dispatcher::new(data.nick()),
            follows: None,
            interface: interface::BotInterface(std::sync::Arc::new(interface::InterfaceData {
                error_reporter: error_sender,
            })),
            error_listener: error_receiver,
            data,
        }
    }

    #[must_use]
    pub fn data(&self) -> &data::BotData {
        &self.data
    }

    #[must_use]
    pub fn interface(&self) -> interface::BotInterface {
        self.interface.clone()
    }

    /// Registers the callback run once Twitch accepts the login. It receives
    /// the nickname the bot is known by. Replaces any earlier callback.
    pub fn on_ready(&mut self, f: impl FnMut(&str) + Send + 'static) {
        self.dispatcher.set_on_ready(Box::new(f));
    }

    /// Also listens for new followers over EventSub while the bot runs. They
    /// arrive at [on_event](Bot::on_event) as [ChatEvent::Follow].
    pub fn follow_events(&mut self, data: eventsub::data::EventsubClientData) {
        self.follows = Some(data);
    }

    /// Runs `f` for every event, in the order they happened. Ends once the
    /// bot has stopped.
    pub fn on_event<Fut: Future<Output = ()>>(
        &self,
        mut f: impl FnMut(ChatEvent, interface::BotInterface) -> Fut,
    ) -> impl Future<Output = ()> {
        let interface = self.interface.clone();
        let mut receiver = self.dispatcher.subscribe();

        async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => f(event, interface.clone()).await,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        log::warn!("Bot: Event handler fell behind, skipped {skipped} events");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    /// Connects to chat and handles messages until the connection closes, the
    /// bot is shut down through its [BotInterface](interface::BotInterface),
    /// or an error occurs. Nothing is retried.
    ///
    /// # Errors
    /// Returns `Err(BotError...)`:
    /// * `::Chat` if the connection failed.
    /// * `::LoginFailed` if Twitch closed the connection without accepting
    ///   the login.
    /// * `::Close` if the bot was shut down.
    pub async fn run(self) -> Result<(), BotError> {
        let Bot {
            data,
            mut dispatcher,
            follows,
            interface: _interface,
            mut error_listener,
        } = self;

        let publisher = dispatcher.publisher();
        let follows = async move {
            if let Some(follows) = follows {
                match eventsub::client::EventsubClient::connect(follows, publisher).await {
                    Ok(client) => match client.run().await {
                        Ok(()) => log::info!("Eventsub: Connection closed by Twitch"),
                        Err(err) => log::error!("{err}"),
                    },
                    Err(err) => log::error!("{err}"),
                }
            }
            std::future::pending::<std::convert::Infallible>().await
        };

        let mut client = chat::client::ChatClient::connect(&data.chat_data()).await?;
        let stream = client.stream()?;

        tokio::select! {
            result = drive(&mut dispatcher, stream) => result,
            never = follows => match never {},
            Some(err) = error_listener.recv() => {
                error_listener.close();
                Err(err)
            }
        }
    }
}

/// Dispatches every line of `stream`. A stream that ends before Twitch
/// welcomed the bot is a failed login.
async fn drive<S>(dispatcher: &mut dispatch::Dispatcher, mut stream: S) -> Result<(), BotError>
where
    S: Stream<Item = Result<Message, irc::error::Error>> + Unpin,
{
    while let Some(message) = stream.next().await.transpose()? {
        dispatcher.dispatch(&message);
    }

    if dispatcher.is_ready() {
        log::info!("Chat: Connection closed by Twitch");
        Ok(())
    } else {
        Err(BotError::LoginFailed(dispatcher.login_notice().map(String::from)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AccessToken;

    fn bot() -> Bot {
        Bot::new(data::BotData::new(
            AccessToken::new("abc"),
            "eye_motif",
            "eye___bot",
        ))
    }

    #[test]
    fn ready_message_names_the_bot() {
        let message = ready_message("eye___bot");
        assert!(message.contains("eye___bot"));
        assert_eq!(message, "Bot conectado exitosamente a Twitch con eye___bot");
    }

    #[test]
    fn bot_keeps_its_configuration() {
        let bot = bot();
        assert_eq!(bot.data().initial_channels(), [String::from("eye_motif")]);
        assert_eq!(bot.data().prefix(), data::COMMAND_PREFIX);
    }

    fn lines(raw: &[&str]) -> impl Stream<Item = Result<Message, irc::error::Error>> + Unpin {
        let messages = raw
            .iter()
            .map(|line| line.parse::<Message>().unwrap())
            .collect::<Vec<_>>();
        futures_util::stream::iter(messages.into_iter().map(Ok::<_, irc::error::Error>))
    }

    #[tokio::test]
    async fn rejected_login_is_an_error() {
        let mut dispatcher = dispatch::Dispatcher::new("eye___bot");
        let result = drive(
            &mut dispatcher,
            lines(&[":tmi.twitch.tv NOTICE * :Login authentication failed"]),
        )
        .await;
        assert!(matches!(
            result,
            Err(BotError::LoginFailed(Some(reason))) if reason == "Login authentication failed"
        ));
    }

    #[tokio::test]
    async fn closed_before_welcome_is_an_error() {
        let mut dispatcher = dispatch::Dispatcher::new("eye___bot");
        let result = drive(&mut dispatcher, lines(&[])).await;
        assert!(matches!(result, Err(BotError::LoginFailed(None))));
    }

    #[tokio::test]
    async fn closed_after_welcome_is_ok() {
        let mut dispatcher = dispatch::Dispatcher::new("eye___bot");
        let result = drive(
            &mut dispatcher,
            lines(&[
                ":tmi.twitch.tv 001 eye___bot :Welcome, GLHF!",
                "@id=abc;user-id=123 :ronni!ronni@ronni.tmi.twitch.tv PRIVMSG #eye_motif :hola",
            ]),
        )
        .await;
        assert!(result.is_ok());
        assert!(dispatcher.is_ready());
    }

    #[tokio::test]
    async fn shutdown_is_reported_as_close() {
        let mut bot = bot();
        bot.interface().shutdown().await;
        assert!(matches!(bot.error_listener.recv().await, Some(BotError::Close)));
    }

    #[tokio::test]
    async fn events_reach_the_handler() {
        let mut bot = bot();
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let handler = bot.on_event(move |event, _| {
            let _ = sender.send(event);
            async {}
        });
        let handler = tokio::spawn(handler);

        let message = "@id=abc;user-id=123 :ronni!ronni@ronni.tmi.twitch.tv PRIVMSG #eye_motif :hola"
            .parse()
            .unwrap();
        bot.dispatcher.dispatch(&message);

        let event = receiver.recv().await.unwrap();
        assert!(matches!(event, ChatEvent::Message { username, .. } if username == "ronni"));

        drop(bot);
        handler.await.unwrap();
    }

    #[tokio::test]
    async fn every_event_of_a_burst_reaches_the_handler() {
        let mut bot = bot();
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let handler = tokio::spawn(bot.on_event(move |event, _| {
            let _ = sender.send(event);
            async {}
        }));

        for n in 0..3 {
            let message = format!(
                "@id=m{n};user-id=123 :ronni!ronni@ronni.tmi.twitch.tv PRIVMSG #eye_motif :msg{n}"
            );
            bot.dispatcher.dispatch(&message.parse().unwrap());
        }
        drop(bot);
        handler.await.unwrap();

        let mut texts = Vec::new();
        while let Ok(ChatEvent::Message { text, .. }) = receiver.try_recv() {
            texts.push(text);
        }
        assert_eq!(texts, ["msg0", "msg1", "msg2"]);
    }
}

use crate::chat::data::{ChatEvent, SubscriptionKind};
use crate::chat::tag::{self, PRIVMSGTags, USERNOTICETags};
use irc::proto::{Command, Message, Response};
use tokio::sync::broadcast;

/// How many events may queue up for a slow consumer before it lags.
const EVENT_BUFFER: usize = 256;

pub(super) type ReadyHook = Box<dyn FnMut(&str) + Send>;

/// Turns incoming chat lines into ready notifications and [ChatEvent]s.
pub(super) struct Dispatcher {
    nick: String,
    ready: bool,
    on_ready: Option<ReadyHook>,
    /// The last `NOTICE` seen before the welcome, which is where Twitch
    /// explains a rejected login.
    login_notice: Option<String>,
    events: broadcast::Sender<ChatEvent>,
}

impl Dispatcher {
    pub(super) fn new(nick: &str) -> Self {
        Self {
            nick: nick.to_lowercase(),
            ready: false,
            on_ready: None,
            login_notice: None,
            events: broadcast::channel(EVENT_BUFFER).0,
        }
    }

    pub(super) fn set_on_ready(&mut self, hook: ReadyHook) {
        self.on_ready = Some(hook);
    }

    pub(super) fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.events.subscribe()
    }

    /// A sender publishing into the same event stream as chat.
    pub(super) fn publisher(&self) -> broadcast::Sender<ChatEvent> {
        self.events.clone()
    }

    pub(super) fn is_ready(&self) -> bool {
        self.ready
    }

    pub(super) fn login_notice(&self) -> Option<&str> {
        self.login_notice.as_deref()
    }

    /// Handles one message from the server, publishing the event it carries.
    pub(super) fn dispatch(&mut self, message: &Message) -> Option<ChatEvent> {
        let event = match &message.command {
            Command::Response(Response::RPL_WELCOME, args) => {
                let nick = args.first().cloned().unwrap_or_else(|| self.nick.clone());
                self.welcome(&nick);
                None
            }
            Command::NOTICE(_, text) if !self.ready => {
                log::debug!("Chat: Notice before welcome: {text}");
                self.login_notice = Some(text.clone());
                None
            }
            Command::PRIVMSG(target, text) => self.chat_message(message, target, text),
            Command::Raw(command, args) if command == "USERNOTICE" => {
                Dispatcher::user_notice(message, args)
            }
            _ => None,
        }?;

        log::trace!("Chat: {event}");
        let _ = self.events.send(event.clone());
        Some(event)
    }

    fn welcome(&mut self, nick: &str) {
        if self.ready {
            return;
        }
        self.ready = true;
        log::debug!("Chat: Welcomed as {nick}");

        if let Some(on_ready) = self.on_ready.as_mut() {
            on_ready(nick);
        }
    }

    fn chat_message(&self, message: &Message, target: &str, text: &str) -> Option<ChatEvent> {
        let username = message.source_nickname()?;
        if username.eq_ignore_ascii_case(&self.nick) {
            return None;
        }
        let tags = tag::tags::<PRIVMSGTags>(message.tags.as_deref()?)?;
        let channel = String::from(target.trim_start_matches('#'));
        let username = String::from(username);
        let text = String::from(text);

        Some(match tags.bits {
            Some(bits) => ChatEvent::Bits {
                channel,
                username,
                bits,
                text,
            },
            None => ChatEvent::Message {
                channel,
                username,
                text,
                is_subscriber: tags.subscriber,
                is_moderator: tags.is_mod,
            },
        })
    }

    fn user_notice(message: &Message, args: &[String]) -> Option<ChatEvent> {
        let tags = tag::tags::<USERNOTICETags>(message.tags.as_deref()?)?;
        let kind = SubscriptionKind::from_msg_id(&tags.msg_id)?;
        let sub = tags.sub?;
        let channel = String::from(args.first()?.trim_start_matches('#'));

        Some(ChatEvent::Subscription {
            channel,
            username: tags.login,
            kind,
            months: sub.months,
            recipient: sub.gift_target,
            text: args.get(1).cloned(),
        })
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("nick", &self.nick)
            .field("ready", &self.ready)
            .field("on_ready", &self.on_ready.is_some())
            .field("login_notice", &self.login_notice)
            .finish()
    }
}

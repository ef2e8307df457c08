use clap::Parser;
use std::process::ExitCode;

mod auth;
mod bot;
mod chat;
mod cli;
mod eventsub;
mod logging;
mod options;
mod reaction;
mod twitch;
mod window;

const OAUTH_RESPONSE_PATH: &str = "/response";

fn token_store(path: Option<String>) -> Result<auth::access::TokenStore, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(auth::access::TokenStore::new(path)),
        None => auth::access::TokenStore::default_store()
            .ok_or_else(|| "No home directory for the token store. Pass --store.".into()),
    }
}

#[tokio::main]
async fn run_login(
    client: auth::access::ClientCredentials,
    port: u16,
    store: auth::access::TokenStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let server = auth::oauth::OAuthServerData {
        client_id: client.client_id.clone(),
        scopes: auth::SCOPES.into_iter().map(String::from).collect(),
        host_address: format!("localhost:{port}"),
        response_path: String::from(OAUTH_RESPONSE_PATH),
    };
    let redirect_url = server.redirect_url();

    println!("Open http://localhost:{port}/ in a browser to log in to Twitch.");
    let code = auth::oauth::OAuthServer::start_auth(server)
        .into_inner()
        .await??;

    let tokens = auth::access::exchange_code(&client, &code, &redirect_url).await?;
    store.write(&tokens)?;
    let info = tokens.access.validate().await?;
    println!(
        "Logged in as {}. Tokens saved to {}",
        info.login,
        store.path().display()
    );
    Ok(())
}

/// The bot's token, from the command line or else from the token store. A
/// stored token is always validated, and refreshed if it expired and the
/// client credentials are known.
async fn load_token(
    token: Option<String>,
    validate: bool,
    store: &auth::access::TokenStore,
    client: Option<&auth::access::ClientCredentials>,
) -> Result<(auth::AccessToken, Option<auth::token::TokenInfo>), Box<dyn std::error::Error>> {
    if let Some(token) = token {
        let token = auth::AccessToken::new(token);
        let info = if validate {
            log::debug!("Auth: Validating access token");
            Some(token.validate().await?)
        } else {
            None
        };
        return Ok((token, info));
    }

    log::debug!("Auth: Reading tokens from {}", store.path().display());
    let tokens = store.read()?;
    match tokens.access.validate().await {
        Ok(info) => Ok((tokens.access, Some(info))),
        Err(auth::error::AuthError::InvalidToken) => {
            let Some(client) = client else {
                return Err(
                    "The stored access token expired. Pass --client-id and --client-secret to refresh it."
                        .into(),
                );
            };
            log::info!("Auth: Refreshing the stored access token");
            let tokens = auth::access::refresh(client, &tokens.refresh).await?;
            store.write(&tokens)?;
            let info = tokens.access.validate().await?;
            Ok((tokens.access, Some(info)))
        }
        Err(err) => Err(err.into()),
    }
}

#[tokio::main]
async fn run_bot(
    token: Option<String>,
    channel: String,
    nick: Option<String>,
    client: Option<auth::access::ClientCredentials>,
    store: auth::access::TokenStore,
    options: options::Options,
) -> Result<(), Box<dyn std::error::Error>> {
    let (token, info) = load_token(token, nick.is_none(), &store, client.as_ref()).await?;

    if let Some(info) = &info {
        log::debug!(
            "Auth: Token belongs to {} ({}), issued to client {}, expires in {}s",
            info.login,
            info.user_id,
            info.client_id,
            info.expires_in
        );
        if !info.can_read_chat() {
            log::warn!("Auth: Token is missing the chat:read scope");
        }
    }

    let nick = match (nick, &info) {
        (Some(nick), _) => nick,
        (None, Some(info)) => info.login.clone(),
        (None, None) => return Err("No nickname to log in with. Pass --nick.".into()),
    };

    let mut bot = bot::Bot::new(bot::data::BotData::new(token.clone(), channel, nick));
    bot.on_ready(|nick| {
        let message = bot::ready_message(nick);
        log::info!("{message}");
        println!("{message}");
    });

    match &info {
        Some(info) if options.exec.follows => {
            if bot.data().chat_data().channel == info.login {
                bot.follow_events(eventsub::data::EventsubClientData {
                    auth: twitch::HelixAuth {
                        client_id: info.client_id.clone(),
                        token,
                    },
                    broadcaster: eventsub::data::Broadcaster {
                        user_id: info.user_id.clone(),
                        login: info.login.clone(),
                    },
                });
            } else {
                log::info!("Eventsub: Follows are only reported with the channel owner's token");
            }
        }
        _ => (),
    }

    let log_chat = options.exec.log_chat;
    let prefix = String::from(bot.data().prefix());
    let events = tokio::spawn(bot.on_event(move |event, _| {
        if log_chat {
            log::info!("{event}");
        }
        if let Some(reaction) = reaction::Reaction::from_event(&event, &prefix) {
            log::info!("Reaction: {reaction}");
        }
        async {}
    }));

    let interface = bot.interface();
    let ctrl_c = async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Shutting down...");
            interface.shutdown().await;
        }
    };

    log::info!(
        "Joining #{} as {} (command prefix {:?})",
        bot.data().initial_channels().join(", #"),
        bot.data().nick(),
        bot.data().prefix()
    );
    tokio::spawn(ctrl_c);
    let result = bot.run().await;
    if events.await.is_err() {
        log::warn!("Bot: Event handler stopped early");
    }
    log::info!("Reaction: {}", reaction::Reaction::Default);

    match result {
        Ok(()) | Err(bot::error::BotError::Close) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::Cli::parse();
    let options = options::Options::load(args.options_file.as_deref())?;
    logging::init_logging(&options);

    match args.command {
        cli::Command::Window => {
            window::launch(&options).map_err(|err| format!("Failed to launch GUI: {err}"))?;
            log::debug!("Window closed.");
            Ok(())
        }
        cli::Command::Login {
            client_id,
            client_secret,
            port,
        } => run_login(
            auth::access::ClientCredentials {
                client_id,
                client_secret,
            },
            port,
            token_store(args.store)?,
        ),
        cli::Command::Bot {
            token,
            channel,
            nick,
            client_id,
            client_secret,
        } => {
            let client = match (client_id, client_secret) {
                (Some(client_id), Some(client_secret)) => Some(auth::access::ClientCredentials {
                    client_id,
                    client_secret,
                }),
                _ => None,
            };
            run_bot(
                token,
                channel,
                nick,
                client,
                token_store(args.store)?,
                options,
            )
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

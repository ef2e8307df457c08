use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pngtuber")]
#[command(author, version)]
#[command(about = "A PNGTuber companion window and Twitch chat bot.")]
pub struct Cli {
    #[arg(short = 'o', long = "options-file")]
    pub options_file: Option<String>,
    /// Where `login` keeps the Twitch tokens. Defaults to ~/.pngtuber_tokens.
    #[arg(long)]
    pub store: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Opens the PNGTuber window.
    Window,
    /// Logs in to Twitch in the browser and stores the tokens for `bot`.
    Login {
        #[arg(short = 'i', long, env = "TWITCH_CLIENT_ID")]
        client_id: String,
        #[arg(short = 's', long, env = "TWITCH_CLIENT_SECRET", hide_env_values = true)]
        client_secret: String,
        /// Port of the local login page. The application's redirect URL must
        /// be http://localhost:<port>/response.
        #[arg(short = 'p', long, default_value_t = 3000)]
        port: u16,
    },
    /// Connects the chat bot to a Twitch channel.
    Bot {
        /// Uses the stored tokens from `login` if not given.
        #[arg(short = 't', long, env = "TWITCH_TOKEN", hide_env_values = true)]
        token: Option<String>,
        #[arg(short = 'c', long, env = "TWITCH_CHANNEL")]
        channel: String,
        /// Skips token validation and logs in under this name. Follows are
        /// not reported.
        #[arg(short = 'n', long)]
        nick: Option<String>,
        /// Lets an expired stored token be refreshed.
        #[arg(short = 'i', long, env = "TWITCH_CLIENT_ID")]
        client_id: Option<String>,
        #[arg(short = 's', long, env = "TWITCH_CLIENT_SECRET", hide_env_values = true)]
        client_secret: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bot_subcommand() {
        let cli = Cli::parse_from([
            "pngtuber", "bot", "--token", "abc", "--channel", "eye_motif",
        ]);
        let Command::Bot {
            token,
            channel,
            nick,
            ..
        } = cli.command
        else {
            panic!("expected bot subcommand");
        };
        assert_eq!(token.as_deref(), Some("abc"));
        assert_eq!(channel, "eye_motif");
        assert!(nick.is_none());
    }

    #[test]
    fn parses_window_with_options_file() {
        let cli = Cli::parse_from(["pngtuber", "-o", "opts.toml", "window"]);
        assert!(matches!(cli.command, Command::Window));
        assert_eq!(cli.options_file.as_deref(), Some("opts.toml"));
    }

    #[test]
    fn parses_login_with_default_port() {
        let cli = Cli::parse_from([
            "pngtuber",
            "--store",
            "tokens",
            "login",
            "--client-id",
            "id",
            "--client-secret",
            "secret",
        ]);
        let Command::Login {
            client_id,
            client_secret,
            port,
        } = cli.command
        else {
            panic!("expected login subcommand");
        };
        assert_eq!(client_id, "id");
        assert_eq!(client_secret, "secret");
        assert_eq!(port, 3000);
        assert_eq!(cli.store.as_deref(), Some("tokens"));
    }
}

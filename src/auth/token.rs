use super::error::AuthError;
use crate::twitch::{self, TwitchError};
use serde::Deserialize;

const VALIDATE_URL: &str = "https://id.twitch.tv/oauth2/validate";
const IRC_TOKEN_PREFIX: &str = "oauth:";
const CHAT_READ_SCOPE: &str = "chat:read";

/// A user Access Token for Twitch chat.
///
/// Accepts tokens with or without the `oauth:` prefix used by IRC.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

/// What Twitch reports about a valid [AccessToken].
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub client_id: String,
    pub login: String,
    pub user_id: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    pub expires_in: u64,
}

impl TokenInfo {
    /// Whether the token may read chat. Twitch rejects the chat login
    /// otherwise.
    #[must_use]
    pub fn can_read_chat(&self) -> bool {
        self.scopes.iter().any(|scope| scope == CHAT_READ_SCOPE)
    }
}

impl AccessToken {
    pub fn new<S: AsRef<str>>(raw: S) -> Self {
        let raw = raw.as_ref().trim();
        AccessToken(String::from(
            raw.strip_prefix(IRC_TOKEN_PREFIX).unwrap_or(raw),
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The token as sent with `PASS` when logging in to chat.
    #[must_use]
    pub fn irc_password(&self) -> String {
        format!("{IRC_TOKEN_PREFIX}{}", self.0)
    }

    /// Sends a validation request to Twitch and returns the token's owner.
    ///
    /// # Errors
    /// Returns `Err(AuthError...)`:
    /// * `::Net` if a response was not received from Twitch.
    /// * `::InvalidToken` if Twitch reports the token as invalid.
    /// * `::OnValidate` if Twitch denied the request for any other reason.
    /// * `::BadData` if a response from Twitch could not be parsed.
    pub async fn validate(&self) -> Result<TokenInfo, AuthError> {
        let response = reqwest::Client::new()
            .get(VALIDATE_URL)
            .header("Authorization", format!("OAuth {}", self.as_str()))
            .send()
            .await
            .map_err(AuthError::Net)?
            .text()
            .await
            .map_err(AuthError::Net)?;

        parse_validation(&response)
    }
}

fn parse_validation(response: &str) -> Result<TokenInfo, AuthError> {
    match twitch::parse_twitch(response, AuthError::OnValidate, AuthError::BadData) {
        Err(AuthError::OnValidate(TwitchError {
            error: _,
            status: 401,
            message,
        })) if message == "invalid access token" => Err(AuthError::InvalidToken),
        result => result,
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_irc_prefix() {
        assert_eq!(AccessToken::new("oauth:abc123").as_str(), "abc123");
        assert_eq!(AccessToken::new(" abc123\n").as_str(), "abc123");
    }

    #[test]
    fn irc_password_always_has_one_prefix() {
        assert_eq!(AccessToken::new("abc123").irc_password(), "oauth:abc123");
        assert_eq!(
            AccessToken::new("oauth:abc123").irc_password(),
            "oauth:abc123"
        );
    }

    #[test]
    fn debug_hides_token() {
        assert_eq!(
            format!("{:?}", AccessToken::new("secret")),
            "AccessToken(..)"
        );
    }

    #[test]
    fn parses_validation_response() {
        let info = parse_validation(
            r#"{"client_id":"wbmytr93xzw8zbg0p1izqyzzc5mbiz","login":"twitchdev","scopes":["chat:read","chat:edit"],"user_id":"141981764","expires_in":5520838}"#,
        )
        .unwrap();
        assert_eq!(info.login, "twitchdev");
        assert_eq!(info.user_id, "141981764");
        assert_eq!(info.scopes, ["chat:read", "chat:edit"]);
        assert!(info.can_read_chat());
    }

    #[test]
    fn missing_scopes_cannot_read_chat() {
        let info = parse_validation(
            r#"{"client_id":"abc","login":"twitchdev","user_id":"1","expires_in":60}"#,
        )
        .unwrap();
        assert!(info.scopes.is_empty());
        assert!(!info.can_read_chat());
    }

    #[test]
    fn invalid_token_is_distinguished() {
        assert!(matches!(
            parse_validation(r#"{"status":401,"message":"invalid access token"}"#),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            parse_validation(r#"{"status":400,"message":"missing authorization token"}"#),
            Err(AuthError::OnValidate(TwitchError { status: 400, .. }))
        ));
        assert!(matches!(
            parse_validation("not json"),
            Err(AuthError::BadData(_))
        ));
    }
}

//! Requesting, refreshing and storing Access Tokens.
use super::error::AuthError;
use super::oauth::OAuthCode;
use super::AccessToken;
use crate::twitch::{self, TwitchError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
const DEFAULT_TOKEN_STORE: &str = ".pngtuber_tokens";

/// A registered Twitch application.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// An Access Token and the Refresh Token that renews it.
#[derive(Clone, PartialEq, Eq)]
pub struct Tokens {
    pub access: AccessToken,
    pub refresh: String,
}

#[derive(Debug, Deserialize)]
struct TokenRequestResponse {
    access_token: String,
    refresh_token: String,
}

/// Where [Tokens] are kept between runs, as `<access> <refresh>`.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl Tokens {
    fn parse(contents: &str) -> Option<Self> {
        let (access, refresh) = contents.trim().split_once(' ')?;
        Some(Tokens {
            access: AccessToken::new(access),
            refresh: String::from(refresh.trim()),
        })
    }
}

impl From<TokenRequestResponse> for Tokens {
    fn from(value: TokenRequestResponse) -> Self {
        Tokens {
            access: AccessToken::new(value.access_token),
            refresh: value.refresh_token,
        }
    }
}

impl std::fmt::Debug for Tokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Tokens(..)")
    }
}

/// Trades the code from an OAuth login for new tokens.
///
/// # Errors
/// Returns `Err(AuthError...)`:
/// * `::Net` if a response was not received from Twitch.
/// * `::OnRequest` if Twitch denied the request.
/// * `::BadData` if a response from Twitch could not be parsed.
pub async fn exchange_code(
    client: &ClientCredentials,
    code: &OAuthCode,
    redirect_url: &str,
) -> Result<Tokens, AuthError> {
    let response = reqwest::Client::new()
        .post(TOKEN_URL)
        .query(&[
            ("client_id", client.client_id.as_str()),
            ("client_secret", client.client_secret.as_str()),
            ("code", code.as_str()),
            ("grant_type", "authorization_code"),
            ("redirect_uri", redirect_url),
        ])
        .send()
        .await
        .map_err(AuthError::Net)?
        .text()
        .await
        .map_err(AuthError::Net)?;

    parse_tokens(&response, AuthError::OnRequest)
}

/// Trades a Refresh Token for new tokens.
///
/// # Errors
/// Returns `Err(AuthError...)`:
/// * `::Net` if a response was not received from Twitch.
/// * `::OnRefresh` if Twitch denied the request.
/// * `::BadData` if a response from Twitch could not be parsed.
pub async fn refresh(
    client: &ClientCredentials,
    refresh_token: &str,
) -> Result<Tokens, AuthError> {
    let response = reqwest::Client::new()
        .post(TOKEN_URL)
        .query(&[
            ("client_id", client.client_id.as_str()),
            ("client_secret", client.client_secret.as_str()),
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await
        .map_err(AuthError::Net)?
        .text()
        .await
        .map_err(AuthError::Net)?;

    parse_tokens(&response, AuthError::OnRefresh)
}

fn parse_tokens(
    response: &str,
    major_err: impl FnOnce(TwitchError) -> AuthError,
) -> Result<Tokens, AuthError> {
    twitch::parse_twitch::<TokenRequestResponse, _>(response, major_err, AuthError::BadData)
        .map(Tokens::from)
}

impl TokenStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// `~/.pngtuber_tokens`, if there is a home directory.
    #[must_use]
    pub fn default_store() -> Option<Self> {
        home::home_dir().map(|home| TokenStore::new(home.join(DEFAULT_TOKEN_STORE)))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// # Errors
    /// Returns `Err(AuthError...)`:
    /// * `::InvalidTokens` if the store does not exist or is malformed.
    /// * `::IO` if the store could not be read.
    pub fn read(&self) -> Result<Tokens, AuthError> {
        if !self.path.try_exists()? {
            return Err(AuthError::InvalidTokens);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Tokens::parse(&contents).ok_or(AuthError::InvalidTokens)
    }

    pub fn write(&self, tokens: &Tokens) -> Result<(), AuthError> {
        std::fs::write(
            &self.path,
            format!("{} {}", tokens.access.as_str(), tokens.refresh),
        )?;
        Ok(())
    }
}

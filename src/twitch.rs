use crate::auth::AccessToken;
use serde::Deserialize;

/// Credentials for calls to the Helix API.
#[derive(Debug, Clone)]
pub struct HelixAuth {
    pub client_id: String,
    pub token: AccessToken,
}

impl HelixAuth {
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token.as_str())
    }
}

/// An error body as returned by the Twitch API.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TwitchError {
    pub error: Option<String>,
    pub status: u16,
    pub message: String,
}

/// Parses a Twitch response body as `T`, turning a Twitch error body into
/// `major_err`.
pub fn parse_twitch<T: serde::de::DeserializeOwned, E>(
    data: &str,
    major_err: impl FnOnce(TwitchError) -> E,
    bad_data: impl FnOnce(serde_json::Error) -> E,
) -> Result<T, E> {
    match serde_json::from_str(data) {
        Ok(data) => Ok(data),
        Err(err) => match serde_json::from_str::<TwitchError>(data) {
            Ok(err) => Err(major_err(err)),
            Err(_) => Err(bad_data(err)),
        },
    }
}

impl std::fmt::Display for TwitchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let error = if let Some(error) = &self.error {
            format!(" {error}")
        } else {
            String::new()
        };
        f.write_fmt(format_args!(
            "Twitch error {}{}: {}",
            self.status, error, self.message,
        ))
    }
}
impl std::error::Error for TwitchError {}

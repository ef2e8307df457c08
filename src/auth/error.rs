use crate::twitch::TwitchError;

/// An Error returned by the [OAuth server](super::oauth).
#[derive(Debug)]
pub enum OAuthServerError {
    /// An error returned when the server is first being created.
    OnServerCreate(Box<dyn std::error::Error + Send + Sync>),
    /// An error returned when the server is receiving a request.
    OnReceive(std::io::Error),
    /// An error returned when the server is sending a response.
    OnResponse(std::io::Error),
    /// An error returned if the user or Twitch refused the login.
    OnAuth {
        error: String,
        error_description: String,
    },
    /// An error generating random data.
    Ring(ring::error::Unspecified),
}

/// An Error returned while validating, requesting or refreshing Access Tokens.
#[derive(Debug)]
pub enum AuthError {
    /// An error returned while making a GET or POST request.
    Net(reqwest::Error),
    /// An error returned if the data from Twitch could not be deserialized.
    BadData(serde_json::Error),
    /// An error returned if Twitch rejected the validation request.
    OnValidate(TwitchError),
    /// An error returned if Twitch reports the token as invalid or expired.
    InvalidToken,
    /// An error returned while exchanging an OAuth code for tokens.
    OnRequest(TwitchError),
    /// An error returned while refreshing an Access Token.
    OnRefresh(TwitchError),
    /// An error returned if the token store is missing or malformed.
    InvalidTokens,
    /// An error returned while trying to read/write the token store.
    IO(std::io::Error),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::Net(err) => {
                f.write_fmt(format_args!("Error sending a request to Twitch: {err}"))
            }
            AuthError::BadData(err) => {
                f.write_fmt(format_args!("Error parsing a response from Twitch: {err}"))
            }
            AuthError::OnValidate(err) => f.write_fmt(format_args!(
                "Error {} validating an Access Token: {}",
                err.status, err.message
            )),
            AuthError::InvalidToken => f.write_str("The given Access Token is invalid or expired."),
            AuthError::OnRequest(err) => f.write_fmt(format_args!(
                "Error {} requesting an Access Token from Twitch: {}",
                err.status, err.message
            )),
            AuthError::OnRefresh(err) => f.write_fmt(format_args!(
                "Error {} refreshing an Access Token: {}",
                err.status, err.message
            )),
            AuthError::InvalidTokens => f.write_str(
                "No usable tokens were stored. Log in with `pngtuber login` or pass --token.",
            ),
            AuthError::IO(err) => f.write_fmt(format_args!(
                "Error accessing the token store file: {err}"
            )),
        }
    }
}
impl std::error::Error for AuthError {}
impl From<std::io::Error> for AuthError {
    fn from(value: std::io::Error) -> Self {
        AuthError::IO(value)
    }
}

impl std::fmt::Display for OAuthServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OAuthServerError::OnServerCreate(err) => f.write_fmt(format_args!(
                "Error while creating the authentication server: {err}"
            )),
            OAuthServerError::OnReceive(err) => f.write_fmt(format_args!(
                "Error while trying to receive a request to the server: {err}"
            )),
            OAuthServerError::OnResponse(err) => f.write_fmt(format_args!(
                "Error while trying to send a response from the server: {err}"
            )),
            OAuthServerError::OnAuth {
                error,
                error_description,
            } => f.write_fmt(format_args!(
                "Error {error} while logging in to Twitch: {error_description}"
            )),
            OAuthServerError::Ring(err) => {
                f.write_fmt(format_args!("Error while creating random data: {err}"))
            }
        }
    }
}
impl std::error::Error for OAuthServerError {}

//! A local HTTP server that walks the user through Twitch's OAuth
//! authorization-code login.
use super::error::OAuthServerError;
use ring::rand::SecureRandom;
use std::collections::HashMap;
use tiny_http::{Header, Response, StatusCode};
use tokio::task::JoinHandle;

const AUTHORIZE_URL: &str = "https://id.twitch.tv/oauth2/authorize";

/// The code Twitch hands back after the user accepts the login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthCode(String);

impl OAuthCode {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct OAuthServerData {
    pub client_id: String,
    pub scopes: Vec<String>,
    /// Address the server listens on, such as `localhost:3000`.
    pub host_address: String,
    /// Path Twitch redirects back to, such as `/response`.
    pub response_path: String,
}

#[derive(Debug)]
pub struct OAuthServer {
    join_handle: JoinHandle<Result<OAuthCode, OAuthServerError>>,
}

/// What to do with one request to the server.
#[derive(Debug, PartialEq, Eq)]
enum Route {
    /// Send the user on to Twitch.
    Authorize,
    Code(OAuthCode),
    Denied {
        error: String,
        error_description: String,
    },
    Reject(u16, &'static str),
}

impl OAuthServerData {
    /// The `redirect_uri` registered for the application.
    #[must_use]
    pub fn redirect_url(&self) -> String {
        format!("http://{}{}", self.host_address, self.response_path)
    }
}

impl OAuthServer {
    /// Starts serving on a blocking thread. The server stops after the first
    /// login that succeeds or is refused.
    pub fn start_auth(data: OAuthServerData) -> Self {
        let join_handle = tokio::task::spawn_blocking(move || OAuthServer::host_auth(&data));
        OAuthServer { join_handle }
    }
    pub fn into_inner(self) -> JoinHandle<Result<OAuthCode, OAuthServerError>> {
        self.join_handle
    }

    fn host_auth(data: &OAuthServerData) -> Result<OAuthCode, OAuthServerError> {
        let server = tiny_http::Server::http(&data.host_address)
            .map_err(OAuthServerError::OnServerCreate)?;
        let rand = ring::rand::SystemRandom::new();
        let mut current_state = None;

        // https://docs.rs/ring/latest/ring/rand/struct.SystemRandom.html
        rand.fill(&mut []).map_err(OAuthServerError::Ring)?;

        loop {
            let request = server.recv().map_err(OAuthServerError::OnReceive)?;
            log::debug!("Auth: {} {}", request.method(), request.url());

            match route(request.url(), &data.response_path, current_state.as_deref()) {
                Route::Authorize => {
                    let state = new_state(&rand).map_err(OAuthServerError::Ring)?;
                    let url = authorize_url(data, &state);
                    current_state = Some(state);
                    request.respond(
                        Response::from_string("Redirecting...")
                            .with_status_code(StatusCode(308))
                            .with_header(header("Location", &url)?),
                    )
                }
                Route::Code(code) => {
                    request
                        .respond(plain(200, "Success! You can close this window."))
                        .map_err(OAuthServerError::OnResponse)?;
                    return Ok(code);
                }
                Route::Denied {
                    error,
                    error_description,
                } => {
                    request
                        .respond(plain(500, "Twitch error."))
                        .map_err(OAuthServerError::OnResponse)?;
                    return Err(OAuthServerError::OnAuth {
                        error,
                        error_description,
                    });
                }
                Route::Reject(code, description) => request.respond(plain(code, description)),
            }
            .map_err(OAuthServerError::OnResponse)?;
        }
    }
}

fn route(url: &str, response_path: &str, current_state: Option<&str>) -> Route {
    if url == "/" {
        return Route::Authorize;
    }
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    if path != response_path {
        return Route::Reject(404, "Not found.");
    }

    let Some(params) = parse_url_params(query) else {
        return Route::Reject(400, "Invalid response.");
    };
    let Some(current_state) = current_state else {
        return Route::Reject(403, "Invalid state.");
    };
    if params.get("state").map(String::as_str) != Some(current_state) {
        return Route::Reject(403, "Invalid state.");
    }

    if let Some(code) = params.get("code") {
        return Route::Code(OAuthCode(code.clone()));
    }
    match (params.get("error"), params.get("error_description")) {
        (Some(error), Some(error_description)) => Route::Denied {
            error: decode(error),
            error_description: decode(error_description),
        },
        _ => Route::Reject(400, "Invalid response."),
    }
}

fn authorize_url(data: &OAuthServerData, state: &str) -> String {
    format!(
        "{AUTHORIZE_URL}?response_type=code&force_verify=true&client_id={}&redirect_uri={}&state={state}&scope={}",
        data.client_id,
        urlencoding::encode(&data.redirect_url()),
        urlencoding::encode(&data.scopes.join(" "))
    )
}

fn new_state(rng: &ring::rand::SystemRandom) -> Result<String, ring::error::Unspecified> {
    let mut buf = [0; 32];
    rng.fill(&mut buf)?;
    Ok(buf.into_iter().map(|byte| format!("{byte:02x}")).collect())
}

fn parse_url_params(params: &str) -> Option<HashMap<String, String>> {
    params
        .split('&')
        .map(|param| param.split_once('='))
        .map(|maybe_param| maybe_param.map(|(k, v)| (String::from(k), String::from(v))))
        .collect()
}

fn decode(value: &str) -> String {
    let value = value.replace('+', " ");
    match urlencoding::decode(&value) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value,
    }
}

fn header(field: &str, value: &str) -> Result<Header, OAuthServerError> {
    Header::from_bytes(field.as_bytes(), value.as_bytes())
        .map_err(|()| OAuthServerError::OnResponse(std::io::ErrorKind::InvalidInput.into()))
}

fn plain(code: u16, description: &str) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string(description).with_status_code(StatusCode(code))
}

//! Twitch Access Tokens: logging in over OAuth, storing and refreshing
//! tokens, and validating them.
pub mod access;
pub mod error;
pub mod oauth;
pub mod token;

pub use token::AccessToken;

/// What the bot asks for: reading chat, and seeing follows over EventSub.
pub const SCOPES: [&str; 2] = ["chat:read", "moderator:read:followers"];

//! New-follower notifications over Twitch EventSub, which chat does not carry.
pub mod client;
pub mod data;
pub mod error;
mod outbound;
pub mod subscription;

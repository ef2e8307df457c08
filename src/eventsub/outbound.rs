use super::data::SubscriptionStatus;
use super::error::EventsubError;
use super::subscription::{Subscription, SubscriptionRequest};
use crate::twitch::{self, HelixAuth};
use serde::Deserialize;

const SUBSCRIPTIONS_URL: &str = "https://api.twitch.tv/helix/eventsub/subscriptions";

#[derive(Debug, Deserialize)]
struct CreatedSubscriptions {
    data: Vec<SubscriptionStatus>,
}

// Only works for the channel the token belongs to.
pub async fn send_subscription(
    subscription: &Subscription,
    session_id: &str,
    auth: &HelixAuth,
) -> Result<(), EventsubError> {
    let body = serde_json::to_string(&SubscriptionRequest::websocket(subscription, session_id))
        .map_err(EventsubError::BadData)?;

    let response = reqwest::Client::new()
        .post(SUBSCRIPTIONS_URL)
        .header("Content-Type", "application/json")
        .header("Client-Id", &auth.client_id)
        .header("Authorization", auth.bearer())
        .body(body)
        .send()
        .await
        .map_err(EventsubError::OnOutbound)?
        .text()
        .await
        .map_err(EventsubError::OnOutbound)?;

    let created = parse_created(&response)?;
    for status in created.data {
        log::debug!("Eventsub: Subscribed to {} ({})", status.kind, status.status);
    }
    Ok(())
}

fn parse_created(response: &str) -> Result<CreatedSubscriptions, EventsubError> {
    twitch::parse_twitch(response, EventsubError::Twitch, EventsubError::BadData)
}

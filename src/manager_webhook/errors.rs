use std::fmt::{Display, Formatter};
use ureq::Error;


pub enum WebhookError {
    Document(String),
    Delivery(String),
}

impl Display for WebhookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            WebhookError::Document(e) => write!(f, "WebhookError::Document: {}", e),
            WebhookError::Delivery(e) => write!(f, "WebhookError::Delivery: {}", e),
        }
    }
}
impl From<serde_json::Error> for WebhookError {
    fn from(e: serde_json::Error) -> Self { WebhookError::Document(e.to_string()) }
}
impl From<Error> for WebhookError {
    fn from(e: Error) -> Self { WebhookError::Delivery(e.to_string()) }
}

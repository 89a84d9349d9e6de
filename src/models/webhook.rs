use serde::Serialize;

#[derive(Serialize)]
pub struct EmbedImage {
    pub url: String,
}

#[derive(Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

#[derive(Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
}

#[derive(Serialize)]
pub struct WebhookPayload {
    pub embeds: Vec<Embed>,
}

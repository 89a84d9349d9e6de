pub mod errors;

use std::time::Duration;
use ureq::Agent;
use crate::config::Location;
use crate::manager_webhook::errors::WebhookError;
use crate::models::webhook::{Embed, EmbedFooter, EmbedImage, WebhookPayload};

/// One configured delivery channel for rendered reports
pub struct Webhook {
    agent: Agent,
    url: String,
}

impl Webhook {
    /// Returns a new instance of the Webhook struct
    ///
    /// # Arguments
    ///
    /// * 'id' - the webhook id
    /// * 'token' - the webhook token
    pub fn new(id: &str, token: &str) -> Webhook {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build();

        let agent = config.into();

        Self {
            agent,
            url: format!("https://discord.com/api/webhooks/{}/{}", id, token),
        }
    }

    /// Delivers a rendered report as one embed, decorated with the location's
    /// display attributes
    ///
    /// # Arguments
    ///
    /// * 'title' - the report title
    /// * 'lines' - the rendered report lines
    /// * 'timestamp' - report time as an ISO 8601 string
    /// * 'location' - the location whose display attributes to apply
    pub fn send_report(
        &self,
        title: &str,
        lines: &[String],
        timestamp: &str,
        location: &Location) -> Result<(), WebhookError> {

        let embed = Embed {
            title: title.to_string(),
            description: lines.join("\n"),
            timestamp: timestamp.to_string(),
            color: location.color,
            image: location.image.clone().map(|url| EmbedImage { url }),
            footer: location.footer.clone().map(|text| EmbedFooter { text }),
        };

        let payload = WebhookPayload { embeds: vec![embed] };
        let json = serde_json::to_string(&payload)?;

        let _ = self.agent
            .post(&self.url)
            .content_type("application/json")
            .send(json)?;

        Ok(())
    }
}

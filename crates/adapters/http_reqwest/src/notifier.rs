//! Push notifications through an ntfy-compatible topic URL.
//!
//! The message is the plain-text body; title and priority travel as headers.

use hearthmode_app::ports::{Notifier, NotifyError, Priority};

use crate::endpoint::Endpoint;

const TITLE: &str = "hearthmode";

pub struct NtfyNotifier {
    endpoint: Endpoint,
}

impl NtfyNotifier {
    /// `endpoint` is the full topic URL, e.g. `https://ntfy.sh/my-house`.
    #[must_use]
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }
}

fn priority_header(priority: Priority) -> &'static str {
    match priority {
        Priority::Normal => "default",
        Priority::High => "high",
    }
}

impl Notifier for NtfyNotifier {
    async fn send(&self, message: &str, priority: Priority) -> Result<(), NotifyError> {
        let request = self
            .endpoint
            .post("")
            .header("Title", TITLE)
            .header("Priority", priority_header(priority))
            .body(message.to_string());
        Endpoint::send(request).await?;
        tracing::debug!(%priority, "notification delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::DEFAULT_TIMEOUT;
    use mockito::Server;

    fn notifier(url: String, token: Option<&str>) -> NtfyNotifier {
        NtfyNotifier::new(
            Endpoint::new(url, token.map(str::to_string), DEFAULT_TIMEOUT).unwrap(),
        )
    }

    #[tokio::test]
    async fn should_post_message_with_priority() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/house")
            .match_header("authorization", "Bearer tk_123")
            .match_header("priority", "high")
            .match_header("title", "hearthmode")
            .match_body("Away mode FAILED: lamp (timeout)")
            .with_status(200)
            .create_async()
            .await;

        notifier(format!("{}/house", server.url()), Some("tk_123"))
            .send("Away mode FAILED: lamp (timeout)", Priority::High)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn should_report_rejection() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/house")
            .with_status(403)
            .create_async()
            .await;

        let err = notifier(format!("{}/house", server.url()), None)
            .send("Comfort mode: thermostat 70°F", Priority::Normal)
            .await
            .unwrap_err();

        assert!(matches!(err, NotifyError::Rejected(403)));
    }
}

//! Mock render service

use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Stand-in for the remote render endpoint
pub struct MockRenderService {
    pub server: MockServer,
}

impl MockRenderService {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Answer uploads of `filename` with 200 and `image`
    pub async fn render_ok(&self, filename: &str, image: &[u8]) {
        Mock::given(method("POST"))
            .and(path("/render"))
            .and(body_string_contains(format!("filename=\"{}\"", filename)))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(image.to_vec()))
            .mount(&self.server)
            .await;
    }

    /// Answer uploads of `filename` with `status` and a text body
    pub async fn render_error(&self, filename: &str, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path("/render"))
            .and(body_string_contains(format!("filename=\"{}\"", filename)))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Query strings of every request received so far
    pub async fn queries(&self) -> Vec<Option<String>> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| r.url.query().map(str::to_string))
            .collect()
    }
}

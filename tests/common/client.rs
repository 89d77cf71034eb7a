//! HTTP client for exercising a spawned portal.

/// Client with redirects disabled, so tests can observe the 303 a
/// successful form submission answers with.
pub struct TestClient {
    http: reqwest::Client,
    base_url: String,
}

impl TestClient {
    /// Creates a client against the given base URL.
    pub fn new(base_url: String) -> Self {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("failed to build test http client");
        Self { http, base_url }
    }

    /// Sends a GET request to `path`.
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.http
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("GET request failed")
    }

    /// Sends a urlencoded form POST to `path`. Repeated keys are preserved,
    /// matching how browsers submit checkbox groups.
    pub async fn post_form(&self, path: &str, pairs: &[(&str, &str)]) -> reqwest::Response {
        self.http
            .post(format!("{}{path}", self.base_url))
            .form(&pairs.to_vec())
            .send()
            .await
            .expect("POST request failed")
    }
}

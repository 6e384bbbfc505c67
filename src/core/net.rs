// src/core/net.rs
// Blocking HTTP GET. Non-2xx statuses surface as `ureq::Error::StatusCode`.

use std::time::Duration;

pub struct HttpClient {
    agent: ureq::Agent,
}

impl HttpClient {
    /// `timeout` of `None` waits indefinitely for each response.
    pub fn new(timeout: Option<Duration>) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .user_agent(concat!("seoul_market/", env!("CARGO_PKG_VERSION")))
            .build();
        Self { agent: ureq::Agent::new_with_config(config) }
    }

    pub fn get_text(&self, url: &str) -> Result<String, ureq::Error> {
        let response = self.agent.get(url).call()?;
        response.into_body().read_to_string()
    }
}

//! HTTP adapter for the scheduling backend.

use crate::error::BackendError;
use crate::payload::Payload;
use crate::schedule::BackendReply;
use crate::traits::SchedulingBackend;

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Blocking HTTP client for the scheduling service.
#[derive(Debug, Clone)]
pub struct SchedulerClient {
    config: SchedulerConfig,
    client: reqwest::blocking::Client,
}

impl SchedulerClient {
    pub fn new(config: SchedulerConfig) -> Result<Self, BackendError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl SchedulingBackend for SchedulerClient {
    fn schedule(&self, payload: &Payload) -> Result<BackendReply, BackendError> {
        let url = format!("{}/schedule", self.config.base_url);

        let reply = self
            .client
            .post(url)
            .json(payload)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<BackendReply>())?;

        Ok(reply)
    }
}

use anyhow::{anyhow, Result};
use reqwest::header::ACCEPT;
use serde::Deserialize;

/// Reply from the Answer Service. The `answer` field is optional on the
/// wire; callers decide what a missing answer means.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerReply {
    pub answer: Option<String>,
}

/// HTTP client for the DataMind Answer Service
#[derive(Clone)]
pub struct AnswerClient {
    client: reqwest::Client,
    base_url: String,
}

impl AnswerClient {
    pub fn new(base_url: &str) -> Self {
        // No request timeout: a query runs to completion or failure.
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[allow(dead_code)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the service a question and decode its JSON reply.
    ///
    /// Any non-2xx status, transport failure, or undecodable body is an
    /// error; a 2xx body without an `answer` field is a valid reply.
    pub async fn ask(&self, query: &str) -> Result<AnswerReply> {
        let url = format!("{}/ask", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query)])
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "answer service returned status {}",
                response.status()
            ));
        }

        let reply: AnswerReply = response.json().await?;
        Ok(reply)
    }
}

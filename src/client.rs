use crate::config;
use crate::error::{Error, Result};
use crate::source::RawRepo;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;
use tracing::debug;

/// Repository queries issued on behalf of an authenticated user.
#[async_trait]
pub trait RepoClient: Send + Sync {
    /// Repositories owned by, or shared with, the authenticated user.
    async fn list_my_repositories(&self) -> Result<Vec<RawRepo>>;
    async fn search_repositories(&self, query: &str) -> Result<Vec<RawRepo>>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<RawRepo>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// GitHub REST v3 client
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api: String,
    token: String,
    per_page: String,
}

impl GithubClient {
    pub fn new(opts: &config::Github, token: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(opts.user_agent.as_str())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            api: opts.api.trim_end_matches('/').to_string(),
            token: token.to_string(),
            per_page: opts.per_page.to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.api, path);
        debug!("GET {} {:?}", url, params);

        let response = self
            .http
            .get(&url)
            .query(params)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiMessage>(&body) {
                Ok(m) => m.message,
                Err(_) => body,
            };
            return Err(Error::Api { status, message });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl RepoClient for GithubClient {
    async fn list_my_repositories(&self) -> Result<Vec<RawRepo>> {
        self.get("/user/repos", &[("per_page", self.per_page.as_str())])
            .await
    }

    async fn search_repositories(&self, query: &str) -> Result<Vec<RawRepo>> {
        let params = [("q", query), ("per_page", self.per_page.as_str())];
        let response: SearchResponse = self.get("/search/repositories", &params).await?;
        Ok(response.items)
    }
}

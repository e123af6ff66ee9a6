//! Client for the hosted project store.
//!
//! The store speaks the PostgREST dialect used by Supabase: tables live under
//! `/rest/v1/<table>`, filters and ordering are query parameters, and every
//! request carries the anon key both as `apikey` and as a bearer token.

use crate::catalog::ProjectSource;
use crate::config::StoreConfig;
use crate::error::PortfolioError;
use crate::models::{ContactSubmission, ProjectRecord};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Featured rows first, then newest year.
pub const PROJECT_ORDER: &str = "featured.desc,year.desc";
pub const MESSAGES_TABLE: &str = "messages";

#[derive(Debug, Deserialize)]
struct StoreErrorBody {
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct MessageRow<'a> {
    id: String,
    name: &'a str,
    email: &'a str,
    message: &'a str,
    created_at: String,
}

pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    table: String,
}

impl RestStore {
    pub fn new(config: &StoreConfig) -> Result<Self, PortfolioError> {
        let base_url = config
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| PortfolioError::config("store.url is not set"))?;
        let anon_key = config
            .anon_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| PortfolioError::config("store.anon_key is not set"))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(PortfolioError::network)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            table: config.table.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    /// `select * from <table> order by featured desc, year desc`
    ///
    /// A `null` body is a parse error rather than an empty catalog, so the
    /// caller shows the fallback records with the connection notice instead
    /// of swapping them in silently.
    pub async fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, PortfolioError> {
        let response = self
            .authorized(self.client.get(self.table_url(&self.table)))
            .query(&[("select", "*"), ("order", PROJECT_ORDER)])
            .send()
            .await?;

        let response = check_status(response).await?;
        let rows: Option<Vec<ProjectRecord>> = response.json().await?;
        rows.ok_or_else(|| PortfolioError::parse("store returned null instead of rows"))
    }

    pub async fn insert_message(&self, submission: &ContactSubmission) -> Result<(), PortfolioError> {
        let row = MessageRow {
            id: submission.id.to_string(),
            name: &submission.name,
            email: &submission.email,
            message: &submission.message,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        let response = self
            .authorized(self.client.post(self.table_url(MESSAGES_TABLE)))
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, PortfolioError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let reason = serde_json::from_str::<StoreErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or(body);
    Err(PortfolioError::remote(status.as_u16(), reason))
}

#[async_trait]
impl ProjectSource for RestStore {
    async fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, PortfolioError> {
        RestStore::fetch_projects(self).await
    }
}

/// Stand-in used when no store credentials are configured; every fetch fails
/// so the catalog shows its fallback records.
pub struct UnconfiguredStore;

#[async_trait]
impl ProjectSource for UnconfiguredStore {
    async fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, PortfolioError> {
        Err(PortfolioError::config("project store is not configured"))
    }
}

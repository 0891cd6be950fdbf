use std::collections::BTreeMap;
use std::time::Duration;

use coachdb_core::{
    API_KEY_HEADER, CareerStint, ChangeReport, Coach, CoachQuery, ConferenceSalaryQuery,
    ConferenceSalaryStats, DbStats, SalaryQuery, SalaryRow, SchoolDetail, SchoolQuery, SchoolSummary,
    SearchHit, SearchQuery, SeasonYears, StaffUpdate, StaffUpdateRecord, StaffUpdateResponse,
};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the coachdb REST API.
pub struct CoachDbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for CoachDbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoachDbClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish_non_exhaustive()
    }
}

impl CoachDbClient {
    /// Creates a client for the API at `base_url`.
    ///
    /// `api_key` is sent as `X-API-Key` on every request when set; only the
    /// webhook routes require it.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::ClientInit(e.to_string()))?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_owned(), api_key })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{path}", self.base_url))
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key),
            None => builder,
        }
    }

    async fn send_text(&self, builder: RequestBuilder) -> Result<String, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
            tracing::debug!(code = status.as_u16(), "coachdb API returned an error status");
            return Err(ClientError::HttpStatus { code: status.as_u16(), body });
        }
        Ok(response.text().await?)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        context: &str,
        builder: RequestBuilder,
    ) -> Result<T, ClientError> {
        let body = self.send_text(builder).await?;
        serde_json::from_str(&body)
            .map_err(|source| ClientError::JsonParse { context: context.to_owned(), source })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send_json(path, self.request(Method::GET, path)).await
    }

    async fn get_with<T: DeserializeOwned, Q: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ClientError> {
        self.send_json(path, self.request(Method::GET, path).query(query)).await
    }

    /// # Errors
    /// Returns an error on transport failure, non-2xx status, or a bad body.
    pub async fn stats(&self, year: Option<i32>) -> Result<DbStats, ClientError> {
        self.get_with("/stats", &[("year", year)]).await
    }

    /// # Errors
    /// Returns an error on transport failure, non-2xx status, or a bad body.
    pub async fn years(&self) -> Result<SeasonYears, ClientError> {
        self.get("/years").await
    }

    /// # Errors
    /// Returns an error on transport failure, non-2xx status, or a bad body.
    pub async fn coaches(&self, query: &CoachQuery) -> Result<Vec<Coach>, ClientError> {
        self.get_with("/coaches", query).await
    }

    /// # Errors
    /// Returns `ClientError::HttpStatus` with code 404 for an unknown id.
    pub async fn coach(&self, id: i64) -> Result<Coach, ClientError> {
        self.get(&format!("/coaches/{id}")).await
    }

    /// # Errors
    /// Returns `ClientError::HttpStatus` with code 404 for an unknown id.
    pub async fn coach_career(&self, id: i64) -> Result<Vec<CareerStint>, ClientError> {
        self.get(&format!("/coaches/{id}/career")).await
    }

    /// # Errors
    /// Returns `ClientError::HttpStatus` with code 404 for an unknown id.
    pub async fn coach_history(&self, id: i64) -> Result<Vec<Coach>, ClientError> {
        self.get(&format!("/coaches/{id}/history")).await
    }

    /// # Errors
    /// Returns an error on transport failure, non-2xx status, or a bad body.
    pub async fn schools(&self, query: &SchoolQuery) -> Result<Vec<SchoolSummary>, ClientError> {
        self.get_with("/schools", query).await
    }

    /// # Errors
    /// Returns `ClientError::HttpStatus` with code 404 for an unknown slug.
    pub async fn school(&self, slug: &str, year: Option<i32>) -> Result<SchoolDetail, ClientError> {
        self.get_with(&format!("/schools/{slug}"), &[("year", year)]).await
    }

    /// # Errors
    /// Returns an error on transport failure, non-2xx status, or a bad body.
    pub async fn salaries(&self, query: &SalaryQuery) -> Result<Vec<SalaryRow>, ClientError> {
        self.get_with("/salaries", query).await
    }

    /// # Errors
    /// Returns an error on transport failure, non-2xx status, or a bad body.
    pub async fn conference_salaries(
        &self,
        query: &ConferenceSalaryQuery,
    ) -> Result<Vec<ConferenceSalaryStats>, ClientError> {
        self.get_with("/salaries/by-conference", query).await
    }

    /// # Errors
    /// Returns `ClientError::HttpStatus` with code 400 for a query under two characters.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, ClientError> {
        self.get_with("/search", query).await
    }

    /// # Errors
    /// Returns an error on transport failure, non-2xx status, or a bad body.
    pub async fn changes(&self, from: i32, to: i32) -> Result<ChangeReport, ClientError> {
        self.get_with("/changes", &[("from", from), ("to", to)]).await
    }

    /// Offensive staff by slot label (`OC`, `OL`, ...).
    ///
    /// # Errors
    /// Returns an error on transport failure, non-2xx status, or a bad body.
    pub async fn yr_coaches(
        &self,
        slug: &str,
        position: Option<&str>,
        year: Option<i32>,
    ) -> Result<BTreeMap<String, String>, ClientError> {
        let year = year.map(|y| y.to_string());
        let query = [("position", position), ("year", year.as_deref())];
        self.get_with(&format!("/yr/{slug}/coaches"), &query).await
    }

    /// Plain-text form of [`Self::yr_coaches`].
    ///
    /// # Errors
    /// Returns an error on transport failure or non-2xx status.
    pub async fn yr_coaches_text(
        &self,
        slug: &str,
        position: Option<&str>,
        year: Option<i32>,
    ) -> Result<String, ClientError> {
        let year = year.map(|y| y.to_string());
        let query = [("position", position), ("year", year.as_deref()), ("format", Some("text"))];
        let builder = self.request(Method::GET, &format!("/yr/{slug}/coaches")).query(&query);
        self.send_text(builder).await
    }

    /// Push one staff change to the webhook. Requires an API key.
    ///
    /// # Errors
    /// Returns `ClientError::HttpStatus` with 401 for a bad key, 422 for an
    /// unknown school and 400 for an invalid event.
    pub async fn post_staff_update(
        &self,
        update: &StaffUpdate,
    ) -> Result<StaffUpdateResponse, ClientError> {
        let path = "/webhooks/staff-update";
        self.send_json(path, self.request(Method::POST, path).json(update)).await
    }

    /// # Errors
    /// Returns `ClientError::HttpStatus` with 401 for a bad key.
    pub async fn recent_staff_updates(&self, limit: usize) -> Result<Vec<StaffUpdateRecord>, ClientError> {
        self.get_with("/webhooks/staff-updates", &[("limit", limit)]).await
    }
}

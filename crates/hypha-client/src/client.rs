//! Async HTTP client wrapping the HyphaGraph JSON API.

use std::time::Duration;

use hypha_core::{
  api::GraphApi,
  entity::{Entity, UiCategory},
  inference::Inference,
  relation::Relation,
  source::Source,
  term::{self, EntityTerm, EntityTermWrite},
  user::User,
};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{ClientError, Result};

/// Connection settings for the HyphaGraph API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  /// API root, e.g. `http://localhost:8000/api`.
  pub base_url: String,
  /// Bearer token from a previous [`ApiClient::login`].
  pub token:    Option<String>,
}

/// Response of the login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
  pub access_token: String,
  #[serde(default)]
  pub token_type:   String,
}

/// Async HTTP client for the HyphaGraph JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based. Every call
/// is sent at most once; there is no retry.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Ok(Self { client, config })
  }

  /// The same client, authenticated with `token`.
  pub fn with_token(mut self, token: impl Into<String>) -> Self {
    self.config.token = Some(token.into());
    self
  }

  pub fn token(&self) -> Option<&str> { self.config.token.as_deref() }

  pub(crate) fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn request(&self, method: Method, path: &str) -> RequestBuilder {
    debug!(method = method.as_str(), path, "api request");
    let req = self.client.request(method, self.url(path));
    match &self.config.token {
      Some(token) => req.bearer_auth(token),
      None => req,
    }
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    let resp = check(self.request(Method::GET, path).send().await?).await?;
    Ok(resp.json().await?)
  }

  /// Like [`get_json`](Self::get_json) but maps 404 to `None`.
  async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
    match self.get_json(path).await {
      Ok(v) => Ok(Some(v)),
      Err(ClientError::NotFound(_)) => Ok(None),
      Err(e) => Err(e),
    }
  }

  async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
  where
    B: Serialize + Sync,
    T: DeserializeOwned,
  {
    let resp = check(self.request(method, path).json(body).send().await?).await?;
    Ok(resp.json().await?)
  }

  // ── Auth ──────────────────────────────────────────────────────────────────

  /// `POST /auth/login` (form-encoded). Returns the bearer token. The
  /// client itself is unchanged; see [`with_token`](Self::with_token).
  pub async fn login(&self, email: &str, password: &str) -> Result<String> {
    let resp = self
      .request(Method::POST, "/auth/login")
      .form(&[("username", email), ("password", password)])
      .send()
      .await?;
    let token: TokenResponse = check(resp).await?.json().await?;
    Ok(token.access_token)
  }

  /// `GET /auth/me`: the account the current token belongs to.
  pub async fn me(&self) -> Result<User> {
    if self.config.token.is_none() {
      return Err(ClientError::Unauthorized);
    }
    self.get_json("/auth/me").await
  }
}

/// Pass a success response through; turn anything else into a
/// [`ClientError`] carrying the backend's `detail`.
async fn check(resp: Response) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let url = resp.url().path().to_owned();
  let body = resp.text().await.unwrap_or_default();
  let detail = detail_of(&body, status);
  warn!(%status, url, detail, "api request rejected");
  Err(ClientError::from_status(status.as_u16(), detail))
}

/// Extract FastAPI's `detail`, which is either a string or a list of
/// validation errors with a `msg` each.
fn detail_of(body: &str, status: StatusCode) -> String {
  let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
  match parsed.as_ref().and_then(|v| v.get("detail")) {
    Some(serde_json::Value::String(s)) => s.clone(),
    Some(serde_json::Value::Array(errors)) => errors
      .iter()
      .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
      .collect::<Vec<_>>()
      .join("; "),
    _ if !body.trim().is_empty() => body.trim().to_owned(),
    _ => status.canonical_reason().unwrap_or("error").to_owned(),
  }
}

// ─── GraphApi impl ───────────────────────────────────────────────────────────

impl GraphApi for ApiClient {
  type Error = ClientError;

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// `GET /entities`
  async fn list_entities(&self) -> Result<Vec<Entity>> {
    self.get_json("/entities").await
  }

  /// `GET /entities/{id}`
  async fn get_entity(&self, id: Uuid) -> Result<Option<Entity>> {
    self.get_optional(&format!("/entities/{id}")).await
  }

  /// `GET /ui/categories`
  async fn list_ui_categories(&self) -> Result<Vec<UiCategory>> {
    self.get_json("/ui/categories").await
  }

  /// `GET /sources`
  async fn list_sources(&self) -> Result<Vec<Source>> {
    self.get_json("/sources").await
  }

  /// `GET /sources/{id}`
  async fn get_source(&self, id: Uuid) -> Result<Option<Source>> {
    self.get_optional(&format!("/sources/{id}")).await
  }

  /// `GET /relations/by-source/{id}`
  async fn relations_by_source(&self, source_id: Uuid) -> Result<Vec<Relation>> {
    self.get_json(&format!("/relations/by-source/{source_id}")).await
  }

  /// `GET /inferences/entity/{id}`
  async fn inferences_for_entity(&self, entity_id: Uuid) -> Result<Vec<Inference>> {
    self.get_json(&format!("/inferences/entity/{entity_id}")).await
  }

  // ── Entity terms ──────────────────────────────────────────────────────────

  /// `GET /entities/{id}/terms`
  async fn list_terms(&self, entity_id: Uuid) -> Result<Vec<EntityTerm>> {
    self.get_json(&format!("/entities/{entity_id}/terms")).await
  }

  /// `POST /entities/{id}/terms`
  async fn create_term(
    &self,
    entity_id: Uuid,
    input: EntityTermWrite,
  ) -> Result<EntityTerm> {
    let input = input.validate()?;
    self
      .send_json(Method::POST, &format!("/entities/{entity_id}/terms"), &input)
      .await
  }

  /// `PUT /entities/{id}/terms/{term_id}`
  async fn update_term(
    &self,
    entity_id: Uuid,
    term_id: Uuid,
    input: EntityTermWrite,
  ) -> Result<EntityTerm> {
    let input = input.validate()?;
    self
      .send_json(
        Method::PUT,
        &format!("/entities/{entity_id}/terms/{term_id}"),
        &input,
      )
      .await
  }

  /// `DELETE /entities/{id}/terms/{term_id}`. A 404 counts as success.
  async fn delete_term(&self, entity_id: Uuid, term_id: Uuid) -> Result<()> {
    let path = format!("/entities/{entity_id}/terms/{term_id}");
    let resp = self.request(Method::DELETE, &path).send().await?;
    if resp.status() == StatusCode::NOT_FOUND {
      debug!(%term_id, "term already gone");
      return Ok(());
    }
    check(resp).await?;
    Ok(())
  }

  /// `PUT /entities/{id}/terms-bulk`
  async fn bulk_replace_terms(
    &self,
    entity_id: Uuid,
    terms: Vec<EntityTermWrite>,
  ) -> Result<Vec<EntityTerm>> {
    let terms = term::validate_bulk(terms)?;
    self
      .send_json(Method::PUT, &format!("/entities/{entity_id}/terms-bulk"), &terms)
      .await
  }
}

// file: src/api/client.rs
// version: 1.0.0
// guid: f827eb9c-b033-4992-bbb3-5f628b92b5fd

//! reqwest-backed implementation of the Katello REST API

use super::types::{ContentViewDefinition, Filter, FilterInfo, NewRule, Product, Repository};
use super::KatelloApi;
use crate::config::ServerConfig;
use crate::error::FilterError;
use crate::Result;
use async_trait::async_trait;
use reqwest::{header, Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// HTTP client for the Katello API
pub struct HttpApi {
    client: Client,
    base_url: Url,
    username: Option<String>,
    password: Option<String>,
}

impl HttpApi {
    /// Build a client from server settings
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .danger_accept_invalid_certs(!config.verify_tls)
            .user_agent(format!("katello-filter/{}", crate::VERSION))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url()?,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Build an endpoint URL under `<base>/api/organizations/<org>/...`.
    ///
    /// Each segment is percent-encoded on its own.
    pub fn endpoint(&self, org: &str, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                FilterError::config(format!("Server url cannot be a base: {}", self.base_url))
            })?;
            path.pop_if_empty();
            path.extend(["api", "organizations", org]);
            path.extend(segments);
        }
        Ok(url)
    }

    fn definition_path(cvd_id: u64) -> Vec<String> {
        vec!["content_view_definitions".to_string(), cvd_id.to_string()]
    }

    fn filter_path(cvd_id: u64, filter_id: u64) -> Vec<String> {
        let mut path = Self::definition_path(cvd_id);
        path.push("filters".to_string());
        path.push(filter_id.to_string());
        path
    }

    async fn send(
        &self,
        method: Method,
        org: &str,
        segments: &[String],
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<reqwest::Response> {
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        let url = self.endpoint(org, &segments)?;
        debug!("{} {}", method, url);

        let mut request = self.client.request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_ref());
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = error_message(status, &text);
        debug!("Request failed with {}: {}", status, message);

        if status == StatusCode::NOT_FOUND {
            Err(FilterError::not_found(message))
        } else {
            Err(FilterError::api(status.as_u16(), message))
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        org: &str,
        segments: &[String],
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self.send(Method::GET, org, segments, query, None).await?;
        Ok(response.json().await?)
    }
}

/// Pull a readable message out of an error response body
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value.get("displayMessage").and_then(Value::as_str) {
            return message.to_string();
        }
        match value.get("errors") {
            Some(Value::Array(errors)) => {
                let messages: Vec<String> = errors
                    .iter()
                    .map(|e| match e {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect();
                if !messages.is_empty() {
                    return messages.join(", ");
                }
            }
            Some(Value::String(s)) => return s.clone(),
            _ => {}
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('<') {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

/// Append optional name/label query parameters
fn name_label_query<'a>(name: Option<&'a str>, label: Option<&'a str>) -> Vec<(&'a str, &'a str)> {
    let mut query = Vec::new();
    if let Some(name) = name {
        query.push(("name", name));
    }
    if let Some(label) = label {
        query.push(("label", label));
    }
    query
}

#[async_trait]
impl KatelloApi for HttpApi {
    async fn definitions(
        &self,
        org: &str,
        name: Option<&str>,
        label: Option<&str>,
    ) -> Result<Vec<ContentViewDefinition>> {
        let query = name_label_query(name, label);
        self.get(org, &["content_view_definitions".to_string()], &query)
            .await
    }

    async fn definition(&self, org: &str, cvd_id: u64) -> Result<ContentViewDefinition> {
        self.get(org, &Self::definition_path(cvd_id), &[]).await
    }

    async fn definition_products(&self, org: &str, cvd_id: u64) -> Result<Vec<Product>> {
        let mut path = Self::definition_path(cvd_id);
        path.extend(["products".to_string(), "all".to_string()]);
        self.get(org, &path, &[]).await
    }

    async fn filters(&self, org: &str, cvd_id: u64) -> Result<Vec<Filter>> {
        let mut path = Self::definition_path(cvd_id);
        path.push("filters".to_string());
        self.get(org, &path, &[]).await
    }

    async fn filter_info(&self, org: &str, cvd_id: u64, filter_id: u64) -> Result<FilterInfo> {
        self.get(org, &Self::filter_path(cvd_id, filter_id), &[])
            .await
    }

    async fn create_filter(&self, org: &str, cvd_id: u64, name: &str) -> Result<()> {
        let mut path = Self::definition_path(cvd_id);
        path.push("filters".to_string());
        self.send(Method::POST, org, &path, &[], Some(json!({ "filter": name })))
            .await?;
        Ok(())
    }

    async fn delete_filter(&self, org: &str, cvd_id: u64, filter_id: u64) -> Result<()> {
        self.send(
            Method::DELETE,
            org,
            &Self::filter_path(cvd_id, filter_id),
            &[],
            None,
        )
        .await?;
        Ok(())
    }

    async fn filter_products(
        &self,
        org: &str,
        cvd_id: u64,
        filter_id: u64,
    ) -> Result<Vec<Product>> {
        let mut path = Self::filter_path(cvd_id, filter_id);
        path.push("products".to_string());
        self.get(org, &path, &[]).await
    }

    async fn update_filter_products(
        &self,
        org: &str,
        cvd_id: u64,
        filter_id: u64,
        product_ids: &[u64],
    ) -> Result<()> {
        let mut path = Self::filter_path(cvd_id, filter_id);
        path.push("products".to_string());
        self.send(
            Method::PUT,
            org,
            &path,
            &[],
            Some(json!({ "products": product_ids })),
        )
        .await?;
        Ok(())
    }

    async fn filter_repos(
        &self,
        org: &str,
        cvd_id: u64,
        filter_id: u64,
    ) -> Result<Vec<Repository>> {
        let mut path = Self::filter_path(cvd_id, filter_id);
        path.push("repositories".to_string());
        self.get(org, &path, &[]).await
    }

    async fn update_filter_repos(
        &self,
        org: &str,
        cvd_id: u64,
        filter_id: u64,
        repo_ids: &[u64],
    ) -> Result<()> {
        let mut path = Self::filter_path(cvd_id, filter_id);
        path.push("repositories".to_string());
        self.send(Method::PUT, org, &path, &[], Some(json!({ "repos": repo_ids })))
            .await?;
        Ok(())
    }

    async fn create_rule(
        &self,
        org: &str,
        cvd_id: u64,
        filter_id: u64,
        rule: &NewRule,
    ) -> Result<()> {
        let mut path = Self::filter_path(cvd_id, filter_id);
        path.push("rules".to_string());
        let body = serde_json::to_value(rule)?;
        self.send(Method::POST, org, &path, &[], Some(body)).await?;
        Ok(())
    }

    async fn remove_rule(
        &self,
        org: &str,
        cvd_id: u64,
        filter_id: u64,
        rule_id: u64,
    ) -> Result<()> {
        let mut path = Self::filter_path(cvd_id, filter_id);
        path.extend(["rules".to_string(), rule_id.to_string()]);
        self.send(Method::DELETE, org, &path, &[], None).await?;
        Ok(())
    }

    async fn products(
        &self,
        org: &str,
        name: Option<&str>,
        label: Option<&str>,
    ) -> Result<Vec<Product>> {
        let query = name_label_query(name, label);
        self.get(org, &["products".to_string()], &query).await
    }

    async fn product(&self, org: &str, product_id: u64) -> Result<Product> {
        self.get(org, &["products".to_string(), product_id.to_string()], &[])
            .await
    }

    async fn product_repos(
        &self,
        org: &str,
        product_id: u64,
        name: Option<&str>,
    ) -> Result<Vec<Repository>> {
        let path = [
            "products".to_string(),
            product_id.to_string(),
            "repositories".to_string(),
        ];
        let query = name_label_query(name, None);
        self.get(org, &path, &query).await
    }
}

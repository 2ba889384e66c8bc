// file: src/api/mod.rs
// version: 1.0.0
// guid: 8f073e30-10c0-4c21-89f4-52a90ab86081

//! Katello REST API access
//!
//! [`KatelloApi`] is the seam between the command layer and the server.
//! [`HttpApi`] is the reqwest implementation used by the binary.

pub mod client;
pub mod types;

pub use client::HttpApi;
pub use types::{
    ContentType, ContentViewDefinition, Filter, FilterInfo, InclusionType, NewRule, Product,
    Repository, Rule,
};

use crate::Result;
use async_trait::async_trait;

/// Remote calls needed by the filter commands
#[async_trait]
pub trait KatelloApi: Send + Sync {
    /// Definitions in an organization matching a name and/or label
    async fn definitions(
        &self,
        org: &str,
        name: Option<&str>,
        label: Option<&str>,
    ) -> Result<Vec<ContentViewDefinition>>;

    async fn definition(&self, org: &str, cvd_id: u64) -> Result<ContentViewDefinition>;

    /// Every product reachable from the definition's repositories
    async fn definition_products(&self, org: &str, cvd_id: u64) -> Result<Vec<Product>>;

    async fn filters(&self, org: &str, cvd_id: u64) -> Result<Vec<Filter>>;

    async fn filter_info(&self, org: &str, cvd_id: u64, filter_id: u64) -> Result<FilterInfo>;

    /// Create a filter; the response body is not relied on
    async fn create_filter(&self, org: &str, cvd_id: u64, name: &str) -> Result<()>;

    async fn delete_filter(&self, org: &str, cvd_id: u64, filter_id: u64) -> Result<()>;

    async fn filter_products(&self, org: &str, cvd_id: u64, filter_id: u64)
        -> Result<Vec<Product>>;

    /// Replace the filter's product list
    async fn update_filter_products(
        &self,
        org: &str,
        cvd_id: u64,
        filter_id: u64,
        product_ids: &[u64],
    ) -> Result<()>;

    async fn filter_repos(&self, org: &str, cvd_id: u64, filter_id: u64)
        -> Result<Vec<Repository>>;

    /// Replace the filter's repository list
    async fn update_filter_repos(
        &self,
        org: &str,
        cvd_id: u64,
        filter_id: u64,
        repo_ids: &[u64],
    ) -> Result<()>;

    async fn create_rule(&self, org: &str, cvd_id: u64, filter_id: u64, rule: &NewRule)
        -> Result<()>;

    async fn remove_rule(&self, org: &str, cvd_id: u64, filter_id: u64, rule_id: u64)
        -> Result<()>;

    /// Products in an organization matching a name and/or label
    async fn products(
        &self,
        org: &str,
        name: Option<&str>,
        label: Option<&str>,
    ) -> Result<Vec<Product>>;

    async fn product(&self, org: &str, product_id: u64) -> Result<Product>;

    /// Repositories of a product, optionally narrowed to a name
    async fn product_repos(
        &self,
        org: &str,
        product_id: u64,
        name: Option<&str>,
    ) -> Result<Vec<Repository>>;
}

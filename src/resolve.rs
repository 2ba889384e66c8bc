// file: src/resolve.rs
// version: 1.0.0
// guid: 37268c9c-da35-4659-a544-ec6bb46538d6

//! Resolve human-readable names and labels to server-side records

use crate::api::{ContentViewDefinition, Filter, KatelloApi, Product, Repository};
use crate::error::FilterError;
use crate::Result;
use tracing::debug;

/// How a content view definition was identified on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionSelector {
    Name(String),
    Label(String),
    Id(u64),
}

/// How a filter was identified on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSelector {
    Name(String),
    Id(u64),
}

/// How a product was identified on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductSelector {
    Name(String),
    Label(String),
    Id(u64),
}

impl std::fmt::Display for DefinitionSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(v) | Self::Label(v) => f.write_str(v),
            Self::Id(id) => write!(f, "{}", id),
        }
    }
}

impl std::fmt::Display for FilterSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(v) => f.write_str(v),
            Self::Id(id) => write!(f, "{}", id),
        }
    }
}

impl std::fmt::Display for ProductSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(v) | Self::Label(v) => f.write_str(v),
            Self::Id(id) => write!(f, "{}", id),
        }
    }
}

impl ProductSelector {
    /// Does this product match the selector
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::Name(name) => &product.name == name,
            Self::Label(label) => &product.label == label,
            Self::Id(id) => product.id == *id,
        }
    }
}

/// Turn a missing record into a user-facing not found error
fn not_found_as(err: FilterError, message: impl FnOnce() -> String) -> FilterError {
    match err {
        FilterError::NotFound(_) => FilterError::not_found(message()),
        other => other,
    }
}

/// Resolve a content view definition within an organization
pub async fn definition<A: KatelloApi + ?Sized>(
    api: &A,
    org: &str,
    selector: &DefinitionSelector,
) -> Result<ContentViewDefinition> {
    let missing = || {
        format!(
            "Cannot find content view definition [ {} ] within organization [ {} ]",
            selector, org
        )
    };

    let (name, label) = match selector {
        DefinitionSelector::Id(id) => {
            return api
                .definition(org, *id)
                .await
                .map_err(|e| not_found_as(e, missing));
        }
        DefinitionSelector::Name(name) => (Some(name.as_str()), None),
        DefinitionSelector::Label(label) => (None, Some(label.as_str())),
    };

    let mut matches: Vec<ContentViewDefinition> = api
        .definitions(org, name, label)
        .await
        .map_err(|e| not_found_as(e, missing))?
        .into_iter()
        .filter(|d| match selector {
            DefinitionSelector::Name(n) => &d.name == n,
            DefinitionSelector::Label(l) => &d.label == l,
            DefinitionSelector::Id(_) => false,
        })
        .collect();

    match matches.len() {
        0 => Err(FilterError::not_found(missing())),
        1 => {
            let cvd = matches.remove(0);
            debug!("Resolved definition {} to id {}", selector, cvd.id);
            Ok(cvd)
        }
        _ => Err(FilterError::ambiguous(format!(
            "More than 1 definition found with the name or label [ {} ], recommend using the definition id",
            selector
        ))),
    }
}

/// Resolve a filter within a content view definition
pub async fn filter<A: KatelloApi + ?Sized>(
    api: &A,
    org: &str,
    cvd: &ContentViewDefinition,
    selector: &FilterSelector,
) -> Result<Filter> {
    let missing = || {
        format!(
            "Could not find filter [ {} ] within organization [ {} ] and definition [ {} ]",
            selector, org, cvd.name
        )
    };

    match selector {
        FilterSelector::Id(id) => api
            .filter_info(org, cvd.id, *id)
            .await
            .map(|info| info.filter)
            .map_err(|e| not_found_as(e, missing)),
        FilterSelector::Name(name) => {
            let found = api
                .filters(org, cvd.id)
                .await?
                .into_iter()
                .find(|f| &f.name == name)
                .ok_or_else(|| FilterError::not_found(missing()))?;
            debug!("Resolved filter {} to id {}", name, found.id);
            Ok(found)
        }
    }
}

/// Resolve a product within an organization
pub async fn product<A: KatelloApi + ?Sized>(
    api: &A,
    org: &str,
    selector: &ProductSelector,
) -> Result<Product> {
    let missing = || {
        format!(
            "Could not find product [ {} ] within organization [ {} ]",
            selector, org
        )
    };

    let (name, label) = match selector {
        ProductSelector::Id(id) => {
            return api
                .product(org, *id)
                .await
                .map_err(|e| not_found_as(e, missing));
        }
        ProductSelector::Name(name) => (Some(name.as_str()), None),
        ProductSelector::Label(label) => (None, Some(label.as_str())),
    };

    let mut matches: Vec<Product> = api
        .products(org, name, label)
        .await?
        .into_iter()
        .filter(|p| selector.matches(p))
        .collect();

    match matches.len() {
        0 => Err(FilterError::not_found(missing())),
        1 => Ok(matches.remove(0)),
        _ => Err(FilterError::ambiguous(
            "More than 1 product found with the name or label provided, recommend using product id. \
             The product id may be retrieved using the 'product list' command.",
        )),
    }
}

/// Identify a product among all products of a content view definition
pub async fn definition_product<A: KatelloApi + ?Sized>(
    api: &A,
    org: &str,
    cvd: &ContentViewDefinition,
    selector: &ProductSelector,
) -> Result<Product> {
    let mut matches: Vec<Product> = api
        .definition_products(org, cvd.id)
        .await?
        .into_iter()
        .filter(|p| selector.matches(p))
        .collect();

    match matches.len() {
        0 => Err(FilterError::not_found(format!(
            "Could not find product [ {} ] within organization [ {} ] and definition [ {} ]",
            selector, org, cvd.name
        ))),
        1 => Ok(matches.remove(0)),
        _ => Err(FilterError::ambiguous(
            "More than 1 product found with the name or label provided, recommend using product id. \
             The product id may be retrieved using the 'product list' command.",
        )),
    }
}

/// Resolve a repository by name within a product
pub async fn repo<A: KatelloApi + ?Sized>(
    api: &A,
    org: &str,
    repo_name: &str,
    product_selector: &ProductSelector,
) -> Result<Repository> {
    let product = product(api, org, product_selector).await?;

    let mut matches: Vec<Repository> = api
        .product_repos(org, product.id, Some(repo_name))
        .await?
        .into_iter()
        .filter(|r| r.name == repo_name)
        .collect();

    match matches.len() {
        0 => Err(FilterError::not_found(format!(
            "Could not find repository [ {} ] within organization [ {} ], product [ {} ]",
            repo_name, org, product.name
        ))),
        1 => Ok(matches.remove(0)),
        _ => Err(FilterError::ambiguous(format!(
            "More than 1 repository named [ {} ] found in product [ {} ]",
            repo_name, product.name
        ))),
    }
}

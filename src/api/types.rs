// file: src/api/types.rs
// version: 1.0.0
// guid: 47f72bb5-4c41-4eab-b77e-cb869a65140a

//! Wire types returned by the Katello REST API

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A content view definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentViewDefinition {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A filter as returned in filter listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub content_view_definition_label: String,
    #[serde(default)]
    pub organization: String,
}

/// Full filter details including attached products, repos and rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterInfo {
    #[serde(flatten)]
    pub filter: Filter,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub repos: Vec<Repository>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// A rule attached to a filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: u64,
    pub content: String,
    pub inclusion: bool,
    #[serde(default)]
    pub rule: Value,
}

impl Rule {
    /// Inclusion type of the rule
    pub fn inclusion_type(&self) -> InclusionType {
        if self.inclusion {
            InclusionType::Includes
        } else {
            InclusionType::Excludes
        }
    }
}

/// Content kinds a rule can be scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Rpm,
    PackageGroup,
    Erratum,
    PuppetModule,
}

impl ContentType {
    /// All content types, in help text order
    pub const ALL: [ContentType; 4] = [
        ContentType::Rpm,
        ContentType::PackageGroup,
        ContentType::Erratum,
        ContentType::PuppetModule,
    ];

    /// Get the content type as the server spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Rpm => "rpm",
            ContentType::PackageGroup => "package_group",
            ContentType::Erratum => "erratum",
            ContentType::PuppetModule => "puppet_module",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a rule includes or excludes matching content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InclusionType {
    #[default]
    Includes,
    Excludes,
}

impl InclusionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InclusionType::Includes => "includes",
            InclusionType::Excludes => "excludes",
        }
    }

    /// The boolean the server stores for this inclusion type
    pub fn is_inclusion(&self) -> bool {
        matches!(self, InclusionType::Includes)
    }
}

/// Body of a create-rule request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRule {
    /// Rule specification as JSON text
    pub rule: String,
    pub content: ContentType,
    pub inclusion: bool,
}

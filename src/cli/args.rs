// file: src/cli/args.rs
// version: 2.0.0
// guid: f6g7h8i9-j0k1-2345-6789-012345fghijk

//! Command line argument definitions

use crate::api::{ContentType, InclusionType};
use crate::error::FilterError;
use crate::resolve::{DefinitionSelector, FilterSelector, ProductSelector};
use crate::rules::rule_help;
use crate::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "katello-filter")]
#[command(about = "Content view definition filter actions for the Katello server")]
#[command(version = crate::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (TOML or YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Katello server base URL, e.g. https://katello.example.com/katello
    #[arg(long, global = true)]
    pub server: Option<String>,

    #[arg(short, long, global = true)]
    pub username: Option<String>,

    #[arg(short, long, global = true)]
    pub password: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List known filters for a given content view definition
    List(ListArgs),

    /// Show a specific filter
    Info(FilterTargetArgs),

    /// Create a filter
    Create(CreateArgs),

    /// Delete a filter
    Delete(FilterTargetArgs),

    /// Add a product to a filter
    AddProduct(ProductChangeArgs),

    /// Remove a product from a filter
    RemoveProduct(ProductChangeArgs),

    /// Add a repo to a filter
    AddRepo(RepoChangeArgs),

    /// Remove a repo from a filter
    RemoveRepo(RepoChangeArgs),

    /// Add a rule to a filter
    #[command(after_help = rule_help())]
    AddRule(AddRuleArgs),

    /// Remove a rule from a filter
    RemoveRule(RemoveRuleArgs),
}

/// Content view definition selection; exactly one is required
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct DefinitionArgs {
    /// Content view definition name eg: def1
    #[arg(long = "definition", alias = "definition_name")]
    pub definition: Option<String>,

    /// Content view definition label eg: def1
    #[arg(long = "definition-label", alias = "definition_label")]
    pub definition_label: Option<String>,

    /// Content view definition id eg: 1
    #[arg(long = "definition-id", alias = "definition_id")]
    pub definition_id: Option<u64>,
}

impl DefinitionArgs {
    pub fn selector(&self) -> Result<DefinitionSelector> {
        match (&self.definition, &self.definition_label, self.definition_id) {
            (Some(name), None, None) => Ok(DefinitionSelector::Name(name.clone())),
            (None, Some(label), None) => Ok(DefinitionSelector::Label(label.clone())),
            (None, None, Some(id)) => Ok(DefinitionSelector::Id(id)),
            _ => Err(FilterError::validation(
                "Exactly one of --definition, --definition-label or --definition-id is required",
            )),
        }
    }
}

/// Filter selection; exactly one is required
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct FilterArgs {
    /// Filter name eg: 'package filter acme'
    #[arg(long)]
    pub name: Option<String>,

    /// Filter id eg: 42
    #[arg(long)]
    pub id: Option<u64>,
}

impl FilterArgs {
    pub fn selector(&self) -> Result<FilterSelector> {
        match (&self.name, self.id) {
            (Some(name), None) => Ok(FilterSelector::Name(name.clone())),
            (None, Some(id)) => Ok(FilterSelector::Id(id)),
            _ => Err(FilterError::validation(
                "Exactly one of --name or --id is required",
            )),
        }
    }
}

/// Product selection; exactly one is required
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ProductArgs {
    /// Product name (product name, label or id required)
    #[arg(long)]
    pub product: Option<String>,

    /// Product label (product name, label or id required)
    #[arg(long = "product-label", alias = "product_label")]
    pub product_label: Option<String>,

    /// Product id (product name, label or id required)
    #[arg(long = "product-id", alias = "product_id")]
    pub product_id: Option<u64>,
}

impl ProductArgs {
    pub fn selector(&self) -> Result<ProductSelector> {
        match (&self.product, &self.product_label, self.product_id) {
            (Some(name), None, None) => Ok(ProductSelector::Name(name.clone())),
            (None, Some(label), None) => Ok(ProductSelector::Label(label.clone())),
            (None, None, Some(id)) => Ok(ProductSelector::Id(id)),
            _ => Err(FilterError::validation(
                "Exactly one of --product, --product-label or --product-id is required",
            )),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Organization name (required)
    #[arg(long)]
    pub org: String,

    #[command(flatten)]
    pub definition: DefinitionArgs,
}

/// Arguments naming one existing filter
#[derive(Args, Debug, Clone)]
pub struct FilterTargetArgs {
    /// Organization name (required)
    #[arg(long)]
    pub org: String,

    #[command(flatten)]
    pub definition: DefinitionArgs,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Organization name (required)
    #[arg(long)]
    pub org: String,

    #[command(flatten)]
    pub definition: DefinitionArgs,

    /// Filter name eg: 'package filter acme'
    #[arg(long)]
    pub name: String,
}

#[derive(Args, Debug, Clone)]
pub struct ProductChangeArgs {
    #[command(flatten)]
    pub target: FilterTargetArgs,

    #[command(flatten)]
    pub product: ProductArgs,
}

#[derive(Args, Debug, Clone)]
pub struct RepoChangeArgs {
    #[command(flatten)]
    pub target: FilterTargetArgs,

    /// Repository name (required)
    #[arg(long)]
    pub repo: String,

    #[command(flatten)]
    pub product: ProductArgs,
}

#[derive(Args, Debug, Clone)]
pub struct AddRuleArgs {
    #[command(flatten)]
    pub target: FilterTargetArgs,

    /// A specification of the rule in json format (required)
    #[arg(long)]
    pub rule: String,

    /// Content type of the rule
    #[arg(long, value_enum)]
    pub content: ContentTypeArg,

    /// Inclusion type of the rule
    #[arg(long = "type", value_enum, default_value = "includes")]
    pub inclusion: InclusionArg,
}

#[derive(Args, Debug, Clone)]
pub struct RemoveRuleArgs {
    #[command(flatten)]
    pub target: FilterTargetArgs,

    /// Id of the rule (required)
    #[arg(long = "rule-id", alias = "rule_id")]
    pub rule_id: u64,
}

/// Content type argument for CLI
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentTypeArg {
    #[value(name = "rpm")]
    Rpm,
    #[value(name = "package_group")]
    PackageGroup,
    #[value(name = "erratum")]
    Erratum,
    #[value(name = "puppet_module")]
    PuppetModule,
}

impl From<ContentTypeArg> for ContentType {
    fn from(arg: ContentTypeArg) -> Self {
        match arg {
            ContentTypeArg::Rpm => ContentType::Rpm,
            ContentTypeArg::PackageGroup => ContentType::PackageGroup,
            ContentTypeArg::Erratum => ContentType::Erratum,
            ContentTypeArg::PuppetModule => ContentType::PuppetModule,
        }
    }
}

/// Inclusion type argument for CLI
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InclusionArg {
    Includes,
    Excludes,
}

impl From<InclusionArg> for InclusionType {
    fn from(arg: InclusionArg) -> Self {
        match arg {
            InclusionArg::Includes => InclusionType::Includes,
            InclusionArg::Excludes => InclusionType::Excludes,
        }
    }
}

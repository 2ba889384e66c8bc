// file: src/cli/commands.rs
// version: 2.0.0
// guid: g7h8i9j0-k1l2-3456-7890-123456ghijkl

//! Command implementations for the CLI
//!
//! Every command resolves the definition, then the filter, and then issues a
//! single change or query against the server. Results are written to `out`.

use super::args::{
    AddRuleArgs, Commands, CreateArgs, FilterTargetArgs, ListArgs, ProductChangeArgs,
    RemoveRuleArgs, RepoChangeArgs,
};
use crate::api::{ContentType, ContentViewDefinition, Filter, InclusionType, KatelloApi, NewRule};
use crate::error::FilterError;
use crate::logging::with_async_operation_span;
use crate::output::{write_json, ItemView, Table};
use crate::rules::{format_rules, validate_rule_text};
use crate::{resolve, Result};
use std::io::Write;
use tracing::info;

/// Whether a product or repository is being attached or detached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Add,
    Remove,
}

/// Dispatch a parsed subcommand
pub async fn run_command<A, W>(api: &A, out: &mut W, command: Commands, json: bool) -> Result<()>
where
    A: KatelloApi + ?Sized,
    W: Write,
{
    match command {
        Commands::List(args) => {
            with_async_operation_span("filter_list", list_command(api, out, &args, json)).await
        }
        Commands::Info(args) => {
            with_async_operation_span("filter_info", info_command(api, out, &args, json)).await
        }
        Commands::Create(args) => {
            with_async_operation_span("filter_create", create_command(api, out, &args)).await
        }
        Commands::Delete(args) => {
            with_async_operation_span("filter_delete", delete_command(api, out, &args)).await
        }
        Commands::AddProduct(args) => {
            let fut = product_command(api, out, &args, Membership::Add);
            with_async_operation_span("filter_add_product", fut).await
        }
        Commands::RemoveProduct(args) => {
            let fut = product_command(api, out, &args, Membership::Remove);
            with_async_operation_span("filter_remove_product", fut).await
        }
        Commands::AddRepo(args) => {
            let fut = repo_command(api, out, &args, Membership::Add);
            with_async_operation_span("filter_add_repo", fut).await
        }
        Commands::RemoveRepo(args) => {
            let fut = repo_command(api, out, &args, Membership::Remove);
            with_async_operation_span("filter_remove_repo", fut).await
        }
        Commands::AddRule(args) => {
            with_async_operation_span("filter_add_rule", add_rule_command(api, out, &args)).await
        }
        Commands::RemoveRule(args) => {
            let fut = remove_rule_command(api, out, &args);
            with_async_operation_span("filter_remove_rule", fut).await
        }
    }
}

async fn target<A: KatelloApi + ?Sized>(
    api: &A,
    args: &FilterTargetArgs,
) -> Result<(ContentViewDefinition, Filter)> {
    let definition = resolve::definition(api, &args.org, &args.definition.selector()?).await?;
    let filter = resolve::filter(api, &args.org, &definition, &args.filter.selector()?).await?;
    Ok((definition, filter))
}

/// List filters of a content view definition
pub async fn list_command<A, W>(api: &A, out: &mut W, args: &ListArgs, json: bool) -> Result<()>
where
    A: KatelloApi + ?Sized,
    W: Write,
{
    let definition = resolve::definition(api, &args.org, &args.definition.selector()?).await?;
    let filters = api.filters(&args.org, definition.id).await?;
    info!(
        "Found {} filters in definition {}",
        filters.len(),
        definition.name
    );

    if json {
        return write_json(out, &filters);
    }

    let mut table = Table::new(
        "Content View Definition Filters",
        &["ID", "Name", "Content View Definition", "Org"],
    );
    for filter in &filters {
        table.add_row(vec![
            filter.id.to_string(),
            filter.name.clone(),
            filter.content_view_definition_label.clone(),
            filter.organization.clone(),
        ]);
    }
    table.render(out)
}

/// Show one filter with its products, repos and rules
pub async fn info_command<A, W>(
    api: &A,
    out: &mut W,
    args: &FilterTargetArgs,
    json: bool,
) -> Result<()>
where
    A: KatelloApi + ?Sized,
    W: Write,
{
    let (definition, filter) = target(api, args).await?;
    let info = api.filter_info(&args.org, definition.id, filter.id).await?;

    if json {
        return write_json(out, &info);
    }

    let products: Vec<&str> = info.products.iter().map(|p| p.name.as_str()).collect();
    let repos: Vec<&str> = info.repos.iter().map(|r| r.name.as_str()).collect();

    ItemView::new("Content View Definition Filter Info")
        .field("ID", info.filter.id.to_string())
        .field("Name", info.filter.name.as_str())
        .field(
            "Content View Definition",
            info.filter.content_view_definition_label.as_str(),
        )
        .field("Org", info.filter.organization.as_str())
        .multiline("Products", products.join("\n"))
        .multiline("Repos", repos.join("\n"))
        .multiline("Rules", format_rules(&info.rules))
        .render(out)
}

/// Create a filter in a content view definition
pub async fn create_command<A, W>(api: &A, out: &mut W, args: &CreateArgs) -> Result<()>
where
    A: KatelloApi + ?Sized,
    W: Write,
{
    let definition = resolve::definition(api, &args.org, &args.definition.selector()?).await?;
    api.create_filter(&args.org, definition.id, &args.name).await?;
    info!("Created filter {} in definition {}", args.name, definition.name);

    writeln!(out, "Successfully created filter [ {} ]", args.name)?;
    Ok(())
}

/// Delete a filter
pub async fn delete_command<A, W>(api: &A, out: &mut W, args: &FilterTargetArgs) -> Result<()>
where
    A: KatelloApi + ?Sized,
    W: Write,
{
    let (definition, filter) = target(api, args).await?;
    api.delete_filter(&args.org, definition.id, filter.id).await?;

    writeln!(out, "Successfully deleted filter [ {} ]", filter.name)?;
    Ok(())
}

/// Apply a membership change to an id list.
///
/// Returns false when the list is already in the requested state for an add.
/// Removing an id that is not present is an error.
pub fn apply_membership(
    ids: &mut Vec<u64>,
    id: u64,
    change: Membership,
    missing: impl FnOnce() -> String,
) -> Result<bool> {
    match change {
        Membership::Add => {
            if ids.contains(&id) {
                return Ok(false);
            }
            ids.push(id);
            Ok(true)
        }
        Membership::Remove => {
            let before = ids.len();
            ids.retain(|existing| *existing != id);
            if ids.len() == before {
                return Err(FilterError::not_found(missing()));
            }
            Ok(true)
        }
    }
}

/// Attach a product to, or detach it from, a filter
pub async fn product_command<A, W>(
    api: &A,
    out: &mut W,
    args: &ProductChangeArgs,
    change: Membership,
) -> Result<()>
where
    A: KatelloApi + ?Sized,
    W: Write,
{
    let org = &args.target.org;
    let definition = resolve::definition(api, org, &args.target.definition.selector()?).await?;
    let product =
        resolve::definition_product(api, org, &definition, &args.product.selector()?).await?;
    let filter = resolve::filter(api, org, &definition, &args.target.filter.selector()?).await?;

    let mut product_ids: Vec<u64> = api
        .filter_products(org, definition.id, filter.id)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();

    let changed = apply_membership(&mut product_ids, product.id, change, || {
        format!(
            "Product [ {} ] is not part of filter [ {} ]",
            product.label, filter.name
        )
    })?;

    if changed {
        api.update_filter_products(org, definition.id, filter.id, &product_ids)
            .await?;
    } else {
        info!(
            "Product {} is already part of filter {}",
            product.label, filter.name
        );
    }

    match change {
        Membership::Add => writeln!(
            out,
            "Added product [ {} ] to filter [ {} ]",
            product.label, filter.name
        )?,
        Membership::Remove => writeln!(
            out,
            "Removed product [ {} ] from filter [ {} ]",
            product.label, filter.name
        )?,
    }
    Ok(())
}

/// Attach a repository to, or detach it from, a filter
pub async fn repo_command<A, W>(
    api: &A,
    out: &mut W,
    args: &RepoChangeArgs,
    change: Membership,
) -> Result<()>
where
    A: KatelloApi + ?Sized,
    W: Write,
{
    let org = &args.target.org;
    let (definition, filter) = target(api, &args.target).await?;
    let repo = resolve::repo(api, org, &args.repo, &args.product.selector()?).await?;

    let mut repo_ids: Vec<u64> = api
        .filter_repos(org, definition.id, filter.id)
        .await?
        .into_iter()
        .map(|r| r.id)
        .collect();

    let changed = apply_membership(&mut repo_ids, repo.id, change, || {
        format!(
            "Repository [ {} ] is not part of filter [ {} ]",
            repo.name, filter.name
        )
    })?;

    if changed {
        api.update_filter_repos(org, definition.id, filter.id, &repo_ids)
            .await?;
    } else {
        info!(
            "Repository {} is already part of filter {}",
            repo.name, filter.name
        );
    }

    match change {
        Membership::Add => writeln!(
            out,
            "Added repository [ {} ] to filter [ {} ]",
            repo.name, filter.name
        )?,
        Membership::Remove => writeln!(
            out,
            "Removed repository [ {} ] from filter [ {} ]",
            repo.name, filter.name
        )?,
    }
    Ok(())
}

/// Add an inclusion or exclusion rule to a filter
pub async fn add_rule_command<A, W>(api: &A, out: &mut W, args: &AddRuleArgs) -> Result<()>
where
    A: KatelloApi + ?Sized,
    W: Write,
{
    validate_rule_text(&args.rule)?;
    let (definition, filter) = target(api, &args.target).await?;

    let content: ContentType = args.content.into();
    let inclusion: InclusionType = args.inclusion.into();
    let rule = NewRule {
        rule: args.rule.clone(),
        content,
        inclusion: inclusion.is_inclusion(),
    };

    api.create_rule(&args.target.org, definition.id, filter.id, &rule)
        .await?;
    info!(
        "Added {} {} rule to filter {}",
        inclusion.as_str(),
        content,
        filter.name
    );

    writeln!(out, "Successfully created rule [ {} ]", args.rule)?;
    Ok(())
}

/// Remove a rule from a filter
pub async fn remove_rule_command<A, W>(api: &A, out: &mut W, args: &RemoveRuleArgs) -> Result<()>
where
    A: KatelloApi + ?Sized,
    W: Write,
{
    let (definition, filter) = target(api, &args.target).await?;
    api.remove_rule(&args.target.org, definition.id, filter.id, args.rule_id)
        .await?;

    writeln!(out, "Successfully removed rule [ {} ]", args.rule_id)?;
    Ok(())
}

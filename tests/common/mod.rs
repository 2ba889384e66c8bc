// file: tests/common/mod.rs
// version: 1.0.0
// guid: 7489fe35-ae7b-4ce0-acda-c97b3f060e52

//! In-memory Katello server used by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use katello_filter::api::{
    ContentViewDefinition, Filter, FilterInfo, KatelloApi, NewRule, Product, Repository, Rule,
};
use katello_filter::{FilterError, Result};
use std::collections::HashMap;
use std::sync::Mutex;

pub const ORG: &str = "ACME";

#[derive(Default)]
pub struct State {
    pub definitions: Vec<(String, ContentViewDefinition)>,
    pub definition_products: HashMap<u64, Vec<Product>>,
    pub filters: Vec<(u64, FilterInfo)>,
    pub products: Vec<(String, Product)>,
    pub product_repos: HashMap<u64, Vec<Repository>>,
    /// Mutating calls in the order they were received
    pub calls: Vec<String>,
    pub next_id: u64,
}

pub struct FakeApi {
    pub state: Mutex<State>,
}

pub fn product(id: u64, name: &str, label: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        label: label.to_string(),
    }
}

pub fn repo(id: u64, name: &str) -> Repository {
    Repository {
        id,
        name: name.to_string(),
        label: Some(name.replace('-', "_")),
    }
}

fn definition(id: u64, name: &str, label: &str) -> ContentViewDefinition {
    ContentViewDefinition {
        id,
        name: name.to_string(),
        label: label.to_string(),
        description: None,
    }
}

fn filter_info(id: u64, name: &str, cvd_label: &str) -> FilterInfo {
    FilterInfo {
        filter: Filter {
            id,
            name: name.to_string(),
            content_view_definition_label: cvd_label.to_string(),
            organization: ORG.to_string(),
        },
        products: Vec::new(),
        repos: Vec::new(),
        rules: Vec::new(),
    }
}

impl FakeApi {
    /// ACME organization with one well-populated definition.
    ///
    /// Definition 1 "Base Definition" (base_def) holds filters 7 "acme-packages"
    /// (product Farm, repo zoo-el6, one rpm rule) and 8 "errata-only" (empty).
    /// Definitions 2 and 3 share the name "Dup". Products "Zoo" (zoo) and
    /// "Zoo" (zoo_two) share a name.
    pub fn acme() -> Self {
        let zoo = product(10, "Zoo", "zoo");
        let farm = product(11, "Farm", "farm");
        let zoo_two = product(12, "Zoo", "zoo_two");

        let mut packages = filter_info(7, "acme-packages", "base_def");
        packages.products.push(farm.clone());
        packages.repos.push(repo(100, "zoo-el6"));
        packages.rules.push(Rule {
            id: 1,
            content: "rpm".to_string(),
            inclusion: true,
            rule: serde_json::json!({"units": [{"name": "pulp-client", "version": "2.0.7"}]}),
        });

        let mut state = State {
            next_id: 1000,
            ..Default::default()
        };
        state.definitions = vec![
            (ORG.to_string(), definition(1, "Base Definition", "base_def")),
            (ORG.to_string(), definition(2, "Dup", "dup1")),
            (ORG.to_string(), definition(3, "Dup", "dup2")),
            ("Other".to_string(), definition(4, "Base Definition", "base_def")),
        ];
        state.definition_products.insert(
            1,
            vec![zoo.clone(), farm.clone(), zoo_two.clone()],
        );
        state.filters = vec![
            (1, packages),
            (1, filter_info(8, "errata-only", "base_def")),
        ];
        state.products = vec![
            (ORG.to_string(), zoo),
            (ORG.to_string(), farm),
            (ORG.to_string(), zoo_two),
        ];
        state
            .product_repos
            .insert(10, vec![repo(100, "zoo-el6"), repo(101, "zoo-el7")]);
        state.product_repos.insert(11, vec![repo(110, "farm-el6")]);

        Self {
            state: Mutex::new(state),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn filter(&self, filter_id: u64) -> Option<FilterInfo> {
        self.state
            .lock()
            .unwrap()
            .filters
            .iter()
            .find(|(_, f)| f.filter.id == filter_id)
            .map(|(_, f)| f.clone())
    }
}

fn missing(what: &str) -> FilterError {
    FilterError::not_found(format!("Couldn't find {}", what))
}

fn find_filter<'a>(state: &'a mut State, cvd_id: u64, filter_id: u64) -> Result<&'a mut FilterInfo> {
    state
        .filters
        .iter_mut()
        .find(|(cvd, f)| *cvd == cvd_id && f.filter.id == filter_id)
        .map(|(_, f)| f)
        .ok_or_else(|| missing(&format!("filter '{}'", filter_id)))
}

#[async_trait]
impl KatelloApi for FakeApi {
    async fn definitions(
        &self,
        org: &str,
        name: Option<&str>,
        label: Option<&str>,
    ) -> Result<Vec<ContentViewDefinition>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .definitions
            .iter()
            .filter(|(o, d)| {
                o == org
                    && name.map_or(true, |n| d.name == n)
                    && label.map_or(true, |l| d.label == l)
            })
            .map(|(_, d)| d.clone())
            .collect())
    }

    async fn definition(&self, org: &str, cvd_id: u64) -> Result<ContentViewDefinition> {
        let state = self.state.lock().unwrap();
        state
            .definitions
            .iter()
            .find(|(o, d)| o == org && d.id == cvd_id)
            .map(|(_, d)| d.clone())
            .ok_or_else(|| missing(&format!("content view definition '{}'", cvd_id)))
    }

    async fn definition_products(&self, _org: &str, cvd_id: u64) -> Result<Vec<Product>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .definition_products
            .get(&cvd_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn filters(&self, _org: &str, cvd_id: u64) -> Result<Vec<Filter>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .filters
            .iter()
            .filter(|(cvd, _)| *cvd == cvd_id)
            .map(|(_, f)| f.filter.clone())
            .collect())
    }

    async fn filter_info(&self, _org: &str, cvd_id: u64, filter_id: u64) -> Result<FilterInfo> {
        let mut state = self.state.lock().unwrap();
        find_filter(&mut state, cvd_id, filter_id).map(|f| f.clone())
    }

    async fn create_filter(&self, org: &str, cvd_id: u64, name: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state
            .filters
            .iter()
            .any(|(cvd, f)| *cvd == cvd_id && f.filter.name == name)
        {
            return Err(FilterError::api(422, "Name has already been taken"));
        }

        state.next_id += 1;
        let id = state.next_id;
        let label = state
            .definitions
            .iter()
            .find(|(_, d)| d.id == cvd_id)
            .map(|(_, d)| d.label.clone())
            .unwrap_or_default();
        let mut info = filter_info(id, name, &label);
        info.filter.organization = org.to_string();

        state.calls.push(format!("create_filter {} {}", cvd_id, name));
        state.filters.push((cvd_id, info));
        Ok(())
    }

    async fn delete_filter(&self, _org: &str, cvd_id: u64, filter_id: u64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        find_filter(&mut state, cvd_id, filter_id)?;
        state
            .filters
            .retain(|(cvd, f)| !(*cvd == cvd_id && f.filter.id == filter_id));
        state.calls.push(format!("delete_filter {} {}", cvd_id, filter_id));
        Ok(())
    }

    async fn filter_products(
        &self,
        _org: &str,
        cvd_id: u64,
        filter_id: u64,
    ) -> Result<Vec<Product>> {
        let mut state = self.state.lock().unwrap();
        Ok(find_filter(&mut state, cvd_id, filter_id)?.products.clone())
    }

    async fn update_filter_products(
        &self,
        _org: &str,
        cvd_id: u64,
        filter_id: u64,
        product_ids: &[u64],
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let known: Vec<Product> = state.products.iter().map(|(_, p)| p.clone()).collect();
        let products = product_ids
            .iter()
            .filter_map(|id| known.iter().find(|p| p.id == *id).cloned())
            .collect();
        find_filter(&mut state, cvd_id, filter_id)?.products = products;
        state
            .calls
            .push(format!("update_filter_products {} {:?}", filter_id, product_ids));
        Ok(())
    }

    async fn filter_repos(
        &self,
        _org: &str,
        cvd_id: u64,
        filter_id: u64,
    ) -> Result<Vec<Repository>> {
        let mut state = self.state.lock().unwrap();
        Ok(find_filter(&mut state, cvd_id, filter_id)?.repos.clone())
    }

    async fn update_filter_repos(
        &self,
        _org: &str,
        cvd_id: u64,
        filter_id: u64,
        repo_ids: &[u64],
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let known: Vec<Repository> = state.product_repos.values().flatten().cloned().collect();
        let repos = repo_ids
            .iter()
            .filter_map(|id| known.iter().find(|r| r.id == *id).cloned())
            .collect();
        find_filter(&mut state, cvd_id, filter_id)?.repos = repos;
        state
            .calls
            .push(format!("update_filter_repos {} {:?}", filter_id, repo_ids));
        Ok(())
    }

    async fn create_rule(
        &self,
        _org: &str,
        cvd_id: u64,
        filter_id: u64,
        rule: &NewRule,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        let body: serde_json::Value = serde_json::from_str(&rule.rule)?;
        find_filter(&mut state, cvd_id, filter_id)?.rules.push(Rule {
            id,
            content: rule.content.as_str().to_string(),
            inclusion: rule.inclusion,
            rule: body,
        });
        state.calls.push(format!(
            "create_rule {} {} {}",
            filter_id,
            rule.content.as_str(),
            rule.inclusion
        ));
        Ok(())
    }

    async fn remove_rule(
        &self,
        _org: &str,
        cvd_id: u64,
        filter_id: u64,
        rule_id: u64,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let filter = find_filter(&mut state, cvd_id, filter_id)?;
        let before = filter.rules.len();
        filter.rules.retain(|r| r.id != rule_id);
        if filter.rules.len() == before {
            return Err(missing(&format!("rule '{}'", rule_id)));
        }
        state
            .calls
            .push(format!("remove_rule {} {}", filter_id, rule_id));
        Ok(())
    }

    async fn products(
        &self,
        org: &str,
        name: Option<&str>,
        label: Option<&str>,
    ) -> Result<Vec<Product>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .products
            .iter()
            .filter(|(o, p)| {
                o == org
                    && name.map_or(true, |n| p.name == n)
                    && label.map_or(true, |l| p.label == l)
            })
            .map(|(_, p)| p.clone())
            .collect())
    }

    async fn product(&self, org: &str, product_id: u64) -> Result<Product> {
        let state = self.state.lock().unwrap();
        state
            .products
            .iter()
            .find(|(o, p)| o == org && p.id == product_id)
            .map(|(_, p)| p.clone())
            .ok_or_else(|| missing(&format!("product '{}'", product_id)))
    }

    async fn product_repos(
        &self,
        _org: &str,
        product_id: u64,
        name: Option<&str>,
    ) -> Result<Vec<Repository>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .product_repos
            .get(&product_id)
            .map(|repos| {
                repos
                    .iter()
                    .filter(|r| name.map_or(true, |n| r.name == n))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

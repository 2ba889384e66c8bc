// file: src/rules.rs
// version: 1.0.0
// guid: 1c81d53c-c4dd-4093-bab9-651a6c2077a5

//! Filter rule text: validation, display and help

use crate::api::Rule;
use crate::error::FilterError;
use crate::Result;
use serde_json::{json, Value};

/// Check that rule text is well-formed JSON.
///
/// The rule schema itself is left to the server.
pub fn validate_rule_text(text: &str) -> Result<Value> {
    serde_json::from_str(text)
        .map_err(|e| FilterError::validation(format!("Rule is not valid JSON: {}", e)))
}

/// Render rules for the info view
pub fn format_rules(rules: &[Rule]) -> String {
    let mut blocks = Vec::with_capacity(rules.len());

    for rule in rules {
        let body = serde_json::to_string_pretty(&rule.rule).unwrap_or_else(|_| rule.rule.to_string());
        let mut lines = vec![
            format!("Id: {}", rule.id),
            format!("Content: {}", rule.content),
            format!("Type: {}", rule.inclusion_type().as_str()),
            "Rule: ".to_string(),
        ];
        lines.extend(body.lines().map(|line| format!(" {}", line)));
        blocks.push(lines.join("\n"));
    }

    blocks.join("\n\n")
}

fn example(value: Value) -> String {
    value.to_string()
}

/// Help text describing the rule specification for each content type
pub fn rule_help() -> String {
    let mut help = vec![
        "Rule specification for content types.".to_string(),
        String::new(),
        "Package: (rpm)".to_string(),
        "Specification".to_string(),
        r#"{"units":<["name", "version", "min_version", "max_version"]*>}"#.to_string(),
        "Examples".to_string(),
        example(json!({"units": [
            {"name": "pulp-client", "version": "2.0.7"},
            {"name": "pulp-adm*", "min_version": "2.0.4", "max_version": "2.0.8"}
        ]})),
        String::new(),
        "Package Group: (package_group)".to_string(),
        "Specification".to_string(),
        r#"{"units":<["name"]*>}"#.to_string(),
        "Examples".to_string(),
        example(json!({"units": [{"name": "group1"}, {"name": "group-foo*"}]})),
        String::new(),
        "Errata: (erratum)".to_string(),
        "Specification".to_string(),
        concat!(
            r#"{"units":<["id"]*>} |"#,
            r#" {"date_range": {"start": "YYYY-MM-DD", "end": "YYYY-MM-DD"}} |"#,
            r#" {"errata_type" : [< "enhancement", "security", "bugfix">*]}"#
        )
        .to_string(),
        "Examples".to_string(),
        "By Id".to_string(),
        example(json!({"units": [{"id": "RHEA1022:21"}, {"id": "RHEA1022:22"}]})),
        "By Date Range".to_string(),
        example(json!({"date_range": {"start": "2013-04-15", "end": "2015-04-15"}})),
        "By Errata Type".to_string(),
        example(json!({"errata_type": ["security", "bugfix"]})),
        "By Date Range and Errata Type".to_string(),
        example(json!({
            "date_range": {"start": "2013-04-15", "end": "2015-04-15"},
            "errata_type": ["security", "bugfix"]
        })),
        String::new(),
        "Puppet Module: (puppet_module)".to_string(),
        "Specification".to_string(),
        r#"{"units":<["name", "author", "version", "min_version", "max_version"]*>}"#.to_string(),
        "Examples".to_string(),
        example(json!({"units": [
            {"name": "m*", "author": "puppetlabs", "version": "2.0.7"},
            {"name": "httpd", "min_version": "2.0.4", "max_version": "2.0.8"}
        ]})),
    ];
    help.push(String::new());

    help.join("\n")
}

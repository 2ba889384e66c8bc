// file: src/output/mod.rs
// version: 1.0.0
// guid: 02ea1796-629c-4bf6-b368-1968e7ec0c25

//! Plain-text and JSON rendering of command results

use crate::Result;
use serde::Serialize;
use std::io::Write;

/// A column-aligned table with a header line
pub struct Table {
    header: String,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            header: header.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row; missing cells are rendered empty
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(column.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        let widths = self.widths();
        let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);

        writeln!(out, "{:-<1$}", "", total)?;
        writeln!(out, "{}", self.header)?;
        writeln!(out, "{:-<1$}", "", total)?;
        writeln!(out, "{}", join_padded(&self.columns, &widths))?;
        writeln!(out, "{:-<1$}", "", total)?;

        for row in &self.rows {
            let cells: Vec<String> = (0..widths.len())
                .map(|i| row.get(i).cloned().unwrap_or_default())
                .collect();
            writeln!(out, "{}", join_padded(&cells, &widths))?;
        }

        Ok(())
    }
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<1$}", cell, width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// A single record rendered as `Label: value` lines
pub struct ItemView {
    header: String,
    fields: Vec<(String, Field)>,
}

enum Field {
    Single(String),
    Multi(String),
}

impl ItemView {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, label: &str, value: impl Into<String>) -> Self {
        self.fields.push((label.to_string(), Field::Single(value.into())));
        self
    }

    /// A value that may span several lines; printed below its label
    pub fn multiline(mut self, label: &str, value: impl Into<String>) -> Self {
        self.fields.push((label.to_string(), Field::Multi(value.into())));
        self
    }

    pub fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        let width = self
            .fields
            .iter()
            .filter(|(_, value)| matches!(value, Field::Single(_)))
            .map(|(label, _)| label.chars().count() + 1)
            .max()
            .unwrap_or(0);

        writeln!(out, "{:-<1$}", "", self.header.len())?;
        writeln!(out, "{}", self.header)?;
        writeln!(out, "{:-<1$}", "", self.header.len())?;

        for (label, value) in &self.fields {
            let label = format!("{}:", label);
            match value {
                Field::Single(v) => writeln!(out, "{:<2$} {}", label, v, width)?,
                Field::Multi(v) => {
                    writeln!(out, "{}", label)?;
                    for line in v.lines() {
                        if line.is_empty() {
                            writeln!(out)?;
                        } else {
                            writeln!(out, "    {}", line)?;
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// Pretty-print any serializable value as JSON
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    writeln!(out, "{}", json)?;
    Ok(())
}

// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dynamic WHERE-clause assembly.
//!
//! Column names are `&'static str` chosen by the query modules; user input
//! only ever reaches SQLite as a bound parameter.

use rusqlite::types::Value;

/// `column` holds something other than ASCII whitespace; never true for NULL.
///
/// Bare `TRIM` only strips spaces, so tabs and newlines are listed explicitly.
pub(crate) fn not_blank(column: &str) -> String {
    format!("TRIM({column}, ' ' || char(9, 10, 11, 12, 13)) <> ''")
}

/// Conjunction of SQL predicates with their positional parameters.
#[derive(Debug, Default)]
pub(crate) struct Predicates {
    clauses: Vec<String>,
    params: Vec<Value>,
}

impl Predicates {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a predicate that takes no parameters.
    pub(crate) fn require(&mut self, clause: &'static str) -> &mut Self {
        self.clauses.push(clause.to_string());
        self
    }

    /// `column = ?` when `value` is present.
    pub(crate) fn eq(&mut self, column: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value {
            let placeholder = self.bind(Value::Text(v.to_string()));
            self.clauses.push(format!("{column} = {placeholder}"));
        }
        self
    }

    /// Case-insensitive substring match when `needle` is present.
    ///
    /// `instr` avoids LIKE so `%` and `_` in the needle match literally.
    pub(crate) fn contains_ci(&mut self, column: &'static str, needle: Option<&str>) -> &mut Self {
        if let Some(n) = needle {
            let placeholder = self.bind(Value::Text(n.to_string()));
            self.clauses
                .push(format!("instr(lower({column}), lower({placeholder})) > 0"));
        }
        self
    }

    /// Register a parameter and return its placeholder.
    pub(crate) fn bind(&mut self, value: Value) -> String {
        self.params.push(value);
        format!("?{}", self.params.len())
    }

    /// `WHERE a AND b ...`, or an empty string when unconstrained.
    pub(crate) fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub(crate) fn params(&self) -> &[Value] {
        &self.params
    }
}

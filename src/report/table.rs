// src/report/table.rs
// =============================================================================
// A minimal in-memory table of string cells.
//
// Reports are assembled column by column: the catalog gives the base rows,
// then each later stage appends columns. Appended columns are lined up with
// the existing rows by POSITION, never by key, so stages must produce exactly
// one value per row, in row order.
// =============================================================================

use std::collections::BTreeSet;

use crate::error::{ReportError, Result};
use crate::sentinel::{Lookup, NOT_AVAIL, UNAVAILABLE_MAP};

/// Last-commit date per branch, in the order the API listed the branches
pub type BranchUpdates = Vec<(String, String)>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Table {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.headers.len() {
            return Err(ReportError::RowWidth {
                expected: self.headers.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Appends a column; `values[i]` lands in row `i`
    pub fn add_column(&mut self, name: impl Into<String>, values: Vec<String>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(ReportError::RowMismatch {
                values: values.len(),
                rows: self.rows.len(),
            });
        }

        self.headers.push(name.into());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    // Spreads per-row branch maps into one column per branch name
    //
    // `column` is the column that holds the maps in rendered form; it must
    // already exist. `maps[i]` belongs to row `i`.
    //
    // New columns: every branch name seen in any row, sorted. A row whose
    // repository lacks that branch, or whose branches could not be listed,
    // gets "not avail".
    //
    // Example:
    //   row 0: {a: t1, b: t2}
    //   row 1: {a: t3}
    //   ->  a: [t1, t3]   b: [t2, "not avail"]
    pub fn flatten_branch_map(&mut self, column: &str, maps: &[Lookup<BranchUpdates>]) -> Result<()> {
        if self.column_index(column).is_none() {
            return Err(ReportError::MissingColumn {
                column: column.to_string(),
                source_name: "report table".to_string(),
            });
        }
        if maps.len() != self.rows.len() {
            return Err(ReportError::RowMismatch {
                values: maps.len(),
                rows: self.rows.len(),
            });
        }

        let branch_names: BTreeSet<&str> = maps
            .iter()
            .filter_map(Lookup::as_found)
            .flat_map(|updates| updates.iter().map(|(branch, _)| branch.as_str()))
            .collect();

        for branch in branch_names {
            let values = maps
                .iter()
                .map(|map| {
                    map.as_found()
                        .and_then(|updates| updates.iter().find(|(name, _)| name == branch))
                        .map(|(_, date)| date.clone())
                        .unwrap_or_else(|| NOT_AVAIL.to_string())
                })
                .collect();
            self.add_column(branch, values)?;
        }

        Ok(())
    }
}

/// Renders a branch map for its own (unflattened) column
///
/// Found maps become a JSON object; an unavailable map is "{False}".
pub fn render_branch_updates(updates: &Lookup<BranchUpdates>) -> String {
    match updates {
        Lookup::Found(updates) => {
            let object: serde_json::Map<String, serde_json::Value> = updates
                .iter()
                .map(|(branch, date)| (branch.clone(), serde_json::Value::String(date.clone())))
                .collect();
            serde_json::Value::Object(object).to_string()
        }
        Lookup::Unavailable => UNAVAILABLE_MAP.to_string(),
    }
}

#[cfg(test)]
impl Table {
    /// Cells of one column, top to bottom
    fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[index].as_str()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn updates(pairs: &[(&str, &str)]) -> Lookup<BranchUpdates> {
        Lookup::Found(
            pairs
                .iter()
                .map(|(b, d)| (b.to_string(), d.to_string()))
                .collect(),
        )
    }

    fn table_with_rows(n: usize) -> Table {
        let mut table = Table::new(["git_url", "git_repo_all_branches_updates"]);
        for i in 0..n {
            table
                .push_row(vec![format!("https://github.com/o/r{}", i), String::new()])
                .unwrap();
        }
        table
    }

    #[test]
    fn test_missing_branch_is_not_avail() {
        let mut table = table_with_rows(2);
        let maps = vec![
            updates(&[("a", "t1"), ("b", "t2")]),
            updates(&[("a", "t3")]),
        ];

        table
            .flatten_branch_map("git_repo_all_branches_updates", &maps)
            .unwrap();

        assert_eq!(table.headers()[2..], ["a".to_string(), "b".to_string()]);
        assert_eq!(table.column("a").unwrap(), vec!["t1", "t3"]);
        assert_eq!(table.column("b").unwrap(), vec!["t2", "not avail"]);
    }

    #[test]
    fn test_unavailable_rows_and_sorted_columns() {
        let mut table = table_with_rows(3);
        let maps = vec![
            updates(&[("master", "t1"), ("curriculum", "t2")]),
            Lookup::Unavailable,
            updates(&[("solution", "t3")]),
        ];

        table
            .flatten_branch_map("git_repo_all_branches_updates", &maps)
            .unwrap();

        assert_eq!(
            table.headers()[2..],
            ["curriculum".to_string(), "master".to_string(), "solution".to_string()]
        );
        assert_eq!(table.column("master").unwrap(), vec!["t1", "not avail", "not avail"]);
        assert_eq!(table.column("solution").unwrap(), vec!["not avail", "not avail", "t3"]);
    }

    #[test]
    fn test_flatten_requires_aligned_rows() {
        let mut table = table_with_rows(2);
        let result = table.flatten_branch_map("git_repo_all_branches_updates", &[Lookup::Unavailable]);
        assert!(matches!(result, Err(ReportError::RowMismatch { values: 1, rows: 2 })));

        let result = table.flatten_branch_map("no_such_column", &[]);
        assert!(matches!(result, Err(ReportError::MissingColumn { .. })));
    }

    #[test]
    fn test_push_row_checks_width() {
        let mut table = Table::new(["a", "b"]);
        assert!(table.push_row(vec!["1".to_string()]).is_err());
        assert!(table.is_empty());
        table.push_row(vec!["1".to_string(), "2".to_string()]).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_render_branch_updates() {
        assert_eq!(render_branch_updates(&Lookup::Unavailable), "{False}");
        assert_eq!(
            render_branch_updates(&updates(&[("main", "2023-01-01T00:00:00Z")])),
            r#"{"main":"2023-01-01T00:00:00Z"}"#
        );
    }
}

use std::fmt::Write as _;

use crate::error::{DecodeError, Result};

pub const NAMESPACE_COLUMN: &str = "NAMESPACE";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TableColumn {
    pub name: String,
}

impl TableColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<String>,
    /// Set for rows of namespaced kinds, empty when the object carried none
    pub namespace: Option<String>,
}

impl TableRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self {
            cells,
            namespace: None,
        }
    }

    pub fn contains(&self, query: &str) -> bool {
        self.cells.iter().any(|cell| cell.contains(query))
    }
}

/// The one shape every resource kind is converted into.
///
/// Cell count of every row always equals the column count. A namespaced
/// table starts with the `NAMESPACE` column and every row leads with its
/// namespace.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NormalizedTable {
    columns: Vec<TableColumn>,
    rows: Vec<TableRow>,
    namespaced: bool,
}

impl NormalizedTable {
    pub fn try_new(columns: Vec<TableColumn>, rows: Vec<TableRow>, namespaced: bool) -> Result<Self> {
        if let Some((row, actual)) = rows
            .iter()
            .enumerate()
            .find_map(|(i, row)| (row.cells.len() != columns.len()).then_some((i, row.cells.len())))
        {
            return Err(DecodeError::CellCount {
                row,
                expected: columns.len(),
                actual,
            }
            .into());
        }

        if namespaced {
            if columns.first().map(|c| c.name.as_str()) != Some(NAMESPACE_COLUMN) {
                return Err(DecodeError::NamespaceColumn.into());
            }

            if let Some(row) = rows
                .iter()
                .position(|row| row.namespace.is_none() || row.cells.first() != row.namespace.as_ref())
            {
                return Err(DecodeError::Namespace { row }.into());
            }
        }

        Ok(Self {
            columns,
            rows,
            namespaced,
        })
    }

    pub fn columns(&self) -> &[TableColumn] {
        &self.columns
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn namespaced(&self) -> bool {
        self.namespaced
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Same columns, a subset of the rows. Arity holds by construction.
    pub(crate) fn with_rows(&self, rows: Vec<TableRow>) -> Self {
        Self {
            columns: self.columns.clone(),
            rows,
            namespaced: self.namespaced,
        }
    }

    /// Tab separated form: the header line, then one line per row.
    pub fn to_tsv(&self) -> String {
        let mut buf = String::new();

        let header: Vec<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();

        let _ = writeln!(buf, "{}", header.join("\t"));

        for row in &self.rows {
            let _ = writeln!(buf, "{}", row.cells.join("\t"));
        }

        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn columns(names: &[&str]) -> Vec<TableColumn> {
        names.iter().map(|n| TableColumn::new(*n)).collect()
    }

    fn row(cells: &[&str]) -> TableRow {
        TableRow::new(cells.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn mismatched_row_is_rejected_at_construction() {
        let err = NormalizedTable::try_new(
            columns(&["NAME", "AGE"]),
            vec![row(&["a", "1d"]), row(&["b"])],
            false,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            Error::Decode(DecodeError::CellCount {
                row: 1,
                expected: 2,
                actual: 1
            })
        ));
    }

    fn namespaced_row(cells: &[&str]) -> TableRow {
        TableRow {
            namespace: Some(cells[0].to_string()),
            ..row(cells)
        }
    }

    #[test]
    fn namespaced_table_needs_namespace_column() {
        let err = NormalizedTable::try_new(columns(&["NAME"]), vec![row(&["nginx"])], true)
            .unwrap_err();

        assert!(matches!(err, Error::Decode(DecodeError::NamespaceColumn)));
    }

    #[test]
    fn namespaced_row_must_lead_with_its_namespace() {
        let err = NormalizedTable::try_new(
            columns(&["NAMESPACE", "NAME"]),
            vec![namespaced_row(&["default", "nginx"]), row(&["default", "redis"])],
            true,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            Error::Decode(DecodeError::Namespace { row: 1 })
        ));

        let mismatched = TableRow {
            cells: vec!["default".into(), "nginx".into()],
            namespace: Some("kube-system".into()),
        };

        let err = NormalizedTable::try_new(columns(&["NAMESPACE", "NAME"]), vec![mismatched], true)
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Decode(DecodeError::Namespace { row: 0 })
        ));
    }

    #[test]
    fn empty_namespace_is_valid() {
        let table = NormalizedTable::try_new(
            columns(&["NAMESPACE", "NAME"]),
            vec![namespaced_row(&["", "orphan"])],
            true,
        );

        assert!(table.is_ok());
    }

    #[test]
    fn tsv_keeps_order() {
        let table = NormalizedTable::try_new(
            columns(&["NAMESPACE", "NAME", "READY"]),
            vec![
                namespaced_row(&["kube-system", "coredns", "1/1"]),
                namespaced_row(&["default", "nginx", "0/1"]),
            ],
            true,
        )
        .unwrap();

        assert_eq!(
            table.to_tsv(),
            indoc! {"
                NAMESPACE\tNAME\tREADY
                kube-system\tcoredns\t1/1
                default\tnginx\t0/1
            "}
        );
    }

    #[test]
    fn tsv_of_empty_table_is_header_only() {
        let table = NormalizedTable::try_new(columns(&["NAME"]), vec![], false).unwrap();

        assert_eq!(table.to_tsv(), "NAME\n");
    }
}

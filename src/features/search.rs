use crate::features::resource_table::NormalizedTable;

/// Rows where at least one cell contains `query`, case-sensitive.
///
/// An empty query keeps every row. The input table is left untouched.
pub fn apply(table: &NormalizedTable, query: &str) -> NormalizedTable {
    if query.is_empty() {
        return table.clone();
    }

    let rows = table
        .rows()
        .iter()
        .filter(|row| row.contains(query))
        .cloned()
        .collect();

    table.with_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::resource_table::{TableColumn, TableRow};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn namespaced_row(cells: &[&str]) -> TableRow {
        TableRow {
            cells: cells.iter().map(ToString::to_string).collect(),
            namespace: Some(cells[0].to_string()),
        }
    }

    fn pods() -> NormalizedTable {
        NormalizedTable::try_new(
            vec![
                TableColumn::new("NAMESPACE"),
                TableColumn::new("NAME"),
                TableColumn::new("STATUS"),
            ],
            vec![
                namespaced_row(&["default", "nginx", "Running"]),
                namespaced_row(&["kube-system", "coredns", "Running"]),
            ],
            true,
        )
        .unwrap()
    }

    #[test]
    fn empty_query_is_identity() {
        let table = pods();

        assert_eq!(apply(&table, ""), table);
    }

    #[test]
    fn matches_namespace_cell() {
        let filtered = apply(&pods(), "kube");

        assert_eq!(filtered.rows(), &[namespaced_row(&["kube-system", "coredns", "Running"])]);
        assert_eq!(filtered.columns(), pods().columns());
        assert!(filtered.namespaced());
    }

    #[test]
    fn input_is_not_mutated() {
        let table = pods();

        let _ = apply(&table, "nginx");

        assert_eq!(table.len(), 2);
    }

    #[rstest]
    #[case("Running", 2)]
    #[case("running", 0)]
    #[case("ngin", 1)]
    #[case("absent", 0)]
    fn substring_is_case_sensitive(#[case] query: &str, #[case] expected: usize) {
        assert_eq!(apply(&pods(), query).len(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("kube")]
    #[case("Running")]
    #[case("absent")]
    fn idempotent(#[case] query: &str) {
        let once = apply(&pods(), query);

        assert_eq!(apply(&once, query), once);
    }
}

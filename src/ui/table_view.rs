use ratatui::{
    crossterm::event::{KeyCode, KeyEvent},
    widgets::TableState,
};

use crate::features::{
    resource_table::{NormalizedTable, TableRow},
    search,
};

use super::{key_event_to_code, EventResult, Searchable};

const PAGE_SIZE: usize = 10;

/// Holds the last fetched table and what is shown of it.
///
/// A committed search stays in effect across refreshes.
#[derive(Debug, Default)]
pub struct TableView {
    title: String,
    source: NormalizedTable,
    displayed: NormalizedTable,
    query: String,
    state: TableState,
}

impl TableView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replaces the whole table, as fetched.
    pub fn set_table(&mut self, table: NormalizedTable) {
        self.source = table;
        self.displayed = search::apply(&self.source, &self.query);
        self.clamp_selection();
    }

    pub fn table(&self) -> &NormalizedTable {
        &self.displayed
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state_mut(&mut self) -> &mut TableState {
        &mut self.state
    }

    pub fn selected_row(&self) -> Option<&TableRow> {
        self.state
            .selected()
            .and_then(|i| self.displayed.rows().get(i))
    }

    /// Display width of every column, header included.
    pub fn column_widths(&self) -> Vec<u16> {
        self.displayed
            .columns()
            .iter()
            .enumerate()
            .map(|(i, column)| {
                self.displayed
                    .rows()
                    .iter()
                    .map(|row| row.cells[i].chars().count())
                    .chain(std::iter::once(column.name.chars().count()))
                    .max()
                    .unwrap_or_default()
                    .min(u16::MAX as usize) as u16
            })
            .collect()
    }

    pub fn on_key_event(&mut self, ev: KeyEvent) -> EventResult {
        match key_event_to_code(ev) {
            KeyCode::Char('j') | KeyCode::Down => self.select_next(1),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(1),
            KeyCode::PageDown => self.select_next(PAGE_SIZE),
            KeyCode::PageUp => self.select_prev(PAGE_SIZE),
            KeyCode::Char('g') | KeyCode::Home => self.select_first(),
            KeyCode::Char('G') | KeyCode::End => self.select_last(),
            _ => return EventResult::Ignore,
        }

        EventResult::Nop
    }

    pub fn select_next(&mut self, n: usize) {
        let Some(last) = self.displayed.len().checked_sub(1) else {
            return;
        };

        let next = self.state.selected().map_or(0, |i| (i + n).min(last));

        self.state.select(Some(next));
    }

    pub fn select_prev(&mut self, n: usize) {
        if self.displayed.is_empty() {
            return;
        }

        let prev = self.state.selected().map_or(0, |i| i.saturating_sub(n));

        self.state.select(Some(prev));
    }

    pub fn select_first(&mut self) {
        if !self.displayed.is_empty() {
            self.state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if let Some(last) = self.displayed.len().checked_sub(1) {
            self.state.select(Some(last));
        }
    }

    fn clamp_selection(&mut self) {
        let selected = match (self.displayed.len().checked_sub(1), self.state.selected()) {
            (None, _) => None,
            (Some(_), None) => Some(0),
            (Some(last), Some(i)) => Some(i.min(last)),
        };

        self.state.select(selected);
    }
}

impl Searchable for TableView {
    /// Filters the fetched table, not the currently displayed subset.
    fn apply_search(&mut self, query: &str) {
        self.query = query.to_string();
        self.displayed = search::apply(&self.source, query);
        self.state.select(None);
        self.clamp_selection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::resource_table::TableColumn;
    use pretty_assertions::assert_eq;

    fn table(names: &[&str]) -> NormalizedTable {
        NormalizedTable::try_new(
            vec![TableColumn::new("NAME"), TableColumn::new("STATUS")],
            names
                .iter()
                .map(|n| TableRow::new(vec![n.to_string(), "Ready".into()]))
                .collect(),
            false,
        )
        .unwrap()
    }

    fn selected_name(view: &TableView) -> Option<&str> {
        view.selected_row().map(|row| row.cells[0].as_str())
    }

    #[test]
    fn first_row_selected_after_set_table() {
        let mut view = TableView::new("nodes");

        view.set_table(table(&["node-a", "node-b"]));

        assert_eq!(selected_name(&view), Some("node-a"));
    }

    #[test]
    fn search_applies_to_fetched_rows_and_survives_refresh() {
        let mut view = TableView::new("nodes");
        view.set_table(table(&["node-a", "node-b", "worker-a"]));

        view.apply_search("node");
        assert_eq!(view.table().len(), 2);

        view.apply_search("worker");
        assert_eq!(view.table().len(), 1);
        assert_eq!(view.query(), "worker");

        view.set_table(table(&["worker-a", "worker-b", "node-a"]));
        assert_eq!(view.table().len(), 2);

        view.apply_search("");
        assert_eq!(view.table().len(), 3);
    }

    #[test]
    fn selection_is_clamped_when_rows_shrink() {
        let mut view = TableView::new("nodes");
        view.set_table(table(&["a", "b", "c"]));
        view.select_last();

        view.set_table(table(&["a"]));

        assert_eq!(selected_name(&view), Some("a"));

        view.set_table(table(&[]));

        assert_eq!(view.selected_row(), None);
    }

    #[test]
    fn navigation() {
        let mut view = TableView::new("nodes");
        view.set_table(table(&["a", "b", "c"]));

        view.on_key_event(KeyCode::Down.into());
        view.on_key_event(KeyCode::Char('j').into());
        view.on_key_event(KeyCode::Down.into());
        assert_eq!(selected_name(&view), Some("c"));

        view.on_key_event(KeyCode::Char('g').into());
        assert_eq!(selected_name(&view), Some("a"));

        assert_eq!(
            view.on_key_event(KeyCode::Char('x').into()),
            EventResult::Ignore
        );
    }

    #[test]
    fn widths_cover_header_and_cells() {
        let mut view = TableView::new("nodes");
        view.set_table(table(&["a", "control-plane"]));

        assert_eq!(view.column_widths(), vec![13, 6]);
    }
}

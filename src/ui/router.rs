use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use strum::Display;

use crate::logger;

use super::EventResult;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display)]
pub enum Page {
    #[default]
    Kinds,
    Resource,
}

impl Page {
    fn toggle(self) -> Self {
        match self {
            Self::Kinds => Self::Resource,
            Self::Resource => Self::Kinds,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FocusedView {
    #[default]
    Content,
    Search,
}

/// Session state. Only `EventRouter` writes to it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AppState {
    show_menu: bool,
    current_page: Page,
    search_text: String,
    focused_view: FocusedView,
}

impl AppState {
    pub fn show_menu(&self) -> bool {
        self.show_menu
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn focused_view(&self) -> FocusedView {
        self.focused_view
    }
}

/// A view whose rows can be narrowed by a committed search.
pub trait Searchable {
    fn apply_search(&mut self, query: &str);
}

/// Maps key events to state transitions, one event at a time.
///
/// Rules are checked from the most specific condition down and every event
/// performs at most one action.
#[derive(Debug, Default)]
pub struct EventRouter {
    state: AppState,
}

impl EventRouter {
    pub fn new(page: Page) -> Self {
        Self {
            state: AppState {
                current_page: page,
                ..Default::default()
            },
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Switches pages after a kind was picked from the list.
    pub fn open_page(&mut self, page: Page) {
        self.state.current_page = page;
    }

    pub fn route(&mut self, ev: KeyEvent, active: &mut impl Searchable) -> EventResult {
        logger!(debug, "route {:?} {:?}", ev, self.state);

        if ev.code == KeyCode::Char('c') && ev.modifiers == KeyModifiers::CONTROL {
            return EventResult::Quit;
        }

        if self.state.show_menu {
            return self.on_menu(ev);
        }

        match self.state.focused_view {
            FocusedView::Search => self.on_search(ev, active),
            FocusedView::Content => self.on_content(ev),
        }
    }

    fn on_menu(&mut self, ev: KeyEvent) -> EventResult {
        match ev.code {
            // the overlay never changed current_page, closing it shows that page again
            KeyCode::Esc => {
                self.state.show_menu = false;
                EventResult::Nop
            }
            _ => EventResult::Ignore,
        }
    }

    fn on_search(&mut self, ev: KeyEvent, active: &mut impl Searchable) -> EventResult {
        match ev.code {
            KeyCode::Esc => {
                self.state.search_text.clear();
                self.state.focused_view = FocusedView::Content;
                EventResult::Nop
            }
            KeyCode::Enter => {
                active.apply_search(&self.state.search_text);
                self.state.search_text.clear();
                EventResult::Nop
            }
            KeyCode::Backspace => {
                self.state.search_text.pop();
                EventResult::Nop
            }
            KeyCode::Char(c) if !ev.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.search_text.push(c);
                EventResult::Nop
            }
            _ => EventResult::Ignore,
        }
    }

    fn on_content(&mut self, ev: KeyEvent) -> EventResult {
        if ev.modifiers.contains(KeyModifiers::CONTROL) {
            return EventResult::Ignore;
        }

        match ev.code {
            KeyCode::Char('?') => {
                self.state.show_menu = true;
                EventResult::Nop
            }
            KeyCode::Char('/') => {
                self.state.focused_view = FocusedView::Search;
                EventResult::Nop
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.state.current_page = self.state.current_page.toggle();
                EventResult::Nop
            }
            KeyCode::Char('r') | KeyCode::F(5) => EventResult::Refresh,
            KeyCode::Char('q') => EventResult::Quit,
            KeyCode::Enter => EventResult::Select,
            _ => EventResult::Ignore,
        }
    }
}

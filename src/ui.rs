mod draw;
mod event;
mod router;
mod table_view;
mod util;

pub use draw::draw;
pub use event::EventResult;
pub use router::{AppState, EventRouter, FocusedView, Page, Searchable};
pub use table_view::TableView;
pub use util::key_event_to_code;

/// Outcome of routing one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Handled, redraw
    Nop,
    /// Not handled, forward the key to the focused view
    Ignore,
    Refresh,
    Select,
    Quit,
}

use crate::store::{ClipboardPort, VariablesPort};
use crate::variables_model::VariablesOverlay;
use crate::view::View;
use crossterm::event::KeyEvent;

/// Shared state that all mode controllers need access to
pub struct SharedState {
    pub overlay: VariablesOverlay,
    pub store: Box<dyn VariablesPort>,
    pub clipboard: Box<dyn ClipboardPort>,
    pub view: View,
    pub status_message: String,
}

/// Result of handling a key event in a mode controller
#[derive(Debug, PartialEq)]
pub enum ModeTransition {
    Stay,
    ToMode(crate::controller::command_types::Mode),
    Quit,
}

/// Trait that all mode controllers must implement
pub trait ModeController {
    fn handle_key(&mut self, key_event: KeyEvent, shared: &mut SharedState) -> ModeTransition;
}

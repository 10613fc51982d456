use crate::controller::command_types::{Command, Mode};
use crate::controller::key_handler::KeyHandler;
use crate::controller::shared_state::{ModeController, ModeTransition, SharedState};
use crossterm::event::KeyEvent;

pub struct ClosedController;

impl ClosedController {
    pub fn new() -> Self {
        Self
    }
}

impl ModeController for ClosedController {
    fn handle_key(&mut self, key_event: KeyEvent, shared: &mut SharedState) -> ModeTransition {
        match KeyHandler::parse_key(&Mode::Closed, &key_event) {
            Some(Command::OpenOverlay) => {
                shared.overlay.open();
                ModeTransition::ToMode(Mode::Browse)
            }
            Some(Command::Quit) => ModeTransition::Quit,
            // Allowed while closed; shows up once reopened.
            Some(Command::ToggleSystemVariables) => {
                shared.overlay.toggle_system_variables();
                ModeTransition::Stay
            }
            _ => ModeTransition::Stay,
        }
    }
}

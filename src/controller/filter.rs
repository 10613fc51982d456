use crate::controller::command_types::Mode;
use crate::controller::shared_state::{ModeController, ModeTransition, SharedState};
use crossterm::event::{KeyCode, KeyEvent};

pub struct FilterController {
    pub filter_buffer: String,
}

impl FilterController {
    pub fn new() -> Self {
        Self {
            filter_buffer: String::new(),
        }
    }

    pub fn get_filter_buffer(&self) -> &str {
        &self.filter_buffer
    }
}

impl ModeController for FilterController {
    fn handle_key(&mut self, key_event: KeyEvent, shared: &mut SharedState) -> ModeTransition {
        match key_event.code {
            KeyCode::Char(c) => {
                self.filter_buffer.push(c);
                ModeTransition::Stay
            }
            KeyCode::Backspace => {
                self.filter_buffer.pop();
                ModeTransition::Stay
            }
            KeyCode::Enter => {
                let pattern = self.filter_buffer.clone();
                if let Some(list) = shared.overlay.focused_list_mut() {
                    if let Err(e) = list.set_filter(Some(&pattern)) {
                        shared.status_message = e.user_message();
                    }
                }
                self.filter_buffer.clear();
                ModeTransition::ToMode(Mode::Browse)
            }
            KeyCode::Esc => {
                // Cancel clears any active filter
                if let Some(list) = shared.overlay.focused_list_mut() {
                    list.clear_filter();
                }
                self.filter_buffer.clear();
                ModeTransition::ToMode(Mode::Browse)
            }
            _ => ModeTransition::Stay,
        }
    }
}

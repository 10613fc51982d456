use crate::controller::command_types::{Command, Mode};
use crate::controller::key_handler::KeyHandler;
use crate::controller::shared_state::{ModeController, ModeTransition, SharedState};
use crate::variables_model::EditorField;
use crossterm::event::KeyEvent;

/// Edits the draft of the open row. Changes reach the store only when a
/// field is committed with Enter.
pub struct EditController;

impl EditController {
    pub fn new() -> Self {
        Self
    }
}

impl ModeController for EditController {
    fn handle_key(&mut self, key_event: KeyEvent, shared: &mut SharedState) -> ModeTransition {
        let Some(command) = KeyHandler::parse_key(&Mode::Edit, &key_event) else {
            return ModeTransition::Stay;
        };

        let SharedState {
            overlay,
            store,
            status_message,
            ..
        } = shared;
        let Some(list) = overlay.environment_list_mut() else {
            return ModeTransition::ToMode(Mode::Closed);
        };
        let Some(draft) = list.draft().cloned() else {
            return ModeTransition::ToMode(Mode::Browse);
        };

        match command {
            Command::CloseEditor => {
                list.close_editor();
                return ModeTransition::ToMode(Mode::Browse);
            }
            Command::NextField => {
                if let Some(d) = list.draft_mut() {
                    d.field = d.field.next();
                }
            }
            Command::PreviousField => {
                if let Some(d) = list.draft_mut() {
                    d.field = d.field.previous();
                }
            }
            Command::InsertChar(c) => {
                if draft.field == EditorField::Enabled {
                    if c == ' ' && !list.toggle_enabled(&draft.id, &mut **store) {
                        *status_message = "Could not save change".to_string();
                    }
                } else if let Some(text) = list.draft_mut().and_then(|d| d.focused_text_mut()) {
                    text.push(c);
                }
            }
            Command::DeleteChar => {
                if let Some(text) = list.draft_mut().and_then(|d| d.focused_text_mut()) {
                    text.pop();
                }
            }
            Command::CommitField => {
                let current = list.get(&draft.id).cloned();
                let committed = match (draft.field, current) {
                    // Not in the collection yet: the store has not confirmed the create.
                    (_, None) => None,
                    (EditorField::Name, Some(var)) if var.name == draft.name => None,
                    (EditorField::Value, Some(var)) if var.value == draft.value => None,
                    (EditorField::Name, Some(_)) => {
                        Some(list.commit_name_change(&draft.id, draft.name.clone(), &mut **store))
                    }
                    (EditorField::Value, Some(_)) => {
                        Some(list.commit_value_change(&draft.id, draft.value.clone(), &mut **store))
                    }
                    (EditorField::Enabled, Some(_)) => Some(list.toggle_enabled(&draft.id, &mut **store)),
                };
                *status_message = match committed {
                    Some(true) => "Saved".to_string(),
                    Some(false) => "Could not save change".to_string(),
                    None => "No changes".to_string(),
                };
            }
            _ => {}
        }
        ModeTransition::Stay
    }
}

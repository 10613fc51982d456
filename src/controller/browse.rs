use crate::controller::command_types::{Command, Mode};
use crate::controller::key_handler::KeyHandler;
use crate::controller::shared_state::{ModeController, ModeTransition, SharedState};
use crossterm::event::KeyEvent;
use tracing::debug;

pub const READ_ONLY_MESSAGE: &str = "System variables are read-only";

pub struct BrowseController;

impl BrowseController {
    pub fn new() -> Self {
        Self
    }
}

impl ModeController for BrowseController {
    fn handle_key(&mut self, key_event: KeyEvent, shared: &mut SharedState) -> ModeTransition {
        let Some(command) = KeyHandler::parse_key(&Mode::Browse, &key_event) else {
            return ModeTransition::Stay;
        };

        match command {
            Command::CloseOverlay => {
                shared.overlay.close_from_footer();
                ModeTransition::ToMode(Mode::Closed)
            }
            Command::ToggleSystemVariables => {
                shared.overlay.toggle_system_variables();
                shared.status_message = if shared.overlay.system_variables_enabled() {
                    "System variables shown".to_string()
                } else {
                    "System variables hidden".to_string()
                };
                ModeTransition::Stay
            }
            Command::SwitchFocus => {
                shared.overlay.toggle_focus();
                ModeTransition::Stay
            }
            Command::NextEnvironment => {
                Self::switch_environment(shared, 1);
                ModeTransition::Stay
            }
            Command::PreviousEnvironment => {
                Self::switch_environment(shared, -1);
                ModeTransition::Stay
            }
            Command::EnterFilter => ModeTransition::ToMode(Mode::Filter),
            Command::Redraw => {
                shared.view.force_redraw();
                ModeTransition::Stay
            }
            other => Self::execute_list_command(other, shared),
        }
    }
}

impl BrowseController {
    fn execute_list_command(command: Command, shared: &mut SharedState) -> ModeTransition {
        let SharedState {
            overlay,
            store,
            clipboard,
            status_message,
            ..
        } = shared;
        let Some(list) = overlay.focused_list_mut() else {
            return ModeTransition::Stay;
        };

        match command {
            Command::SelectNext => list.select_next(),
            Command::SelectPrevious => list.select_previous(),
            Command::ToggleValues => list.toggle_values_visible(),
            Command::AddVariable => {
                if list.is_system() {
                    *status_message = READ_ONLY_MESSAGE.to_string();
                } else if list.request_add(&mut **store).is_some() {
                    return ModeTransition::ToMode(Mode::Edit);
                } else {
                    *status_message = "Could not create variable".to_string();
                }
            }
            Command::EditVariable => {
                let Some(id) = list.selected_id() else {
                    return ModeTransition::Stay;
                };
                if list.open_editor(&id) {
                    return ModeTransition::ToMode(Mode::Edit);
                }
                if list.is_system() {
                    *status_message = READ_ONLY_MESSAGE.to_string();
                }
            }
            Command::DeleteVariable => {
                let Some(id) = list.selected_id() else {
                    return ModeTransition::Stay;
                };
                let name = list.get(&id).map(|v| v.name.clone()).unwrap_or_default();
                if list.request_delete(&id, &mut **store) {
                    *status_message = format!("Deleted \"{name}\"");
                } else if list.is_system() {
                    *status_message = READ_ONLY_MESSAGE.to_string();
                } else {
                    *status_message = "Could not delete variable".to_string();
                }
            }
            Command::ToggleEnabled => {
                let Some(id) = list.selected_id() else {
                    return ModeTransition::Stay;
                };
                if !list.toggle_enabled(&id, &mut **store) && list.is_system() {
                    *status_message = READ_ONLY_MESSAGE.to_string();
                }
            }
            Command::CopyValue => {
                let Some(id) = list.selected_id() else {
                    return ModeTransition::Stay;
                };
                match list.copy_value(&id, &mut **clipboard) {
                    Ok(true) => {
                        let name = list.get(&id).map(|v| v.name.as_str()).unwrap_or_default();
                        *status_message = format!("Copied value of \"{name}\"");
                    }
                    Ok(false) => {}
                    Err(e) => *status_message = e.user_message(),
                }
            }
            other => debug!(command = ?other, "Unhandled command in browse mode"),
        }
        ModeTransition::Stay
    }

    fn switch_environment(shared: &mut SharedState, step: isize) {
        let environments = shared.store.environments();
        if environments.len() < 2 {
            shared.status_message = "Only one environment".to_string();
            return;
        }
        let current = shared
            .overlay
            .current_environment()
            .and_then(|name| environments.iter().position(|e| e == name))
            .unwrap_or(0);
        let count = environments.len() as isize;
        let next = (current as isize + step).rem_euclid(count) as usize;
        let name = &environments[next];

        match shared.store.variables(name) {
            Ok(variables) => {
                shared.overlay.supply_environment(name, variables);
                shared.status_message = format!("Environment: {name}");
            }
            Err(e) => shared.status_message = e.to_string(),
        }
    }
}

//! Variables overlay widget.
//!
//! Hosts the environment list and, while system variables are enabled, a
//! read-only system list. The system list is dropped when disabled, not
//! hidden. Environment data arrives after construction; until then the
//! overlay renders its intro and a loading placeholder.

use super::list::VariablesList;
use super::variable::Variable;
use crate::store::CollectionChanged;
use crate::view::view_model::{EnvironmentSection, FooterRender, OverlayRender};
use tracing::{debug, info};

pub const INTRO: &str = "Variables are substituted into requests. System variables come from the OS environment and cannot be edited.";
pub const CLOSE_LABEL: &str = "Close";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFocus {
    Environment,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayNotice {
    /// First environment data arrived; the overlay can be painted.
    Ready { environment: String },
    Opened,
    Closed,
}

pub struct VariablesOverlay {
    opened: bool,
    system_variables_enabled: bool,
    show_values: bool,
    environment: Option<VariablesList>,
    system: Option<VariablesList>,
    system_snapshot: Vec<Variable>,
    focus: ListFocus,
    notices: Vec<OverlayNotice>,
}

impl VariablesOverlay {
    pub fn new(opened: bool) -> Self {
        Self {
            opened,
            system_variables_enabled: false,
            show_values: false,
            environment: None,
            system: None,
            system_snapshot: Vec::new(),
            focus: ListFocus::Environment,
            notices: Vec::new(),
        }
    }

    pub fn is_opened(&self) -> bool {
        self.opened
    }

    pub fn is_ready(&self) -> bool {
        self.environment.is_some()
    }

    pub fn system_variables_enabled(&self) -> bool {
        self.system_variables_enabled
    }

    pub fn focus(&self) -> ListFocus {
        self.focus
    }

    /// Initial value visibility for lists mounted from now on.
    pub fn set_show_values(&mut self, show: bool) {
        self.show_values = show;
    }

    pub fn open(&mut self) {
        if !self.opened {
            self.opened = true;
            self.notices.push(OverlayNotice::Opened);
        }
    }

    /// Closing discards any unsaved edit in the environment list.
    pub fn close(&mut self) {
        if self.opened {
            self.opened = false;
            if let Some(list) = self.environment.as_mut() {
                list.close_editor();
            }
            self.notices.push(OverlayNotice::Closed);
        }
    }

    /// Action of the footer close control.
    pub fn close_from_footer(&mut self) {
        debug!("Footer close");
        self.close();
    }

    pub fn toggle_system_variables(&mut self) {
        let enabled = !self.system_variables_enabled;
        self.set_system_variables_enabled(enabled);
    }

    pub fn set_system_variables_enabled(&mut self, enabled: bool) {
        self.system_variables_enabled = enabled;
        if enabled {
            if self.system.is_none() {
                let mut list = VariablesList::new("", self.system_snapshot.clone(), true);
                list.set_values_visible(self.show_values);
                self.system = Some(list);
            }
        } else {
            self.system = None;
            self.focus = ListFocus::Environment;
        }
        debug!(enabled, "System variables toggled");
    }

    /// Replaces the read-only system snapshot.
    pub fn set_system_variables(&mut self, variables: Vec<Variable>) {
        if let Some(list) = self.system.as_mut() {
            list.set_variables(variables.clone());
        }
        self.system_snapshot = variables;
    }

    /// Mounts `name` as the environment list, or refreshes it if already shown.
    pub fn supply_environment(&mut self, name: &str, variables: Vec<Variable>) {
        match self.environment.as_mut() {
            Some(list) if list.environment() == name => list.set_variables(variables),
            Some(list) => {
                let visible = list.values_visible();
                let mut replacement = VariablesList::new(name, variables, false);
                replacement.set_values_visible(visible);
                *list = replacement;
            }
            None => {
                let mut list = VariablesList::new(name, variables, false);
                list.set_values_visible(self.show_values);
                self.environment = Some(list);
                info!(environment = name, "Variables overlay ready");
                self.notices.push(OverlayNotice::Ready {
                    environment: name.to_string(),
                });
            }
        }
    }

    /// Routes a store notice to the environment list if it shows that environment.
    pub fn apply_change(&mut self, change: CollectionChanged) {
        match self.environment.as_mut() {
            Some(list) if list.environment() == change.environment => {
                list.set_variables(change.variables);
            }
            _ => debug!(environment = %change.environment, "Ignoring change for hidden environment"),
        }
    }

    pub fn current_environment(&self) -> Option<&str> {
        self.environment.as_ref().map(|l| l.environment())
    }

    pub fn environment_list(&self) -> Option<&VariablesList> {
        self.environment.as_ref()
    }

    pub fn system_list(&self) -> Option<&VariablesList> {
        self.system.as_ref()
    }

    /// Environment list for interaction; `None` while closed.
    pub fn environment_list_mut(&mut self) -> Option<&mut VariablesList> {
        if !self.opened {
            return None;
        }
        self.environment.as_mut()
    }

    pub fn focused_list(&self) -> Option<&VariablesList> {
        match self.focus {
            ListFocus::Environment => self.environment.as_ref(),
            ListFocus::System => self.system.as_ref(),
        }
    }

    /// Focused list for interaction; `None` while closed.
    pub fn focused_list_mut(&mut self) -> Option<&mut VariablesList> {
        if !self.opened {
            return None;
        }
        match self.focus {
            ListFocus::Environment => self.environment.as_mut(),
            ListFocus::System => self.system.as_mut(),
        }
    }

    /// Moves focus between the lists. Stays on the environment list while
    /// the system list is not mounted.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            ListFocus::Environment if self.system.is_some() => ListFocus::System,
            _ => ListFocus::Environment,
        };
    }

    pub fn take_notices(&mut self) -> Vec<OverlayNotice> {
        std::mem::take(&mut self.notices)
    }

    pub fn render(&self) -> OverlayRender {
        OverlayRender {
            opened: self.opened,
            intro: INTRO,
            environment: match &self.environment {
                Some(list) => EnvironmentSection::List(list.render()),
                None => EnvironmentSection::Loading,
            },
            system: self.system.as_ref().map(|list| list.render()),
            focus: self.focus,
            footer: FooterRender {
                close_label: CLOSE_LABEL,
                system_switch: self.system_variables_enabled,
            },
        }
    }
}

//! Variables list widget.
//!
//! Holds the view-state of one list (a user environment or the read-only
//! system set) and turns user gestures into outbound store events. The
//! variable collection is only ever replaced by `set_variables`; no gesture
//! mutates it locally.

use super::formatter::format_value;
use super::variable::{Variable, VariableId};
use crate::error::VarsError;
use crate::store::{ClipboardPort, CreateVariableRequest, DeleteVariableRequest, VariableStateChange, VariablesPort};
use crate::view::view_model::{ListBody, ListRender, RowRender, VisibilityToggle};
use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

pub const ENVIRONMENT_TITLE: &str = "Variables";
pub const SYSTEM_TITLE: &str = "System variables";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Name,
    Value,
    Enabled,
}

impl EditorField {
    pub fn next(self) -> Self {
        match self {
            EditorField::Name => EditorField::Value,
            EditorField::Value => EditorField::Enabled,
            EditorField::Enabled => EditorField::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            EditorField::Name => EditorField::Enabled,
            EditorField::Value => EditorField::Name,
            EditorField::Enabled => EditorField::Value,
        }
    }
}

/// In-progress edit copy of the open row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: VariableId,
    pub name: String,
    pub value: String,
    pub field: EditorField,
}

impl EditDraft {
    fn from_variable(variable: &Variable) -> Self {
        Self {
            id: variable.id.clone(),
            name: variable.name.clone(),
            value: variable.value.clone(),
            field: EditorField::Name,
        }
    }

    fn empty(id: VariableId) -> Self {
        Self {
            id,
            name: String::new(),
            value: String::new(),
            field: EditorField::Name,
        }
    }

    /// Text of the focused field, `None` on the enabled switch.
    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            EditorField::Name => Some(&mut self.name),
            EditorField::Value => Some(&mut self.value),
            EditorField::Enabled => None,
        }
    }
}

pub struct VariablesList {
    environment: String,
    system: bool,
    values_visible: bool,
    editing: Option<VariableId>,
    draft: Option<EditDraft>,
    // Created by `request_add` but not yet seen in a collection.
    pending_create: Option<VariableId>,
    variables: Vec<Variable>,
    selected: usize,
    filter: Option<Regex>,
}

impl VariablesList {
    pub fn new(environment: impl Into<String>, variables: Vec<Variable>, system: bool) -> Self {
        Self {
            environment: environment.into(),
            system,
            values_visible: false,
            editing: None,
            draft: None,
            pending_create: None,
            variables,
            selected: 0,
            filter: None,
        }
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn is_system(&self) -> bool {
        self.system
    }

    pub fn title(&self) -> &'static str {
        if self.system { SYSTEM_TITLE } else { ENVIRONMENT_TITLE }
    }

    pub fn values_visible(&self) -> bool {
        self.values_visible
    }

    pub fn set_values_visible(&mut self, visible: bool) {
        self.values_visible = visible;
    }

    pub fn editing(&self) -> Option<&VariableId> {
        self.editing.as_ref()
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.draft.as_mut()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn get(&self, id: &VariableId) -> Option<&Variable> {
        self.variables.iter().find(|v| &v.id == id)
    }

    /// Replaces the collection with the store's authoritative copy.
    pub fn set_variables(&mut self, variables: Vec<Variable>) {
        self.variables = variables;

        if let Some(id) = self.pending_create.clone() {
            if self.get(&id).is_some() {
                self.pending_create = None;
            }
        }

        if let Some(id) = self.editing.clone() {
            if self.pending_create.as_ref() == Some(&id) {
                debug!(%id, "Created variable not in collection yet, keeping editor");
            } else if self.get(&id).is_none() {
                debug!(%id, "Edited variable no longer present, closing editor");
                self.close_editor();
            } else {
                let position = self.visible().iter().position(|v| v.id == id);
                if let Some(index) = position {
                    self.selected = index;
                }
            }
        }
        self.clamp_selection();
    }

    pub fn toggle_values_visible(&mut self) {
        self.values_visible = !self.values_visible;
    }

    /// Asks the store for a new variable and opens its editor once the id is known.
    pub fn request_add(&mut self, port: &mut dyn VariablesPort) -> Option<VariableId> {
        if self.system {
            debug!("Add refused for system variables");
            return None;
        }
        let request = CreateVariableRequest {
            environment: self.environment.clone(),
        };
        match port.create_variable(&request) {
            Ok(Some(id)) => {
                self.editing = Some(id.clone());
                self.draft = Some(EditDraft::empty(id.clone()));
                self.pending_create = Some(id.clone());
                Some(id)
            }
            Ok(None) => {
                debug!(environment = %self.environment, "Create accepted without an id");
                None
            }
            Err(e) => {
                warn!(environment = %self.environment, error = %e, "Create variable failed");
                None
            }
        }
    }

    /// Opens the editor of `id`, closing any other open row.
    pub fn open_editor(&mut self, id: &VariableId) -> bool {
        if self.system {
            debug!(%id, "Editor refused for system variables");
            return false;
        }
        let Some(variable) = self.get(id) else {
            debug!(%id, "Editor refused for unknown variable");
            return false;
        };
        self.draft = Some(EditDraft::from_variable(variable));
        self.editing = Some(id.clone());
        self.pending_create = None;
        let position = self.visible().iter().position(|v| &v.id == id);
        if let Some(index) = position {
            self.selected = index;
        }
        true
    }

    pub fn close_editor(&mut self) {
        self.editing = None;
        self.draft = None;
        self.pending_create = None;
    }

    pub fn commit_name_change(&mut self, id: &VariableId, new_name: String, port: &mut dyn VariablesPort) -> bool {
        if !self.is_open_row(id) {
            return false;
        }
        self.send_update(port, VariableStateChange::name(id.clone(), new_name))
    }

    pub fn commit_value_change(&mut self, id: &VariableId, new_value: String, port: &mut dyn VariablesPort) -> bool {
        if !self.is_open_row(id) {
            return false;
        }
        self.send_update(port, VariableStateChange::value(id.clone(), new_value))
    }

    pub fn toggle_enabled(&mut self, id: &VariableId, port: &mut dyn VariablesPort) -> bool {
        if self.system {
            debug!(%id, "Toggle refused for system variables");
            return false;
        }
        let Some(enabled) = self.get(id).map(|v| v.enabled) else {
            return false;
        };
        self.send_update(port, VariableStateChange::enabled(id.clone(), !enabled))
    }

    pub fn request_delete(&mut self, id: &VariableId, port: &mut dyn VariablesPort) -> bool {
        if self.system {
            debug!(%id, "Delete refused for system variables");
            return false;
        }
        if self.get(id).is_none() {
            return false;
        }
        match port.delete_variable(&DeleteVariableRequest { id: id.clone() }) {
            Ok(()) => true,
            Err(e) => {
                warn!(%id, error = %e, "Delete variable failed");
                false
            }
        }
    }

    /// Copies the raw value of `id`. Returns `Ok(false)` for an unknown id.
    pub fn copy_value(&self, id: &VariableId, clipboard: &mut dyn ClipboardPort) -> Result<bool, VarsError> {
        let Some(variable) = self.get(id) else {
            return Ok(false);
        };
        clipboard.set_text(&variable.value)?;
        Ok(true)
    }

    /// Narrows rendered rows to names matching `pattern` (case-insensitive).
    /// An invalid pattern keeps the previous filter.
    pub fn set_filter(&mut self, pattern: Option<&str>) -> Result<(), VarsError> {
        self.filter = match pattern.filter(|p| !p.is_empty()) {
            Some(p) => Some(RegexBuilder::new(p).case_insensitive(true).build()?),
            None => None,
        };
        self.selected = 0;
        self.clamp_selection();
        Ok(())
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
        self.clamp_selection();
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_ref().map(|f| f.as_str())
    }

    pub fn select_next(&mut self) {
        let count = self.visible().len();
        if count > 0 && self.selected + 1 < count {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_id(&self) -> Option<VariableId> {
        self.visible().get(self.selected).map(|v| v.id.clone())
    }

    pub fn render(&self) -> ListRender {
        let visible = self.visible();
        let body = if visible.is_empty() {
            ListBody::Empty
        } else {
            ListBody::Rows(
                visible
                    .iter()
                    .enumerate()
                    .map(|(index, variable)| self.render_row(index, variable))
                    .collect(),
            )
        };

        ListRender {
            title: self.title(),
            environment: self.environment.clone(),
            add_action: !self.system,
            visibility: if self.values_visible {
                VisibilityToggle::Hide
            } else {
                VisibilityToggle::Show
            },
            filter: self.filter().map(str::to_string),
            body,
        }
    }

    fn render_row(&self, index: usize, variable: &Variable) -> RowRender {
        if let Some(draft) = self.draft.as_ref().filter(|d| d.id == variable.id) {
            return RowRender::Editor {
                id: variable.id.clone(),
                name: draft.name.clone(),
                value: draft.value.clone(),
                enabled: variable.enabled,
                focus: draft.field,
            };
        }
        RowRender::Item {
            id: variable.id.clone(),
            name: variable.name.clone(),
            value_label: format_value(&variable.value, !self.values_visible),
            enabled: variable.enabled,
            selected: index == self.selected,
            actions: !self.system,
        }
    }

    /// Rows passing the name filter. The open row is always kept.
    fn visible(&self) -> Vec<&Variable> {
        match &self.filter {
            Some(filter) => self
                .variables
                .iter()
                .filter(|v| self.editing.as_ref() == Some(&v.id) || filter.is_match(&v.name))
                .collect(),
            None => self.variables.iter().collect(),
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.visible().len();
        if count == 0 {
            self.selected = 0;
        } else if self.selected >= count {
            self.selected = count - 1;
        }
    }

    fn is_open_row(&self, id: &VariableId) -> bool {
        if self.system || self.editing.as_ref() != Some(id) {
            debug!(%id, "Commit ignored, row is not open for editing");
            return false;
        }
        if self.get(id).is_none() {
            debug!(%id, "Commit ignored, variable no longer present");
            return false;
        }
        true
    }

    fn send_update(&mut self, port: &mut dyn VariablesPort, change: VariableStateChange) -> bool {
        match port.update_variable_state(&change) {
            Ok(()) => true,
            Err(e) => {
                warn!(id = %change.id, field = ?change.field, error = %e, "Update variable failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, OutboundEvent};
    use crate::variables_model::formatter::MASKED_VALUE;
    use crate::variables_model::system::{StaticTable, SystemVariableSource};
    use crate::variables_model::{FieldValue, NewVariable, VariableField};

    fn seeded_store(size: usize) -> (MemoryStore, Vec<Variable>) {
        let mut store = MemoryStore::new();
        for i in 0..size {
            store.insert(
                "default",
                NewVariable {
                    name: format!("VAR_{i}"),
                    value: format!("value-{i}"),
                    enabled: i % 2 == 0,
                },
            );
        }
        let vars = store.variables("default").unwrap();
        (store, vars)
    }

    fn default_list(vars: Vec<Variable>) -> VariablesList {
        VariablesList::new("default", vars, false)
    }

    fn system_list() -> VariablesList {
        VariablesList::new("", StaticTable::demo().variables(), true)
    }

    struct FakeClipboard(Vec<String>);

    impl ClipboardPort for FakeClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), VarsError> {
            self.0.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_empty_environment_list() {
        let list = default_list(Vec::new());
        let render = list.render();

        assert_eq!(render.title, "Variables");
        assert!(render.add_action);
        assert_eq!(render.visibility, VisibilityToggle::Show);
        assert_eq!(render.body, ListBody::Empty);
    }

    #[test]
    fn test_empty_system_list() {
        let list = VariablesList::new("", Vec::new(), true);
        let render = list.render();

        assert_eq!(render.title, "System variables");
        assert!(!render.add_action);
        assert_eq!(render.body, ListBody::Empty);
    }

    #[test]
    fn test_visibility_toggle_label() {
        let mut list = default_list(Vec::new());
        list.toggle_values_visible();
        assert_eq!(list.render().visibility, VisibilityToggle::Hide);
    }

    #[test]
    fn test_renders_one_row_per_variable_masked() {
        let (_, vars) = seeded_store(10);
        let list = default_list(vars.clone());
        let render = list.render();

        assert_eq!(render.rows().len(), 10);
        match &render.rows()[0] {
            RowRender::Item { value_label, actions, .. } => {
                assert_eq!(value_label, &format_value(&vars[0].value, true));
                assert_eq!(value_label, MASKED_VALUE);
                assert!(*actions);
            }
            other => panic!("unexpected row {other:?}"),
        }
    }

    #[test]
    fn test_toggling_visibility_shows_raw_values() {
        let (_, vars) = seeded_store(10);
        let mut list = default_list(vars.clone());

        list.toggle_values_visible();
        match &list.render().rows()[0] {
            RowRender::Item { value_label, .. } => assert_eq!(value_label, &vars[0].value),
            other => panic!("unexpected row {other:?}"),
        }
        assert_eq!(list.variables(), vars.as_slice());
    }

    #[test]
    fn test_request_add_opens_editor_for_new_id() {
        let mut store = MemoryStore::new();
        let mut list = default_list(Vec::new());

        let id = list.request_add(&mut store).unwrap();
        assert_eq!(list.editing(), Some(&id));
        assert_eq!(
            store.events(),
            &[OutboundEvent::CreateVariableRequest(CreateVariableRequest {
                environment: "default".to_string()
            })]
        );

        for change in store.poll_changes() {
            list.set_variables(change.variables);
        }
        let render = list.render();
        assert_eq!(render.editor().map(|r| r.id()), Some(&id));
    }

    #[test]
    fn test_request_add_failure_leaves_editor_closed() {
        let mut store = MemoryStore::new();
        store.set_offline(true);
        let mut list = default_list(Vec::new());

        assert!(list.request_add(&mut store).is_none());
        assert!(list.editing().is_none());
    }

    #[test]
    fn test_open_editor_renders_single_editor() {
        let (_, vars) = seeded_store(3);
        let mut list = default_list(vars.clone());

        assert!(list.open_editor(&vars[0].id));
        assert_eq!(list.render().editor().map(|r| r.id()), Some(&vars[0].id));

        assert!(list.open_editor(&vars[1].id));
        let render = list.render();
        let editors: Vec<_> = render.rows().iter().filter(|r| r.is_editor()).collect();
        assert_eq!(editors.len(), 1);
        assert_eq!(editors[0].id(), &vars[1].id);
    }

    #[test]
    fn test_switching_rows_discards_draft() {
        let (_, vars) = seeded_store(3);
        let mut list = default_list(vars.clone());

        list.open_editor(&vars[0].id);
        let draft = list.draft_mut().unwrap();
        draft.name.push_str("_EDITED");
        draft.value = "unsaved".to_string();

        list.open_editor(&vars[1].id);
        assert_eq!(list.draft().unwrap().id, vars[1].id);

        list.open_editor(&vars[0].id);
        let draft = list.draft().unwrap();
        assert_eq!(draft.name, vars[0].name);
        assert_eq!(draft.value, vars[0].value);
    }

    #[test]
    fn test_created_editor_survives_refresh_without_it() {
        let (mut store, vars) = seeded_store(2);
        let mut list = default_list(vars.clone());

        let id = list.request_add(&mut store).unwrap();
        // A collection supplied before the store's refresh lacks the new row.
        list.set_variables(vars.clone());
        assert_eq!(list.editing(), Some(&id));

        for change in store.poll_changes() {
            list.set_variables(change.variables);
        }
        assert_eq!(list.editing(), Some(&id));
        assert_eq!(list.render().editor().map(|r| r.id()), Some(&id));

        // Once seen, a later removal closes it like any other row.
        store.delete_variable(&DeleteVariableRequest { id: id.clone() }).unwrap();
        for change in store.poll_changes() {
            list.set_variables(change.variables);
        }
        assert!(list.editing().is_none());
    }

    #[test]
    fn test_open_row_ignores_filter() {
        let list_vars = vec![
            Variable::new(VariableId::new("1"), "API_HOST", "a"),
            Variable::new(VariableId::new("2"), "PORT", "c"),
        ];
        let mut store = MemoryStore::new();
        let mut list = default_list(list_vars);
        list.set_filter(Some("^api")).unwrap();

        let id = list.request_add(&mut store).unwrap();
        for change in store.poll_changes() {
            list.set_variables(change.variables);
        }
        let render = list.render();
        assert_eq!(render.editor().map(|r| r.id()), Some(&id));
        assert_eq!(list.selected_id(), Some(id.clone()));

        list.close_editor();
        assert!(list.render().editor().is_none());
        assert!(list.render().rows().iter().all(|r| r.id() != &id));
    }

    #[test]
    fn test_close_editor() {
        let (_, vars) = seeded_store(2);
        let mut list = default_list(vars.clone());

        list.open_editor(&vars[0].id);
        list.close_editor();
        assert!(list.render().editor().is_none());
        assert!(list.draft().is_none());
    }

    #[test]
    fn test_commit_name_emits_update() {
        let (mut store, vars) = seeded_store(3);
        let mut list = default_list(vars.clone());
        let id = vars[0].id.clone();

        list.open_editor(&id);
        assert!(list.commit_name_change(&id, "updated-name".to_string(), &mut store));

        assert_eq!(
            store.events(),
            &[OutboundEvent::UpdateVariableState(VariableStateChange {
                id: id.clone(),
                field: VariableField::Name,
                new_value: FieldValue::Text("updated-name".to_string()),
            })]
        );
        // Local collection waits for the store.
        assert_eq!(list.get(&id).unwrap().name, "VAR_0");
    }

    #[test]
    fn test_commit_value_emits_update() {
        let (mut store, vars) = seeded_store(3);
        let mut list = default_list(vars.clone());
        let id = vars[1].id.clone();

        list.open_editor(&id);
        assert!(list.commit_value_change(&id, "updated-value".to_string(), &mut store));
        assert_eq!(store.events().len(), 1);
        match &store.events()[0] {
            OutboundEvent::UpdateVariableState(change) => {
                assert_eq!(change.id, id);
                assert_eq!(change.field, VariableField::Value);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_commit_requires_open_row() {
        let (mut store, vars) = seeded_store(3);
        let mut list = default_list(vars.clone());

        list.open_editor(&vars[0].id);
        assert!(!list.commit_name_change(&vars[1].id, "x".to_string(), &mut store));
        assert!(store.events().is_empty());
    }

    #[test]
    fn test_toggle_enabled_flips_flag() {
        let (mut store, vars) = seeded_store(5);
        let mut list = default_list(vars.clone());
        let id = vars[4].id.clone();

        list.open_editor(&id);
        assert!(list.toggle_enabled(&id, &mut store));
        assert_eq!(
            store.events(),
            &[OutboundEvent::UpdateVariableState(VariableStateChange::enabled(
                id.clone(),
                !vars[4].enabled
            ))]
        );
    }

    #[test]
    fn test_request_delete_emits_once() {
        let (mut store, vars) = seeded_store(3);
        let mut list = default_list(vars.clone());
        let id = vars[0].id.clone();

        assert!(list.request_delete(&id, &mut store));
        assert_eq!(
            store.events(),
            &[OutboundEvent::DeleteVariableRequest(DeleteVariableRequest { id: id.clone() })]
        );
        // Row stays until the store re-supplies the collection.
        assert!(list.get(&id).is_some());
        for change in store.poll_changes() {
            list.set_variables(change.variables);
        }
        assert!(list.get(&id).is_none());
        assert_eq!(list.render().rows().len(), 2);
    }

    #[test]
    fn test_system_list_refuses_every_mutation() {
        let mut store = MemoryStore::new();
        let mut list = system_list();
        let id = list.variables()[0].id.clone();

        assert!(list.request_add(&mut store).is_none());
        assert!(!list.open_editor(&id));
        assert!(!list.toggle_enabled(&id, &mut store));
        assert!(!list.request_delete(&id, &mut store));
        assert!(!list.commit_name_change(&id, "x".to_string(), &mut store));

        assert!(store.events().is_empty());
        assert!(list.editing().is_none());
        let render = list.render();
        assert!(render.editor().is_none());
        assert!(render.rows().iter().all(|r| matches!(r, RowRender::Item { actions: false, .. })));
    }

    #[test]
    fn test_stale_editor_closes_on_refresh() {
        let (mut store, vars) = seeded_store(2);
        let mut list = default_list(vars.clone());
        let id = vars[0].id.clone();

        list.open_editor(&id);
        store.delete_variable(&DeleteVariableRequest { id: id.clone() }).unwrap();
        for change in store.poll_changes() {
            list.set_variables(change.variables);
        }

        assert!(list.editing().is_none());
        assert!(!list.commit_value_change(&id, "late".to_string(), &mut store));
        assert_eq!(store.events().len(), 1);
    }

    #[test]
    fn test_selection_is_clamped() {
        let (_, vars) = seeded_store(3);
        let mut list = default_list(vars.clone());

        list.select_next();
        list.select_next();
        list.select_next();
        assert_eq!(list.selected_id(), Some(vars[2].id.clone()));

        list.set_variables(vars[..1].to_vec());
        assert_eq!(list.selected_id(), Some(vars[0].id.clone()));

        list.set_variables(Vec::new());
        assert_eq!(list.selected_id(), None);
        list.select_previous();
        assert_eq!(list.selected_id(), None);
    }

    #[test]
    fn test_filter_narrows_rows() {
        let list_vars = vec![
            Variable::new(VariableId::new("1"), "API_HOST", "a"),
            Variable::new(VariableId::new("2"), "api_token", "b"),
            Variable::new(VariableId::new("3"), "PORT", "c"),
        ];
        let mut list = default_list(list_vars);

        list.set_filter(Some("^api")).unwrap();
        assert_eq!(list.render().rows().len(), 2);
        assert_eq!(list.render().filter.as_deref(), Some("^api"));

        assert!(list.set_filter(Some("(")).is_err());
        assert_eq!(list.filter(), Some("^api"));

        list.set_filter(Some("nothing-matches")).unwrap();
        assert_eq!(list.render().body, ListBody::Empty);

        list.clear_filter();
        assert_eq!(list.filter(), None);
        assert_eq!(list.render().rows().len(), 3);
    }

    #[test]
    fn test_copy_value_uses_raw_value() {
        let list = system_list();
        let mut clipboard = FakeClipboard(Vec::new());
        let first = list.variables()[0].clone();

        assert!(list.copy_value(&first.id, &mut clipboard).unwrap());
        assert!(!list.copy_value(&VariableId::new("missing"), &mut clipboard).unwrap());
        assert_eq!(clipboard.0, vec![first.value]);
    }
}

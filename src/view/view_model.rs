/// View Model - Typed projections of widget state
/// The renderer only ever sees these values, never the widgets themselves.

use crate::variables_model::{EditorField, ListFocus, VariableId};

/// Label of the value-visibility toggle, named after what it will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityToggle {
    Show,
    Hide,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRender {
    /// Read-only row. `actions` is false for the system set.
    Item {
        id: VariableId,
        name: String,
        value_label: String,
        enabled: bool,
        selected: bool,
        actions: bool,
    },
    /// The single row currently open for editing.
    Editor {
        id: VariableId,
        name: String,
        value: String,
        enabled: bool,
        focus: EditorField,
    },
}

impl RowRender {
    pub fn id(&self) -> &VariableId {
        match self {
            RowRender::Item { id, .. } | RowRender::Editor { id, .. } => id,
        }
    }

    pub fn is_editor(&self) -> bool {
        matches!(self, RowRender::Editor { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBody {
    Empty,
    Rows(Vec<RowRender>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRender {
    pub title: &'static str,
    pub environment: String,
    pub add_action: bool,
    pub visibility: VisibilityToggle,
    pub filter: Option<String>,
    pub body: ListBody,
}

impl ListRender {
    pub fn rows(&self) -> &[RowRender] {
        match &self.body {
            ListBody::Empty => &[],
            ListBody::Rows(rows) => rows,
        }
    }

    pub fn editor(&self) -> Option<&RowRender> {
        self.rows().iter().find(|row| row.is_editor())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentSection {
    Loading,
    List(ListRender),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterRender {
    pub close_label: &'static str,
    pub system_switch: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayRender {
    pub opened: bool,
    pub intro: &'static str,
    pub environment: EnvironmentSection,
    pub system: Option<ListRender>,
    pub focus: ListFocus,
    pub footer: FooterRender,
}

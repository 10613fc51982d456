/// Variables model subsystem - Variable records and widget view-state
///
/// This module holds the variable data types, the value formatter, the
/// system-variable sources and the two widgets (list and overlay) as plain
/// state objects. Nothing in here touches the terminal.

pub mod variable;
pub mod formatter;
pub mod system;
pub mod list;
pub mod overlay;

// Re-export main types for convenience
pub use variable::{DEFAULT_ENVIRONMENT, FieldValue, NewVariable, Variable, VariableField, VariableId};
pub use formatter::{MASKED_VALUE, format_value};
pub use system::{OsEnvironment, StaticTable, SystemVariableSource};
pub use list::{EditDraft, EditorField, VariablesList};
pub use overlay::{ListFocus, OverlayNotice, VariablesOverlay};

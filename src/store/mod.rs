/// Store subsystem - The seam between the widgets and persistence
///
/// Widgets never write variables themselves. They send outbound events through
/// a `VariablesPort` and wait for the store to hand back a fresh collection.

pub mod events;
pub mod memory;
pub mod clipboard;

pub use events::{
    CollectionChanged, CreateVariableRequest, DeleteVariableRequest, OutboundEvent,
    VariableStateChange,
};
pub use memory::MemoryStore;
pub use clipboard::{ClipboardPort, SystemClipboard};

use crate::error::StoreResult;
use crate::variables_model::{Variable, VariableId};

/// Port to the external persistence layer.
pub trait VariablesPort {
    /// Requests a new, empty variable. Returns the id once the store has
    /// assigned one; `None` means the store accepted the request without
    /// telling us the id yet.
    fn create_variable(&mut self, request: &CreateVariableRequest) -> StoreResult<Option<VariableId>>;

    fn update_variable_state(&mut self, change: &VariableStateChange) -> StoreResult<()>;

    fn delete_variable(&mut self, request: &DeleteVariableRequest) -> StoreResult<()>;

    /// Drains collection-changed notices queued since the last call.
    fn poll_changes(&mut self) -> Vec<CollectionChanged>;

    fn environments(&self) -> Vec<String>;

    fn variables(&self, environment: &str) -> StoreResult<Vec<Variable>>;
}

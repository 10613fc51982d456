/// Controller subsystem - Handles all user input
///
/// Each mode has its own controller that turns key events into widget
/// operations, providing a clean separation between user interaction logic
/// and the widget state and view layers.

pub mod app;
pub mod browse;
pub mod closed;
pub mod edit;
pub mod filter;
pub mod shared_state;
pub mod command_types;
pub mod key_handler;

// Re-export public interface
pub use app::App;
pub use shared_state::{ModeController, ModeTransition, SharedState};
pub use command_types::{Command, Mode};

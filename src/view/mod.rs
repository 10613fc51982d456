/// View subsystem - Terminal rendering of widget projections
///
/// The widgets project their state into the types in `view_model`; the
/// renderer lays those projections out as terminal lines and redraws only
/// what changed.

pub mod view_model;
pub mod renderer;

// Re-export public interface
pub use view_model::{EnvironmentSection, ListBody, ListRender, OverlayRender, RowRender, VisibilityToggle};
pub use renderer::{LineStyle, RenderParams, ScreenLine, View};

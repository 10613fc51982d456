/// Configuration subsystem - Startup settings and preferences
///
/// This module handles loading settings from .varpanelrc files; command-line
/// flags are layered on top in `main`.

pub mod rc;

// Re-export public interface
pub use rc::{RcConfig, RcLoader};

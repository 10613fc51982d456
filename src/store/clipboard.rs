use crate::error::VarsError;
use tracing::debug;

/// Destination for copied variable values.
pub trait ClipboardPort {
    fn set_text(&mut self, text: &str) -> Result<(), VarsError>;
}

/// System clipboard via arboard. The handle is opened lazily so a missing
/// display only fails the copy, not the whole program.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self { inner: None }
    }
}

impl ClipboardPort for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), VarsError> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| VarsError::Clipboard(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        let clipboard = self
            .inner
            .as_mut()
            .ok_or_else(|| VarsError::Clipboard("not available".to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| VarsError::Clipboard(e.to_string()))?;
        debug!(bytes = text.len(), "Copied to clipboard");
        Ok(())
    }
}

//! Primitive services the host provides and the engine calls.

use crate::error::PryError;

pub trait Clipboard {
    fn read_text(&mut self) -> Result<String, PryError>;
    fn write_text(&mut self, text: &str) -> Result<(), PryError>;
}

/// Lets the engine ask the host to put keyboard focus on its search field.
pub trait FocusTarget {
    fn focus_search_field(&mut self);
}

/// The system clipboard through `arboard`. A fresh handle is opened per call
/// so nothing is held between user actions.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn read_text(&mut self) -> Result<String, PryError> {
        let mut cb = arboard::Clipboard::new()
            .map_err(|e| PryError::Clipboard(format!("init failed: {e}")))?;
        cb.get_text()
            .map_err(|e| PryError::Clipboard(format!("failed reading text: {e}")))
    }

    fn write_text(&mut self, text: &str) -> Result<(), PryError> {
        let mut cb = arboard::Clipboard::new()
            .map_err(|e| PryError::Clipboard(format!("init failed: {e}")))?;
        cb.set_text(text.to_owned())
            .map_err(|e| PryError::Clipboard(format!("failed writing text: {e}")))
    }
}

/// In-process clipboard for headless hosts and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    pub contents: String,
}

impl MemoryClipboard {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            contents: text.into(),
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn read_text(&mut self) -> Result<String, PryError> {
        Ok(self.contents.clone())
    }

    fn write_text(&mut self, text: &str) -> Result<(), PryError> {
        self.contents = text.to_owned();
        Ok(())
    }
}

/// Error type for clipboard access. Clipboard calls are best-effort side
/// effects: callers surface the error as a status message and carry on.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Seam for OS clipboard access, so the editor can be driven in tests
/// without a display server.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
    fn paste(&mut self) -> Result<String, ClipboardError>;
}

/// OS clipboard via arboard. The handle is opened per call — arboard
/// contexts are cheap and holding one open keeps the X11 selection alive
/// longer than we want.
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        arboard::Clipboard::new()
            .and_then(|mut cb| cb.set_text(text.to_string()))
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }

    fn paste(&mut self) -> Result<String, ClipboardError> {
        arboard::Clipboard::new()
            .and_then(|mut cb| cb.get_text())
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

/// In-memory clipboard for tests
#[cfg(test)]
#[derive(Default)]
pub struct MemClipboard {
    pub content: Option<String>,
}

/// Clipboard that always fails, for exercising the best-effort paths
#[cfg(test)]
pub struct BrokenClipboard;

#[cfg(test)]
impl Clipboard for BrokenClipboard {
    fn copy(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable("no display".into()))
    }

    fn paste(&mut self) -> Result<String, ClipboardError> {
        Err(ClipboardError::Unavailable("no display".into()))
    }
}

#[cfg(test)]
impl Clipboard for MemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.content = Some(text.to_string());
        Ok(())
    }

    fn paste(&mut self) -> Result<String, ClipboardError> {
        self.content
            .clone()
            .ok_or_else(|| ClipboardError::Unavailable("empty test clipboard".into()))
    }
}

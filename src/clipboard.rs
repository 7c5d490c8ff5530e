//! Copying the text report, with a synchronous fallback when the primary
//! clipboard is unavailable.

use std::fs;
use std::path::PathBuf;

use log::warn;

use crate::report::ExportError;

/// Something that can receive the report text.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), ExportError>;
}

/// Which writer ended up holding the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Primary,
    Fallback,
}

/// Tries `primary`, then `fallback` if the first write fails.
pub fn copy_with_fallback(
    primary: &mut dyn ClipboardWriter,
    fallback: &mut dyn ClipboardWriter,
    text: &str,
) -> Result<CopyOutcome, ExportError> {
    match primary.write_text(text) {
        Ok(()) => Ok(CopyOutcome::Primary),
        Err(e) => {
            warn!("clipboard write failed ({e}), using fallback");
            fallback.write_text(text)?;
            Ok(CopyOutcome::Fallback)
        }
    }
}

/// Writes the text into a file, used when no system clipboard is reachable.
#[derive(Debug, Clone)]
pub struct FileClipboard {
    pub path: PathBuf,
}

impl ClipboardWriter for FileClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ExportError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl ClipboardWriter for Broken {
        fn write_text(&mut self, _text: &str) -> Result<(), ExportError> {
            Err(ExportError::Clipboard("no display".into()))
        }
    }

    #[derive(Default)]
    struct Memory(Option<String>);

    impl ClipboardWriter for Memory {
        fn write_text(&mut self, text: &str) -> Result<(), ExportError> {
            self.0 = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn primary_success_skips_fallback() {
        let mut primary = Memory::default();
        let mut fallback = Memory::default();
        let out = copy_with_fallback(&mut primary, &mut fallback, "report").unwrap();
        assert_eq!(out, CopyOutcome::Primary);
        assert_eq!(primary.0.as_deref(), Some("report"));
        assert!(fallback.0.is_none());
    }

    #[test]
    fn failed_primary_uses_fallback() {
        let mut fallback = Memory::default();
        let out = copy_with_fallback(&mut Broken, &mut fallback, "report").unwrap();
        assert_eq!(out, CopyOutcome::Fallback);
        assert_eq!(fallback.0.as_deref(), Some("report"));
    }

    #[test]
    fn both_failing_reports_error() {
        assert!(copy_with_fallback(&mut Broken, &mut Broken, "report").is_err());
    }

    #[test]
    fn file_clipboard_writes_text() {
        let dir = tempfile::tempdir().unwrap();
        let mut clip = FileClipboard {
            path: dir.path().join("nested").join("report.md"),
        };
        clip.write_text("hello").unwrap();
        assert_eq!(fs::read_to_string(&clip.path).unwrap(), "hello");
    }
}

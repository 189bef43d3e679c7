use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;

use colored::Colorize;

use super::{ControllerError, DiagnosticSink, DisplaySurface, InputSource};

/// Shared text value. Clones observe the same value, so the event loop
/// can keep a handle while the controller owns another.
#[derive(Clone, Debug, Default)]
pub struct ValueField {
    value: Rc<RefCell<String>>,
}

impl ValueField {
    pub fn new(initial: &str) -> Self {
        Self {
            value: Rc::new(RefCell::new(initial.to_string())),
        }
    }

    pub fn set(&self, value: &str) {
        *self.value.borrow_mut() = value.to_string();
    }
}

impl InputSource for ValueField {
    fn current_value(&self) -> String {
        self.value.borrow().clone()
    }
}

#[derive(Debug, Default)]
pub struct StdoutSurface;

impl DisplaySurface for StdoutSurface {
    fn replace(&mut self, content: &[u8]) -> Result<(), ControllerError> {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(content)
            .and_then(|_| stdout.flush())
            .map_err(|e| ControllerError::SurfaceWrite {
                target: "stdout".to_string(),
                source: e,
            })
    }
}

impl<T: DisplaySurface + ?Sized> DisplaySurface for Box<T> {
    fn replace(&mut self, content: &[u8]) -> Result<(), ControllerError> {
        (**self).replace(content)
    }
}

/// Truncates and rewrites the whole file on every pass.
#[derive(Debug)]
pub struct FileSurface {
    path: PathBuf,
}

impl FileSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DisplaySurface for FileSurface {
    fn replace(&mut self, content: &[u8]) -> Result<(), ControllerError> {
        let to_err = |e| ControllerError::SurfaceWrite {
            target: self.path.display().to_string(),
            source: e,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(to_err)?;
        file.write_all(content).map_err(to_err)
    }
}

#[derive(Debug, Default)]
pub struct MemorySurface {
    content: Vec<u8>,
    replacements: usize,
}

impl MemorySurface {
    pub fn content_str(&self) -> String {
        String::from_utf8_lossy(&self.content).to_string()
    }

    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl DisplaySurface for MemorySurface {
    fn replace(&mut self, content: &[u8]) -> Result<(), ControllerError> {
        self.content = content.to_vec();
        self.replacements += 1;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink {
    quiet: bool,
}

impl ConsoleSink {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl DiagnosticSink for ConsoleSink {
    fn warn(&self, message: &str) {
        if self.quiet {
            return;
        }
        eprintln!(
            "{}{}{} {}",
            "[".bold().white(),
            "WRN".bold().yellow(),
            "]".bold().white(),
            message
        );
    }
}

#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: RefCell<Vec<String>>,
}

impl CollectingSink {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl DiagnosticSink for CollectingSink {
    fn warn(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

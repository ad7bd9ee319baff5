use std::collections::HashMap;

use crate::errors::errors::{Error, ErrorImpl};

/// Line number of every defined label.
#[derive(Debug, Default)]
pub struct LabelMap {
    lines: HashMap<String, u32>,
}

impl LabelMap {
    pub fn new() -> Self {
        LabelMap {
            lines: HashMap::new(),
        }
    }

    /// Records `label` at `line`. A label can only be defined once.
    pub fn put(&mut self, label: &str, line: u32) -> Result<(), Error> {
        if self.lines.contains_key(label) {
            return Err(Error::without_position(ErrorImpl::DuplicateLabel {
                label: String::from(label),
            }));
        }

        self.lines.insert(String::from(label), line);
        Ok(())
    }

    pub fn get(&self, label: &str) -> Result<u32, Error> {
        match self.lines.get(label) {
            Some(line) => Ok(*line),
            None => Err(Error::without_position(ErrorImpl::UndefinedLabel {
                label: String::from(label),
            })),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

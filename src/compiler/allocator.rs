use std::collections::HashMap;

use crate::errors::errors::{Error, ErrorImpl};

/// Target variable that carries function results back to the caller.
pub const RETURN_VARIABLE: &str = "Z";

const LETTERS: [char; 25] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y',
];

const MAX_DIGIT: usize = 9;

/// Hands out fresh labels for one compilation. The counter is shared by all
/// prefixes, so no two labels are ever equal.
#[derive(Debug)]
pub struct LabelGenerator {
    counter: u32,
}

impl LabelGenerator {
    pub fn new() -> Self {
        LabelGenerator { counter: 1 }
    }

    pub fn new_label(&mut self, prefix: &str) -> String {
        let prefix = if prefix.is_empty() { "L" } else { prefix };
        let label = format!("{}{}", prefix, self.counter);
        self.counter += 1;
        label
    }
}

impl Default for LabelGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps storage keys to target variable names in first-use order:
/// `A`..`Y`, then `A1`..`Y1`, `A2`.. up to `Y9`.
#[derive(Debug, Default)]
pub struct VariableMapper {
    mapping: HashMap<String, String>,
}

impl VariableMapper {
    pub fn new() -> Self {
        VariableMapper {
            mapping: HashMap::new(),
        }
    }

    pub fn capacity() -> usize {
        LETTERS.len() * (MAX_DIGIT + 1)
    }

    fn name_for(index: usize) -> Result<String, Error> {
        let letter = LETTERS[index % LETTERS.len()];
        let digit = index / LETTERS.len();

        match digit {
            0 => Ok(letter.to_string()),
            digit if digit <= MAX_DIGIT => Ok(format!("{}{}", letter, digit)),
            _ => Err(Error::without_position(ErrorImpl::CapacityError {
                message: format!(
                    "Too many variables: the target language has only {} variable names",
                    Self::capacity()
                ),
            })),
        }
    }

    /// Target name of `key`, assigning the next free one on first use.
    pub fn map(&mut self, key: &str) -> Result<String, Error> {
        if let Some(name) = self.mapping.get(key) {
            return Ok(name.clone());
        }

        let name = Self::name_for(self.mapping.len())?;
        self.mapping.insert(String::from(key), name.clone());
        Ok(name)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.mapping.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{LabelGenerator, VariableMapper};

    #[test]
    fn test_labels_are_unique() {
        let mut labels = LabelGenerator::new();

        assert_eq!(labels.new_label("T"), "T1");
        assert_eq!(labels.new_label("E"), "E2");
        assert_eq!(labels.new_label("T"), "T3");
        assert_eq!(labels.new_label(""), "L4");
    }

    #[test]
    fn test_mapping_is_memoized() {
        let mut mapper = VariableMapper::new();

        assert_eq!(mapper.map("x").unwrap(), "A");
        assert_eq!(mapper.map("main.y").unwrap(), "B");
        assert_eq!(mapper.map("x").unwrap(), "A");
        assert_eq!(mapper.len(), 2);
    }

    #[test]
    fn test_mapping_order_and_capacity() {
        let mut mapper = VariableMapper::new();
        let names: Vec<String> = (0..VariableMapper::capacity())
            .map(|index| mapper.map(&format!("v{}", index)).unwrap())
            .collect();

        assert_eq!(names[0], "A");
        assert_eq!(names[24], "Y");
        assert_eq!(names[25], "A1");
        assert_eq!(names[26], "B1");
        assert_eq!(names[50], "A2");
        assert_eq!(names[249], "Y9");
        assert!(!names.iter().any(|name| name.starts_with('Z')));

        let error = mapper.map("one too many").unwrap_err();
        assert_eq!(error.get_error_name(), "CapacityError");
    }
}

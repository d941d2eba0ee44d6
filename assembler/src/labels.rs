use std::collections::HashMap;

use crate::error::{AssembleError, ErrorKind};
use crate::line::Line;

/// What to do when the same label is defined twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateLabels {
    /// The later definition replaces the earlier one.
    #[default]
    Overwrite,
    Reject,
}

/// Label name to instruction address. Complete once the first pass ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    addrs: HashMap<String, usize>,
    // line index of each definition, for duplicate reports
    defined_at: HashMap<String, usize>,
}

impl LabelTable {
    pub fn get(&self, name: &str) -> Option<usize> {
        self.addrs.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.addrs.iter().map(|(name, &addr)| (name.as_str(), addr))
    }

    /// Scans every line, binding each `(name)` to the number of instructions
    /// seen before it.
    pub fn build<S: AsRef<str>>(lines: &[S], policy: DuplicateLabels) -> Result<Self, AssembleError> {
        let mut table = Self::default();
        let mut offset = 0usize;
        for (index, text) in lines.iter().enumerate() {
            let text = text.as_ref();
            if text.is_empty() {
                continue;
            }
            let line = Line::classify(text);
            if line.is_instruction() {
                offset += 1;
                continue;
            }
            let name = label_name(text).map_err(|kind| AssembleError::new(index, text, kind))?;
            table.define(name, offset, index, policy)?;
        }
        Ok(table)
    }

    fn define(
        &mut self,
        name: &str,
        offset: usize,
        index: usize,
        policy: DuplicateLabels,
    ) -> Result<(), AssembleError> {
        if let Some(&first) = self.defined_at.get(name) {
            if policy == DuplicateLabels::Reject {
                return Err(AssembleError::new(
                    index,
                    format!("({})", name),
                    ErrorKind::DuplicateLabel {
                        name: name.to_owned(),
                        first,
                        second: index,
                    },
                ));
            }
        }
        self.addrs.insert(name.to_owned(), offset);
        self.defined_at.insert(name.to_owned(), index);
        Ok(())
    }
}

/// The text strictly between the parentheses of `(name)`.
pub fn label_name(def: &str) -> Result<&str, ErrorKind> {
    def.strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ErrorKind::MalformedLabel(def.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_addresses() {
        let lines = ["@100", "D=M", "@LOOP", "(LOOP)", "0;JMP"];
        let table = LabelTable::build(&lines, DuplicateLabels::Overwrite).unwrap();
        assert_eq!(table.len(), 1);
        // three instructions precede the definition
        assert_eq!(table.get("LOOP"), Some(3));
        assert_eq!(table.get("END"), None);
    }

    #[test]
    fn test_consecutive_labels_share_address() {
        let lines = ["(START)", "(BEGIN)", "@0", "(END)", "(STOP)"];
        let table = LabelTable::build(&lines, DuplicateLabels::Overwrite).unwrap();
        assert_eq!(table.get("START"), Some(0));
        assert_eq!(table.get("BEGIN"), Some(0));
        // labels after the last instruction point one past it
        assert_eq!(table.get("END"), Some(1));
        assert_eq!(table.get("STOP"), Some(1));
    }

    #[test]
    fn test_empty_lines_are_not_counted() {
        let lines = ["@1", "", "D=A", "", "(X)"];
        let table = LabelTable::build(&lines, DuplicateLabels::Overwrite).unwrap();
        assert_eq!(table.get("X"), Some(2));
    }

    #[test]
    fn test_duplicate_overwrite() {
        let lines = ["(A)", "@1", "(A)", "@2"];
        let table = LabelTable::build(&lines, DuplicateLabels::Overwrite).unwrap();
        assert_eq!(table.get("A"), Some(1));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_duplicate_reject() {
        let lines = ["(A)", "@1", "(A)", "@2"];
        let err = LabelTable::build(&lines, DuplicateLabels::Reject).unwrap_err();
        assert_eq!(err.index, 2);
        assert_eq!(
            err.kind,
            ErrorKind::DuplicateLabel {
                name: "A".to_string(),
                first: 0,
                second: 2,
            }
        );
    }

    #[test]
    fn test_label_name() {
        assert_eq!(label_name("(LOOP)"), Ok("LOOP"));
        assert_eq!(label_name("(ponggame.run$if_end0)"), Ok("ponggame.run$if_end0"));
        assert_eq!(label_name("()"), Err(ErrorKind::MalformedLabel("()".to_string())));
        assert_eq!(label_name("(LOOP"), Err(ErrorKind::MalformedLabel("(LOOP".to_string())));
    }

    #[test]
    fn test_malformed_label_reports_line() {
        let lines = ["@1", "(BROKEN"];
        let err = LabelTable::build(&lines, DuplicateLabels::Overwrite).unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.text, "(BROKEN");
    }
}

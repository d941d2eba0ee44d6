/// A cleaned line and the one-based line number it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

impl AsRef<str> for SourceLine {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

// COMMENT = "//" text "\n"
pub fn clean_line(raw: &str) -> Option<&str> {
    let code = match raw.find("//") {
        Some(at) => &raw[..at],
        None => raw,
    };
    let code = code.trim();
    (!code.is_empty()).then_some(code)
}

/// Strips comments and blank lines, keeping each survivor's line number.
pub fn clean_source(text: &str) -> Vec<SourceLine> {
    text.lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            clean_line(raw).map(|code| SourceLine {
                number: i + 1,
                text: code.to_string(),
            })
        })
        .collect()
}

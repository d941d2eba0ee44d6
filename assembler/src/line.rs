/// A cleaned source line, tagged by its first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `(name)`; holds the whole text, parentheses included.
    Label(&'a str),
    /// `@operand`; holds the operand without the `@`.
    Address(&'a str),
    /// Anything else.
    Compute(&'a str),
}

impl<'a> Line<'a> {
    pub fn classify(text: &'a str) -> Self {
        match text.as_bytes().first() {
            Some(b'(') => Line::Label(text),
            Some(b'@') => Line::Address(&text[1..]),
            _ => Line::Compute(text),
        }
    }

    /// Labels take no space in instruction memory.
    pub fn is_instruction(&self) -> bool {
        !matches!(self, Line::Label(_))
    }
}

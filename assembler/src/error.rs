use thiserror::Error;

/// Why a single line could not be translated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("unknown computation '{0}'")]
    UnknownComputation(String),
    #[error("unknown destination '{0}'")]
    UnknownDestination(String),
    #[error("unknown jump '{0}'")]
    UnknownJump(String),
    #[error("address {0} does not fit in 15 bits")]
    AddressOutOfRange(String),
    #[error("no data memory left for variable '{0}'")]
    VariableSpaceExhausted(String),
    #[error("address instruction without an operand")]
    EmptyAddress,
    #[error("malformed label definition '{0}'")]
    MalformedLabel(String),
    #[error("label '{name}' defined at line {second} was already defined at line {first}")]
    DuplicateLabel {
        name: String,
        first: usize,
        second: usize,
    },
}

/// A translation failure tied to the line that caused it.
///
/// `index` is the zero-based position of the line in the sequence handed to
/// the assembler; callers that cleaned a file map it back to a source line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {index} '{text}': {kind}")]
pub struct AssembleError {
    pub index: usize,
    pub text: String,
    #[source]
    pub kind: ErrorKind,
}

impl AssembleError {
    pub fn new(index: usize, text: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            index,
            text: text.into(),
            kind,
        }
    }
}

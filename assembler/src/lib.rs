#[macro_use]
extern crate lazy_static;

pub mod encoder;
pub mod error;
pub mod labels;
pub mod line;
pub mod parser;
pub mod source;
pub mod symbols;
pub mod tables;

use log::{debug, trace};

pub use encoder::{encode_address, encode_compute, Word, MAX_ADDRESS};
pub use error::{AssembleError, ErrorKind};
pub use labels::{DuplicateLabels, LabelTable};
pub use line::Line;
pub use parser::ComputeFields;
pub use symbols::{Symbol, SymbolResolver, Variables, RAM_BASE};
pub use tables::{EncodingTables, HACK};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub duplicate_labels: DuplicateLabels,
}

/// Two-pass translator from cleaned Hack assembly lines to machine words.
///
/// The first pass must see every line before the second pass starts, since a
/// label may be referenced above its definition.
pub struct Assembler<'t> {
    tables: &'t EncodingTables,
    options: Options,
}

impl Assembler<'static> {
    pub fn new() -> Self {
        Self::with_tables(&HACK)
    }
}

impl Default for Assembler<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t> Assembler<'t> {
    pub fn with_tables(tables: &'t EncodingTables) -> Self {
        Self {
            tables,
            options: Options::default(),
        }
    }

    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn first_pass<S: AsRef<str>>(&self, lines: &[S]) -> Result<LabelTable, AssembleError> {
        let labels = LabelTable::build(lines, self.options.duplicate_labels)?;
        debug!("first pass: {} labels over {} lines", labels.len(), lines.len());
        for (name, addr) in labels.iter() {
            trace!("label {} = {}", name, addr);
        }
        Ok(labels)
    }

    pub fn second_pass<'a>(&self, labels: &'a LabelTable) -> SecondPass<'a>
    where
        't: 'a,
    {
        SecondPass {
            tables: self.tables,
            resolver: SymbolResolver::new(self.tables, labels),
        }
    }

    /// Translates every line, handing each word to `emit` as it is produced.
    /// Stops at the first failure.
    pub fn run<S, F>(&self, lines: &[S], mut emit: F) -> Result<Variables, AssembleError>
    where
        S: AsRef<str>,
        F: FnMut(Word),
    {
        let labels = self.first_pass(lines)?;
        let mut pass = self.second_pass(&labels);
        let mut count = 0usize;
        for (index, text) in lines.iter().enumerate() {
            if let Some(word) = pass.translate(index, text.as_ref())? {
                emit(word);
                count += 1;
            }
        }
        let variables = pass.finish();
        debug!("second pass: {} words, {} variables", count, variables.len());
        for (name, addr) in variables.iter() {
            trace!("variable {} = {}", name, addr);
        }
        Ok(variables)
    }

    pub fn assemble<S: AsRef<str>>(&self, lines: &[S]) -> Result<Vec<Word>, AssembleError> {
        let mut words = Vec::with_capacity(lines.len());
        self.run(lines, |word| words.push(word))?;
        Ok(words)
    }

    /// Like [`Assembler::assemble`], but keeps translating after a failing
    /// instruction and collects every failure.
    pub fn assemble_reporting<S: AsRef<str>>(&self, lines: &[S]) -> Report {
        let labels = match self.first_pass(lines) {
            Ok(labels) => labels,
            Err(err) => {
                return Report {
                    words: Vec::new(),
                    errors: vec![err],
                    variables: Vec::new(),
                }
            }
        };
        let mut pass = self.second_pass(&labels);
        let mut words = Vec::with_capacity(lines.len());
        let mut errors = Vec::new();
        for (index, text) in lines.iter().enumerate() {
            match pass.translate(index, text.as_ref()) {
                Ok(Some(word)) => words.push(word),
                Ok(None) => {}
                Err(err) => errors.push(err),
            }
        }
        debug!(
            "second pass: {} words, {} errors, {} variables",
            words.len(),
            errors.len(),
            pass.variables().len()
        );
        Report {
            words,
            errors,
            variables: pass.finish().into_vec(),
        }
    }
}

/// Second-pass state: the finished label table plus the variables allocated
/// so far.
pub struct SecondPass<'a> {
    tables: &'a EncodingTables,
    resolver: SymbolResolver<'a>,
}

impl<'a> SecondPass<'a> {
    /// Returns `None` for lines that produce no word (labels, empty lines).
    pub fn translate(&mut self, index: usize, text: &str) -> Result<Option<Word>, AssembleError> {
        if text.is_empty() {
            return Ok(None);
        }
        let word = match Line::classify(text) {
            Line::Label(_) => return Ok(None),
            Line::Address(operand) => self.resolver.resolve(operand).and_then(|symbol| {
                trace!("@{} -> {:?}", operand, symbol);
                encode_address(symbol.addr())
            }),
            Line::Compute(body) => encode_compute(self.tables, &ComputeFields::parse(body)),
        };
        word.map(Some)
            .map_err(|kind| AssembleError::new(index, text, kind))
    }

    pub fn variables(&self) -> &Variables {
        self.resolver.variables()
    }

    pub fn finish(self) -> Variables {
        self.resolver.into_variables()
    }
}

/// Outcome of [`Assembler::assemble_reporting`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub words: Vec<Word>,
    pub errors: Vec<AssembleError>,
    /// Variables in order of first use.
    pub variables: Vec<(String, u16)>,
}

impl Report {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Assembles cleaned lines with the standard tables, one 16-character
/// binary string per instruction.
pub fn assemble<S: AsRef<str>>(lines: &[S]) -> Result<Vec<String>, AssembleError> {
    let words = Assembler::new().assemble(lines)?;
    Ok(words.iter().map(Word::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::clean_source;
    use test_log::test;

    static SUM_CODE: &str = r##"// Adds 1+...+100.
    @i     // i refers to some mem. location.
    M=1    // i=1
    @sum   // sum refers to some mem. location.
    M=0    // sum=0
(LOOP)
    @i
    D=M    // D=i
    @100
    D=D-A  // D=i-100
    @END
    D;JGT  // If (i-100)>0 goto END
    @i
    D=M    // D=i
    @sum
    M=D+M  // sum=sum+i
    @i
    M=M+1  // i=i+1
    @LOOP
    0;JMP  // Goto LOOP
(END)
    @END
    0;JMP  // Infinite loop
"##;

    static SUM_HACK: [&str; 20] = [
        "0000000000010000",
        "1110111111001000",
        "0000000000010001",
        "1110101010001000",
        "0000000000010000",
        "1111110000010000",
        "0000000001100100",
        "1110010011010000",
        "0000000000010010",
        "1110001100000001",
        "0000000000010000",
        "1111110000010000",
        "0000000000010001",
        "1111000010001000",
        "0000000000010000",
        "1111110111001000",
        "0000000000000100",
        "1110101010000111",
        "0000000000010010",
        "1110101010000111",
    ];

    #[test]
    fn test_assemble() {
        let lines = clean_source(SUM_CODE);
        assert_eq!(assemble(&lines).unwrap(), SUM_HACK);
    }

    #[test]
    fn test_first_pass() {
        let lines = clean_source(SUM_CODE);
        let labels = Assembler::new().first_pass(&lines).unwrap();
        assert_eq!(labels.get("LOOP"), Some(4));
        assert_eq!(labels.get("END"), Some(18));
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn test_forward_reference() {
        let lines = ["@100", "D=M", "@LOOP", "(LOOP)", "0;JMP"];
        let asm = Assembler::new();
        let labels = asm.first_pass(&lines).unwrap();
        assert_eq!(labels.get("LOOP"), Some(3));
        assert_eq!(
            assemble(&lines).unwrap(),
            [
                "0000000001100100",
                "1111110000010000",
                "0000000000000011",
                "1110101010000111",
            ]
        );
    }

    #[test]
    fn test_run_streams_words() {
        let lines = ["@COUNT", "@SUM", "@COUNT", "M"];
        let mut words = Vec::new();
        let variables = Assembler::new().run(&lines, |w| words.push(w)).unwrap();
        assert_eq!(words, [Word(16), Word(17), Word(16), Word(0b1111110000000000)]);
        assert_eq!(variables.get("COUNT"), Some(16));
        assert_eq!(variables.get("SUM"), Some(17));
    }

    #[test]
    fn test_second_pass_by_hand() {
        let lines = ["(TOP)", "@x", "D=M", "@TOP", "D;JNE"];
        let asm = Assembler::new();
        let labels = asm.first_pass(&lines).unwrap();
        let mut pass = asm.second_pass(&labels);
        let words: Vec<Option<Word>> = lines
            .iter()
            .enumerate()
            .map(|(i, l)| pass.translate(i, l).unwrap())
            .collect();
        assert_eq!(words[0], None);
        assert_eq!(words[1], Some(Word(16)));
        assert_eq!(words[3], Some(Word(0)));
        assert_eq!(pass.variables().len(), 1);
    }

    #[test]
    fn test_error_identifies_instruction() {
        let lines = ["@1", "D=Q", "0;JMP"];
        let err = assemble(&lines).unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.text, "D=Q");
        assert_eq!(err.kind, ErrorKind::UnknownComputation("Q".to_string()));
    }

    #[test]
    fn test_assemble_reporting_collects_all() {
        let lines = ["@x", "D=Q", "@40000", "M=D;JUMP", "@y"];
        let report = Assembler::new().assemble_reporting(&lines);
        assert!(!report.is_ok());
        let indices: Vec<usize> = report.errors.iter().map(|e| e.index).collect();
        assert_eq!(indices, [1, 2, 3]);
        assert_eq!(report.words, [Word(16), Word(17)]);
        assert_eq!(
            report.variables,
            vec![("x".to_string(), 16), ("y".to_string(), 17)]
        );
    }

    #[test]
    fn test_assemble_reporting_first_pass_failure() {
        let lines = ["(A)", "(A)"];
        let asm = Assembler::new().options(Options {
            duplicate_labels: DuplicateLabels::Reject,
        });
        let report = asm.assemble_reporting(&lines);
        assert_eq!(report.errors.len(), 1);
        assert!(report.words.is_empty());
    }

    #[test]
    fn test_empty_lines_are_skipped() {
        let lines = ["", "@1", "", "(X)", "", "@X"];
        assert_eq!(
            assemble(&lines).unwrap(),
            ["0000000000000001", "0000000000000001"]
        );
    }

    #[test]
    fn test_custom_tables() {
        let tables = EncodingTables::hack();
        let words = Assembler::with_tables(&tables).assemble(&["@KBD"]).unwrap();
        assert_eq!(words, [Word(24576)]);
    }
}

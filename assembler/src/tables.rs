use std::collections::HashMap;

/// Computation mnemonics that operate on the A register (a-bit 0).
///
/// The six bits are the ALU control lines `zx nx zy ny f no`.
pub const COMP_A0: [(&str, u16); 18] = [
    ("0", 0b101010),
    ("1", 0b111111),
    ("-1", 0b111010),
    ("D", 0b001100),
    ("A", 0b110000),
    ("!D", 0b001101),
    ("!A", 0b110001),
    ("-D", 0b001111),
    ("-A", 0b110011),
    ("D+1", 0b011111),
    ("A+1", 0b110111),
    ("D-1", 0b001110),
    ("A-1", 0b110010),
    ("D+A", 0b000010),
    ("D-A", 0b010011),
    ("A-D", 0b000111),
    ("D&A", 0b000000),
    ("D|A", 0b010101),
];

/// Computation mnemonics that operate on memory cell M (a-bit 1).
pub const COMP_A1: [(&str, u16); 10] = [
    ("M", 0b110000),
    ("!M", 0b110001),
    ("-M", 0b110011),
    ("M+1", 0b110111),
    ("M-1", 0b110010),
    ("D+M", 0b000010),
    ("D-M", 0b010011),
    ("M-D", 0b000111),
    ("D&M", 0b000000),
    ("D|M", 0b010101),
];

/// Destination mnemonics.
///
/// `DM` shares `MD`'s bits and every ordering of `ADM` shares `AMD`'s bits;
/// programs written for the historical toolchain rely on both spellings.
pub const DEST: [(&str, u16); 14] = [
    ("null", 0b000),
    ("M", 0b001),
    ("D", 0b010),
    ("MD", 0b011),
    ("DM", 0b011),
    ("A", 0b100),
    ("AM", 0b101),
    ("AD", 0b110),
    ("AMD", 0b111),
    ("ADM", 0b111),
    ("DAM", 0b111),
    ("DMA", 0b111),
    ("MAD", 0b111),
    ("MDA", 0b111),
];

pub const JUMP: [(&str, u16); 8] = [
    ("null", 0b000),
    ("JGT", 0b001),
    ("JEQ", 0b010),
    ("JGE", 0b011),
    ("JLT", 0b100),
    ("JNE", 0b101),
    ("JLE", 0b110),
    ("JMP", 0b111),
];

pub const SCREEN: u16 = 16384;
pub const KBD: u16 = 24576;

/// Reserved names bound to fixed hardware addresses.
pub const PREDEFINED_SYMBOLS: [(&str, u16); 23] = [
    ("R0", 0),
    ("R1", 1),
    ("R2", 2),
    ("R3", 3),
    ("R4", 4),
    ("R5", 5),
    ("R6", 6),
    ("R7", 7),
    ("R8", 8),
    ("R9", 9),
    ("R10", 10),
    ("R11", 11),
    ("R12", 12),
    ("R13", 13),
    ("R14", 14),
    ("R15", 15),
    ("SP", 0),
    ("LCL", 1),
    ("ARG", 2),
    ("THIS", 3),
    ("THAT", 4),
    ("SCREEN", SCREEN),
    ("KBD", KBD),
];

lazy_static! {
    /// The standard Hack tables, built once per process.
    pub static ref HACK: EncodingTables = EncodingTables::hack();
}

/// Lookup tables consulted by the encoder and the symbol resolver.
///
/// Never mutated after construction; the assembler only ever holds a
/// shared reference.
#[derive(Debug, Clone)]
pub struct EncodingTables {
    comp_a0: HashMap<&'static str, u16>,
    comp_a1: HashMap<&'static str, u16>,
    dest: HashMap<&'static str, u16>,
    jump: HashMap<&'static str, u16>,
    predefined: HashMap<&'static str, u16>,
}

impl EncodingTables {
    pub fn hack() -> Self {
        Self {
            comp_a0: COMP_A0.into_iter().collect(),
            comp_a1: COMP_A1.into_iter().collect(),
            dest: DEST.into_iter().collect(),
            jump: JUMP.into_iter().collect(),
            predefined: PREDEFINED_SYMBOLS.into_iter().collect(),
        }
    }

    /// Looks up a computation, returning the a-bit with its six ALU bits.
    /// The A-register table wins when a mnemonic appears in both.
    pub fn comp(&self, mnemonic: &str) -> Option<(u16, u16)> {
        if let Some(&bits) = self.comp_a0.get(mnemonic) {
            return Some((0, bits));
        }
        self.comp_a1.get(mnemonic).map(|&bits| (1, bits))
    }

    pub fn dest(&self, mnemonic: &str) -> Option<u16> {
        self.dest.get(mnemonic).copied()
    }

    pub fn jump(&self, mnemonic: &str) -> Option<u16> {
        self.jump.get(mnemonic).copied()
    }

    pub fn predefined(&self, symbol: &str) -> Option<u16> {
        self.predefined.get(symbol).copied()
    }
}

impl Default for EncodingTables {
    fn default() -> Self {
        Self::hack()
    }
}

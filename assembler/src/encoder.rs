use std::fmt;

use crate::error::ErrorKind;
use crate::parser::ComputeFields;
use crate::tables::EncodingTables;

/// Largest value an address instruction can carry.
pub const MAX_ADDRESS: u16 = 0x7fff;

/// One 16-bit machine instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Word(pub u16);

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:016b}", self.0)
    }
}

/// `0vvv vvvv vvvv vvvv`
pub fn encode_address(value: u16) -> Result<Word, ErrorKind> {
    if value > MAX_ADDRESS {
        return Err(ErrorKind::AddressOutOfRange(value.to_string()));
    }
    Ok(Word(value))
}

/// `111a cccc ccdd djjj`
pub fn encode_compute(tables: &EncodingTables, fields: &ComputeFields) -> Result<Word, ErrorKind> {
    let (a, comp) = tables
        .comp(fields.comp)
        .ok_or_else(|| ErrorKind::UnknownComputation(fields.comp.to_string()))?;
    let dest = match fields.dest {
        Some(dest) => tables
            .dest(dest)
            .ok_or_else(|| ErrorKind::UnknownDestination(dest.to_string()))?,
        None => 0,
    };
    let jump = match fields.jump {
        Some(jump) => tables
            .jump(jump)
            .ok_or_else(|| ErrorKind::UnknownJump(jump.to_string()))?,
        None => 0,
    };
    Ok(Word(0b1110000000000000 | a << 12 | comp << 6 | dest << 3 | jump))
}

use indexmap::IndexMap;

use crate::encoder::MAX_ADDRESS;
use crate::error::ErrorKind;
use crate::labels::LabelTable;
use crate::tables::EncodingTables;

/// First data-memory address handed to a variable.
pub const RAM_BASE: u16 = 16;

/// Variables seen so far in the second pass, in order of first use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variables {
    slots: IndexMap<String, u16>,
    next: u16,
}

impl Variables {
    pub fn new() -> Self {
        Self {
            slots: IndexMap::new(),
            next: RAM_BASE,
        }
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.slots.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u16)> {
        self.slots.iter().map(|(name, &addr)| (name.as_str(), addr))
    }

    pub fn into_vec(self) -> Vec<(String, u16)> {
        self.slots.into_iter().collect()
    }

    fn allocate(&mut self, name: &str) -> Result<u16, ErrorKind> {
        if self.next > MAX_ADDRESS {
            return Err(ErrorKind::VariableSpaceExhausted(name.to_string()));
        }
        let addr = self.next;
        self.slots.insert(name.to_owned(), addr);
        self.next += 1;
        Ok(addr)
    }
}

impl Default for Variables {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a resolved operand came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Literal(u16),
    Predefined(u16),
    Label(u16),
    Variable(u16),
    NewVariable(u16),
}

impl Symbol {
    pub fn addr(self) -> u16 {
        match self {
            Symbol::Literal(addr)
            | Symbol::Predefined(addr)
            | Symbol::Label(addr)
            | Symbol::Variable(addr)
            | Symbol::NewVariable(addr) => addr,
        }
    }
}

/// Resolves address-instruction operands during the second pass.
///
/// Holds the finished label table and exclusively owns the variable state.
pub struct SymbolResolver<'a> {
    tables: &'a EncodingTables,
    labels: &'a LabelTable,
    variables: Variables,
}

impl<'a> SymbolResolver<'a> {
    pub fn new(tables: &'a EncodingTables, labels: &'a LabelTable) -> Self {
        Self {
            tables,
            labels,
            variables: Variables::new(),
        }
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn into_variables(self) -> Variables {
        self.variables
    }

    /// First match wins: number, predefined name, label, known variable;
    /// anything else becomes a new variable.
    pub fn resolve(&mut self, operand: &str) -> Result<Symbol, ErrorKind> {
        if operand.is_empty() {
            return Err(ErrorKind::EmptyAddress);
        }
        if operand.bytes().all(|c| c.is_ascii_digit()) {
            return parse_literal(operand).map(Symbol::Literal);
        }
        if let Some(addr) = self.tables.predefined(operand) {
            return Ok(Symbol::Predefined(addr));
        }
        if let Some(addr) = self.labels.get(operand) {
            return check_range(operand, addr).map(Symbol::Label);
        }
        if let Some(addr) = self.variables.get(operand) {
            return Ok(Symbol::Variable(addr));
        }
        self.variables.allocate(operand).map(Symbol::NewVariable)
    }
}

fn parse_literal(operand: &str) -> Result<u16, ErrorKind> {
    match operand.parse::<u16>() {
        Ok(value) if value <= MAX_ADDRESS => Ok(value),
        _ => Err(ErrorKind::AddressOutOfRange(operand.to_string())),
    }
}

fn check_range(operand: &str, addr: usize) -> Result<u16, ErrorKind> {
    match u16::try_from(addr) {
        Ok(value) if value <= MAX_ADDRESS => Ok(value),
        _ => Err(ErrorKind::AddressOutOfRange(operand.to_string())),
    }
}

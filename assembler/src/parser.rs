/// The three fields of a compute instruction, `dest=comp;jump`.
///
/// Fields missing from the source are `None`; an empty field that is
/// present (`=D`) is `Some("")` and is rejected later by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputeFields<'a> {
    pub dest: Option<&'a str>,
    pub comp: &'a str,
    pub jump: Option<&'a str>,
}

impl<'a> ComputeFields<'a> {
    // C-INSTR = (DEST "=")? COMP (";" JUMP)?
    pub fn parse(text: &'a str) -> Self {
        let (dest, rest) = match text.split_once('=') {
            Some((dest, rest)) => (Some(dest), rest),
            None => (None, text),
        };
        let (comp, jump) = match rest.split_once(';') {
            Some((comp, jump)) => (comp, Some(jump)),
            None => (rest, None),
        };
        Self { dest, comp, jump }
    }
}

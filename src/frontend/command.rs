//! The command IR produced by the parser.
//!
//! Supported instructions (one per line):
//!
//! ```nasm
//! add   xD, A, B   ; xD <= A + B
//! sub   xD, A, B   ; xD <= A - B
//! mov   xD, A      ; xD <= A
//! cmp   A, B       ; signed comparison, sets flags
//! cmp_u A, B       ; unsigned comparison, sets flags
//! print base, A    ; base is one of d, x, b, s
//! ```
//!
//! `A` and `B` are either a register `x0`..`x31` or an immediate written in
//! decimal, `0x` hexadecimal or `0b` binary.
use std::convert::TryFrom;
use std::fmt;

use super::lexer::TokenKind;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CommandKind {
    Add,
    Sub,
    Mov,
    Cmp,
    CmpU,
    Print,
}

/// What a single operand position accepts.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SlotKind {
    Unused,
    RegisterOrImmediate,
    Base,
}

/// The operand layout of an instruction kind.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Shape {
    pub destination: bool,
    pub operand_a:   SlotKind,
    pub operand_b:   SlotKind,
}

impl CommandKind {
    /// Maps an instruction keyword token to its command kind.
    pub fn from_keyword(kind: TokenKind) -> Option<CommandKind> {
        match kind {
            TokenKind::Add   => Some(CommandKind::Add),
            TokenKind::Sub   => Some(CommandKind::Sub),
            TokenKind::Mov   => Some(CommandKind::Mov),
            TokenKind::Cmp   => Some(CommandKind::Cmp),
            TokenKind::CmpU  => Some(CommandKind::CmpU),
            TokenKind::Print => Some(CommandKind::Print),
            _ => None,
        }
    }

    pub fn shape(self) -> Shape {
        use SlotKind::{RegisterOrImmediate as Value, Unused};
        let (destination, operand_a, operand_b) = match self {
            CommandKind::Add   |
            CommandKind::Sub   => (true,  Value,          Value),
            CommandKind::Mov   => (true,  Value,          Unused),
            CommandKind::Cmp   |
            CommandKind::CmpU  => (false, Value,          Value),
            CommandKind::Print => (false, SlotKind::Base, Value),
        };
        Shape { destination, operand_a, operand_b }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            CommandKind::Add   => "add",
            CommandKind::Sub   => "sub",
            CommandKind::Mov   => "mov",
            CommandKind::Cmp   => "cmp",
            CommandKind::CmpU  => "cmp_u",
            CommandKind::Print => "print",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// One of the 32 general purpose registers.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Register(u8);

impl Register {
    pub const COUNT: u8 = 32;

    pub fn index(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Register {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (0..i64::from(Register::COUNT)).contains(&value) {
            Ok(Register(value as u8))
        } else {
            Err(format!("registers may only have values from 0-{} inclusive", Register::COUNT - 1))
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// The radix a `print` renders its value in.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Base {
    Decimal,
    Hex,
    Binary,
    String,
}

impl Base {
    pub fn from_signifier(text: &str) -> Option<Base> {
        match text {
            "d" => Some(Base::Decimal),
            "x" => Some(Base::Hex),
            "b" => Some(Base::Binary),
            "s" => Some(Base::String),
            _ => None,
        }
    }

    pub fn signifier(self) -> char {
        match self {
            Base::Decimal => 'd',
            Base::Hex     => 'x',
            Base::Binary  => 'b',
            Base::String  => 's',
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.signifier())
    }
}

/// Immediates are stored as raw 64-bit patterns; `cmp` reads them as
/// signed and `cmp_u` as unsigned.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Operand {
    Register(Register),
    Immediate(u64),
    Base(Base),
}

impl Operand {
    pub fn is_immediate(&self) -> bool {
        matches!(self, Operand::Immediate(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Operand::Base(_))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operand::Register(reg) => write!(f, "{}", reg),
            Operand::Immediate(val) => write!(f, "{}", val),
            Operand::Base(base) => write!(f, "{}", base),
        }
    }
}

/// Set by the branch resolution stage; the parser always leaves it at `None`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BranchCondition {
    None,
    Always,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Default for BranchCondition {
    fn default() -> Self {
        BranchCondition::None
    }
}

/// A single parsed instruction. Slots the kind does not use stay `None`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Command {
    pub kind:             CommandKind,
    pub destination:      Option<Register>,
    pub operand_a:        Option<Operand>,
    pub operand_b:        Option<Operand>,
    pub branch_condition: BranchCondition,
    pub line:             usize,
}

impl Command {
    pub fn new(kind: CommandKind, line: usize) -> Self {
        Command {
            kind,
            destination: None,
            operand_a: None,
            operand_b: None,
            branch_condition: BranchCondition::None,
            line,
        }
    }

    pub fn is_a_immediate(&self) -> bool {
        self.operand_a.map_or(false, |op| op.is_immediate())
    }

    pub fn is_b_immediate(&self) -> bool {
        self.operand_b.map_or(false, |op| op.is_immediate())
    }

    pub fn is_a_string(&self) -> bool {
        self.operand_a.map_or(false, |op| op.is_string())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(dest) = self.destination {
            write!(f, " {}", dest)?;
        }
        for op in self.operand_a.iter().chain(self.operand_b.iter()) {
            write!(f, " {}", op)?;
        }
        Ok(())
    }
}

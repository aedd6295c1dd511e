use std::fmt;

use thiserror::Error;

use super::command::CommandKind;
use super::lexer::{Token, TokenKind};

#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: &'static str, found: TokenKind },

    #[error("malformed numeric literal `{0}`")]
    MalformedNumber(String),

    #[error("malformed register reference `{0}`")]
    MalformedRegister(String),

    #[error("unrecognized instruction `{0}`")]
    UnknownInstruction(String),

    #[error("out of memory building {0} command")]
    Allocation(CommandKind),
}

/// A parse failure together with the token the parser stopped on.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Diagnostic {
    pub instruction: Option<CommandKind>,
    pub error:       ParseError,
    pub text:        String,
    pub kind:        TokenKind,
    pub length:      usize,
    pub line:        usize,
    pub column:      usize,
}

impl Diagnostic {
    pub fn new(instruction: Option<CommandKind>, error: ParseError, at: &Token) -> Self {
        Diagnostic {
            instruction,
            error,
            text: at.text.to_owned(),
            kind: at.kind,
            length: at.len(),
            line: at.line,
            column: at.column,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.instruction {
            Some(kind) => write!(f, "error parsing {} command: {}", kind, self.error)?,
            None => write!(f, "error: {}", self.error)?,
        }
        match self.kind {
            TokenKind::Eof => write!(f, "\n  at token: EOF")?,
            TokenKind::Newline => write!(f, "\n  at token: \\n")?,
            _ => write!(f, "\n  at token: {}", self.text)?,
        }
        write!(f, "\n  token type: {}\n  token length: {}\n  line: {}:{}",
            self.kind, self.length, self.line, self.column)
    }
}

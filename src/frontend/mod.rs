//! The frontend module is in charge of taking ci source text and producing
//! a Vec<Command> for the execution stage.
//!
//! It does this by implementing a lazy tokenizer and a recursive descent
//! parser with one token of lookahead.

pub mod command;
pub mod error;
pub mod labels;
pub mod lexer;
pub mod operand;
pub mod parser;

pub use command::{Base, BranchCondition, Command, CommandKind, Operand, Register};
pub use error::{Diagnostic, ParseError};
pub use labels::LabelMap;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{ParseOutcome, Parser};

/// Parses a complete source text in one pass.
pub fn parse(source: &str, labels: &mut LabelMap) -> ParseOutcome {
    Parser::new(Lexer::new(source), labels).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let mut labels = LabelMap::new();
        let out = parse("add x1 x2 3\nbogus\nmov x3 x1\n", &mut labels);

        let listing: Vec<String> = out.commands.iter().map(|c| c.to_string()).collect();
        assert_eq!(listing, vec!["add x1 x2 3", "mov x3 x1"]);
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].line, 2);
    }
}

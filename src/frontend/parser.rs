//! The Parser module pulls tokens from the Lexer and builds the command list.
//!
//! It is a recursive descent parser holding the current token plus one token
//! of lookahead. Each instruction is parsed by a single production driven by
//! its `Shape`; a failing instruction is reported, dropped, and the parser
//! resumes on the next line.
use super::command::{Base, Command, CommandKind, Operand, Register, SlotKind};
use super::error::{Diagnostic, ParseError};
use super::labels::LabelMap;
use super::lexer::{Lexer, Token, TokenKind};
use super::operand;

/// The result of a full parse. Diagnostics never affect which of the
/// well-formed commands are kept.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ParseOutcome {
    pub commands:    Vec<Command>,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct Parser<'a, 'm> {
    lexer:       Lexer<'a>,
    current:     Token<'a>,
    next:        Token<'a>,
    had_error:   bool,
    labels:      &'m mut LabelMap,
    commands:    Vec<Command>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a, 'm> Parser<'a, 'm> {
    pub fn new(mut lexer: Lexer<'a>, labels: &'m mut LabelMap) -> Self {
        let current = lexer.next_token();
        let next = lexer.next_token();
        Parser {
            lexer,
            current,
            next,
            had_error: false,
            labels,
            commands: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// The label table handed to this parser.
    pub fn labels(&self) -> &LabelMap {
        &*self.labels
    }

    /// Run the parser to the end of input, consuming itself and returning
    /// every well-formed command in source order.
    pub fn run(mut self) -> ParseOutcome {
        while !self.is_at_end() {
            if let Some(cmd) = self.instruction() {
                debug!("line {}: {}", cmd.line, cmd);
                self.commands.push(cmd);
            }

            if self.had_error {
                self.recover();
            }
        }

        if !self.diagnostics.is_empty() {
            warn!("skipped {} malformed instruction(s)", self.diagnostics.len());
        }

        ParseOutcome { commands: self.commands, diagnostics: self.diagnostics }
    }

    /// Parses one instruction, skipping any blank lines before it.
    /// Returns None at end of input or if the instruction was malformed,
    /// in which case a diagnostic has been recorded.
    fn instruction(&mut self) -> Option<Command> {
        self.skip_blank_lines();
        if self.is_at_end() {
            return None;
        }

        let kind = match CommandKind::from_keyword(self.current.kind) {
            Some(kind) => kind,
            None => {
                let err = ParseError::UnknownInstruction(self.current.text.to_owned());
                self.report(None, err);
                return None;
            }
        };

        if self.commands.try_reserve(1).is_err() {
            self.report(Some(kind), ParseError::Allocation(kind));
            return None;
        }

        let keyword = self.advance();
        match self.production(Command::new(kind, keyword.line)) {
            Ok(cmd) => Some(cmd),
            Err(err) => {
                self.report(Some(kind), err);
                None
            }
        }
    }

    /// Fills in the operands of `cmd` in the order its shape dictates and
    /// requires the line to end afterwards.
    fn production(&mut self, mut cmd: Command) -> Result<Command, ParseError> {
        let shape = cmd.kind.shape();

        if shape.destination {
            cmd.destination = Some(self.register()?);
        }
        cmd.operand_a = self.slot(shape.operand_a)?;
        cmd.operand_b = self.slot(shape.operand_b)?;

        if !self.consume_line_terminator() {
            return Err(ParseError::UnexpectedToken {
                expected: "end of line",
                found: self.current.kind,
            });
        }

        Ok(cmd)
    }

    fn slot(&mut self, kind: SlotKind) -> Result<Option<Operand>, ParseError> {
        match kind {
            SlotKind::Unused => Ok(None),
            SlotKind::RegisterOrImmediate => self.register_or_immediate().map(Some),
            SlotKind::Base => self.base().map(|base| Some(Operand::Base(base))),
        }
    }

    fn register(&mut self) -> Result<Register, ParseError> {
        if !operand::is_register_candidate(&self.current) {
            return Err(ParseError::UnexpectedToken {
                expected: "register",
                found: self.current.kind,
            });
        }

        let reg = operand::parse_register(self.current.text)?;
        self.advance();
        Ok(reg)
    }

    fn register_or_immediate(&mut self) -> Result<Operand, ParseError> {
        let operand = match self.current.kind {
            TokenKind::Ident if operand::is_register_candidate(&self.current) => {
                Operand::Register(operand::parse_register(self.current.text)?)
            }
            TokenKind::Number => Operand::Immediate(operand::parse_number(self.current.text)?),
            found => {
                return Err(ParseError::UnexpectedToken {
                    expected: "register or immediate",
                    found,
                })
            }
        };

        self.advance();
        Ok(operand)
    }

    fn base(&mut self) -> Result<Base, ParseError> {
        match operand::parse_base(&self.current) {
            Some(base) => {
                self.advance();
                Ok(base)
            }
            None => Err(ParseError::UnexpectedToken {
                expected: "base signifier (d, x, b or s)",
                found: self.current.kind,
            }),
        }
    }

    /// Records a diagnostic against the current token and raises the error
    /// flag so the driver recovers before the next instruction.
    fn report(&mut self, instruction: Option<CommandKind>, err: ParseError) {
        let diag = Diagnostic::new(instruction, err, &self.current);
        error!("{}", diag);
        self.diagnostics.push(diag);
        self.had_error = true;
    }

    /// Discards the rest of the offending line, including its newline.
    fn recover(&mut self) {
        while !matches!(self.current.kind, TokenKind::Newline | TokenKind::Eof) {
            self.advance();
        }
        self.consume_line_terminator();
        self.had_error = false;
    }

    /// Returns the current token and shifts the lookahead buffer forward.
    /// The end of input sentinel is never advanced past.
    fn advance(&mut self) -> Token<'a> {
        let token = self.current;
        if !self.is_at_end() {
            self.current = self.next;
            self.next = self.lexer.next_token();
            trace!("token {:?} `{}` at {}:{}",
                self.current.kind, self.current.text, self.current.line, self.current.column);
        }
        token
    }

    /// Advances only if the current token is of the given kind.
    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.current.kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }

    fn skip_blank_lines(&mut self) {
        while self.consume(TokenKind::Newline) {}
    }

    // End of input terminates a line just like a newline does, but there is
    // nothing after it to consume.
    fn consume_line_terminator(&mut self) -> bool {
        self.consume(TokenKind::Newline) || self.is_at_end()
    }
}

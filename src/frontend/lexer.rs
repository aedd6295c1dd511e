//! This lexer tokenizes ci source text.
//!
//! Tokens borrow their text from the source buffer and carry the 1-based
//! line and column they start on. The lexer never fails: characters that
//! begin no token become single-character `Unknown` tokens and it is up to
//! the parser to report them.
use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TokenKind {
    Add,
    Sub,
    Mov,
    Cmp,
    CmpU,
    Print,
    Ident,
    Number,
    Newline,
    Unknown,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use TokenKind::*;
        let name = match self {
            Add     => "add",
            Sub     => "sub",
            Mov     => "mov",
            Cmp     => "cmp",
            CmpU    => "cmp_u",
            Print   => "print",
            Ident   => "identifier",
            Number  => "number",
            Newline => "newline",
            Unknown => "unknown",
            Eof     => "end of input",
        };
        write!(f, "{}", name)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Token<'a> {
    pub kind:   TokenKind,
    pub text:   &'a str,
    pub line:   usize,
    pub column: usize,
}

impl<'a> Token<'a> {
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Instruction keywords are case-sensitive.
fn keyword(word: &str) -> Option<TokenKind> {
    match word {
        "add"   => Some(TokenKind::Add),
        "sub"   => Some(TokenKind::Sub),
        "mov"   => Some(TokenKind::Mov),
        "cmp"   => Some(TokenKind::Cmp),
        "cmp_u" => Some(TokenKind::CmpU),
        "print" => Some(TokenKind::Print),
        _ => None,
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub struct Lexer<'a> {
    src:      &'a str,
    pos:      usize,
    line:     usize,
    column:   usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Lexer { src, pos: 0, line: 1, column: 1, finished: false }
    }

    /// Scans the next token. Once the input is exhausted every call
    /// returns an `Eof` token positioned just past the last character.
    pub fn next_token(&mut self) -> Token<'a> {
        self.skip_trivia();

        let (start, line, column) = (self.pos, self.line, self.column);
        let kind = match self.bump() {
            None => TokenKind::Eof,
            Some('\n') => TokenKind::Newline,
            // Numbers swallow every trailing word character so that `10x`
            // or `0x1G` reach the parser whole and get rejected there.
            Some(c) if c.is_ascii_digit() => {
                self.eat_while(is_word_char);
                TokenKind::Number
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                self.eat_while(is_word_char);
                keyword(&self.src[start..self.pos]).unwrap_or(TokenKind::Ident)
            }
            Some(_) => TokenKind::Unknown,
        };

        Token { kind, text: &self.src[start..self.pos], line, column }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().map_or(false, &pred) {
            self.bump();
        }
    }

    // Spaces, tabs, carriage returns and commas only bound tokens.
    // A semicolon comments out the rest of the line, but not the newline.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some(',') => {
                    self.bump();
                }
                Some(';') => self.eat_while(|c| c != '\n'),
                _ => break,
            }
        }
    }
}

/// Yields every token up to and including the `Eof` sentinel, then stops.
impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src).map(|t| t.kind).collect()
    }

    #[test]
    fn test_keywords() {
        assert_eq!(keyword("add"), Some(TokenKind::Add));
        assert_eq!(keyword("sub"), Some(TokenKind::Sub));
        assert_eq!(keyword("mov"), Some(TokenKind::Mov));
        assert_eq!(keyword("cmp"), Some(TokenKind::Cmp));
        assert_eq!(keyword("cmp_u"), Some(TokenKind::CmpU));
        assert_eq!(keyword("print"), Some(TokenKind::Print));

        assert_eq!(keyword("ADD"), None);
        assert_eq!(keyword("cmpu"), None);
        assert_eq!(keyword("x1"), None);
    }

    #[test]
    fn test_instruction_line() {
        use TokenKind::*;
        assert_eq!(kinds("add x1 x2 5\n"), vec![Add, Ident, Ident, Number, Newline, Eof]);
        assert_eq!(kinds("print x 0xFF"), vec![Print, Ident, Number, Eof]);
        assert_eq!(kinds("cmp_u x1, 0b101"), vec![CmpU, Ident, Number, Eof]);
    }

    #[test]
    fn test_token_text_and_position() {
        let tokens: Vec<Token> = Lexer::new("mov x3 x1\n  sub x0 1 2").collect();

        assert_eq!(tokens[0], Token { kind: TokenKind::Mov, text: "mov", line: 1, column: 1 });
        assert_eq!(tokens[1], Token { kind: TokenKind::Ident, text: "x3", line: 1, column: 5 });
        assert_eq!(tokens[2], Token { kind: TokenKind::Ident, text: "x1", line: 1, column: 8 });
        assert_eq!(tokens[3], Token { kind: TokenKind::Newline, text: "\n", line: 1, column: 10 });
        assert_eq!(tokens[4], Token { kind: TokenKind::Sub, text: "sub", line: 2, column: 3 });
        assert_eq!(tokens[6].text, "1");
        assert_eq!(tokens[6].len(), 1);
        assert_eq!(tokens[8].kind, TokenKind::Eof);
        assert!(tokens[8].is_empty());
        assert_eq!((tokens[8].line, tokens[8].column), (2, 13));
    }

    #[test]
    fn test_each_line_break_is_a_token() {
        use TokenKind::*;
        assert_eq!(kinds("\n\n\r\n"), vec![Newline, Newline, Newline, Eof]);
        assert_eq!(kinds(""), vec![Eof]);
    }

    #[test]
    fn test_malformed_literals_stay_whole() {
        let tokens: Vec<Token> = Lexer::new("10x 0x1G x-1").collect();
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].text, "10x");
        assert_eq!(tokens[1].kind, TokenKind::Number);
        assert_eq!(tokens[1].text, "0x1G");
        // `-` begins no token.
        assert_eq!(tokens[2].text, "x");
        assert_eq!(tokens[3].kind, TokenKind::Unknown);
        assert_eq!(tokens[3].text, "-");
        assert_eq!(tokens[4].text, "1");
    }

    #[test]
    fn test_comments() {
        use TokenKind::*;
        assert_eq!(kinds("add x1 x2 3 ; x1 <= x2 + 3\nbogus"), vec![Add, Ident, Ident, Number, Newline, Ident, Eof]);
        assert_eq!(kinds("; nothing here"), vec![Eof]);
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("x1");
        assert_eq!(lexer.next_token().kind, TokenKind::Ident);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);

        let mut lexer = Lexer::new("x1");
        assert!(lexer.next().is_some());
        assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::Eof));
        assert_eq!(lexer.next(), None);
    }
}

//! Classifies operand tokens as registers, immediates or base signifiers.
//!
//! These functions only inspect a token; advancing past it is left to the
//! parser so that a rejected token stays in place for error recovery.
use std::convert::TryFrom;

use super::command::{Base, Register};
use super::error::ParseError;
use super::lexer::{Token, TokenKind};

/// A token *could* name a register if it is an identifier of the form `x?+`.
/// Whether the remainder is a valid index is decided by `parse_register`.
pub fn is_register_candidate(token: &Token) -> bool {
    token.kind == TokenKind::Ident && token.text.len() >= 2 && token.text.starts_with('x')
}

pub fn parse_register(text: &str) -> Result<Register, ParseError> {
    text.strip_prefix('x')
        .and_then(|index| index.parse::<i64>().ok())
        .and_then(|index| Register::try_from(index).ok())
        .ok_or_else(|| ParseError::MalformedRegister(text.to_owned()))
}

/// Parses an immediate literal. `0x`/`0X` selects hexadecimal, `0b`/`0B`
/// binary, anything else decimal. Every character after the prefix must be a
/// digit of that radix and the value must fit in 64 bits.
pub fn parse_number(text: &str) -> Result<u64, ParseError> {
    let malformed = || ParseError::MalformedNumber(text.to_owned());

    let (digits, radix) = match text.as_bytes() {
        [b'0', b'x', ..] | [b'0', b'X', ..] => (&text[2..], 16),
        [b'0', b'b', ..] | [b'0', b'B', ..] => (&text[2..], 2),
        _ => (text, 10),
    };

    if digits.is_empty() {
        return Err(malformed());
    }

    digits.chars().try_fold(0u64, |acc, c| {
        let digit = c.to_digit(radix).ok_or_else(malformed)?;
        acc.checked_mul(u64::from(radix))
            .and_then(|acc| acc.checked_add(u64::from(digit)))
            .ok_or_else(malformed)
    })
}

/// A base signifier is exactly one of `d`, `x`, `b` or `s`.
pub fn parse_base(token: &Token) -> Option<Base> {
    match token.kind {
        TokenKind::Ident => Base::from_signifier(token.text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(text: &str) -> Token {
        Token { kind: TokenKind::Ident, text, line: 1, column: 1 }
    }

    #[test]
    fn test_register_candidates() {
        assert!(is_register_candidate(&ident("x0")));
        assert!(is_register_candidate(&ident("x31")));
        assert!(is_register_candidate(&ident("x32")));
        assert!(is_register_candidate(&ident("xyz")));

        assert!(!is_register_candidate(&ident("x")));
        assert!(!is_register_candidate(&ident("y1")));
        assert!(!is_register_candidate(&Token { kind: TokenKind::Number, text: "0x1", line: 1, column: 1 }));
    }

    #[test]
    fn test_parse_register() {
        for i in 0..=31 {
            assert_eq!(parse_register(&format!("x{}", i)).map(Register::index), Ok(i as u8));
        }

        assert_eq!(parse_register("x32"), Err(ParseError::MalformedRegister("x32".to_owned())));
        assert!(parse_register("x-1").is_err());
        assert!(parse_register("x1a").is_err());
        assert!(parse_register("xyz").is_err());
        assert!(parse_register("x99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), Ok(42));
        assert_eq!(parse_number("0"), Ok(0));
        assert_eq!(parse_number("0x1F"), Ok(31));
        assert_eq!(parse_number("0XfF"), Ok(255));
        assert_eq!(parse_number("0b101"), Ok(5));
        assert_eq!(parse_number("0B11111111"), Ok(255));
        assert_eq!(parse_number("0xFFFFFFFFFFFFFFFF"), Ok(u64::MAX));
    }

    #[test]
    fn test_parse_number_rejects_garbage() {
        assert_eq!(parse_number("0x1G"), Err(ParseError::MalformedNumber("0x1G".to_owned())));
        assert!(parse_number("0xg1").is_err());
        assert!(parse_number("10x").is_err());
        assert!(parse_number("0b102").is_err());
        assert!(parse_number("0x").is_err());
        assert!(parse_number("0b").is_err());
        assert!(parse_number("0x10000000000000000").is_err());
        assert!(parse_number("18446744073709551616").is_err());
    }

    #[test]
    fn test_parse_base() {
        assert_eq!(parse_base(&ident("d")), Some(Base::Decimal));
        assert_eq!(parse_base(&ident("x")), Some(Base::Hex));
        assert_eq!(parse_base(&ident("b")), Some(Base::Binary));
        assert_eq!(parse_base(&ident("s")), Some(Base::String));

        assert_eq!(parse_base(&ident("o")), None);
        assert_eq!(parse_base(&ident("x1")), None);
        assert_eq!(parse_base(&Token { kind: TokenKind::Number, text: "0", line: 1, column: 1 }), None);
    }
}

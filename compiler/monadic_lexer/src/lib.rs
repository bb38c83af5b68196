//! Lexer for the monadic statement language using logos.
//!
//! Produces a `TokenList` terminated by `Eof`. Malformed input does not stop
//! lexing: it becomes a `TokenKind::Error` token carrying the reason, and the
//! parser reports the first one it reaches.

use logos::Logos;
use monadic_ir::{LexErrorKind, Name, Span, Token, TokenKind, TokenList};

/// Raw token from logos (before literal processing).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
enum RawToken {
    #[token("let")]
    Let,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,

    #[token("=")]
    Assign,
    #[token("==")]
    #[token("===")]
    EqEq,
    #[token("!=")]
    #[token("!==")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    Float,

    // Quoted strings may not span lines
    #[regex(r#""([^"\\\n\r]|\\.)*""#)]
    DoubleQuoted,
    #[regex(r"'([^'\\\n\r]|\\.)*'")]
    SingleQuoted,

    // Template literals may span lines
    #[regex(r"`([^`\\]|\\.)*`")]
    Template,

    #[regex(r#""([^"\\\n\r]|\\.)*"#)]
    #[regex(r"'([^'\\\n\r]|\\.)*")]
    UnterminatedString,

    #[regex(r"`([^`\\]|\\.)*")]
    UnterminatedTemplate,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,
}

/// Lex source text into a `TokenList`.
pub fn lex(source: &str) -> TokenList {
    let mut result = TokenList::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        let kind = match token_result {
            Ok(raw) => convert_token(raw, slice),
            Err(()) => TokenKind::Error(LexErrorKind::UnexpectedCharacter),
        };
        result.push(Token::new(kind, span));
    }

    let eof = Span::from_range(source.len()..source.len());
    result.push(Token::new(TokenKind::Eof, eof));

    result
}

fn convert_token(raw: RawToken, slice: &str) -> TokenKind {
    match raw {
        RawToken::Int => slice
            .parse::<i64>()
            .map_or(TokenKind::Error(LexErrorKind::IntegerTooLarge), TokenKind::Int),
        RawToken::Float => {
            // The regex only admits digits, one dot and an exponent, which
            // always parse; fall back to NaN rather than panicking.
            let value = slice.parse::<f64>().unwrap_or(f64::NAN);
            TokenKind::Float(value.to_bits())
        }
        RawToken::DoubleQuoted | RawToken::SingleQuoted | RawToken::Template => {
            let content = &slice[1..slice.len() - 1];
            TokenKind::Str(unescape(content).into())
        }
        RawToken::UnterminatedString => TokenKind::Error(LexErrorKind::UnterminatedString),
        RawToken::UnterminatedTemplate => TokenKind::Error(LexErrorKind::UnterminatedTemplate),
        RawToken::Ident => TokenKind::Ident(Name::new(slice)),

        RawToken::Let => TokenKind::Let,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Null => TokenKind::Null,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,

        RawToken::Assign => TokenKind::Assign,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Bang => TokenKind::Bang,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
    }
}

/// Process escape sequences shared by all three quote styles.
fn unescape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('0') => result.push('\0'),
                Some('\\') | None => result.push('\\'),
                Some(quote @ ('"' | '\'' | '`')) => result.push(quote),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}

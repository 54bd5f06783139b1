//! Recursive descent parser for KODA text.
//!
//! A document is either a single value or an implicit-root object: a
//! brace-less sequence of `key [:] value [,]` pairs. The two shapes are
//! distinguished with one token of lookahead, implemented by snapshotting
//! the lexer cursor rather than buffering tokens.

use super::lexer::{Lexer, Token};
use crate::errors::Error;
use crate::limits::Limits;
use crate::vecmap::VecMap;
use crate::Value;
use bytes::Bytes;

/// Parses a KODA text document with the standard limits.
///
/// # Example
///
/// ```
/// use koda::text::parse;
///
/// let doc = parse(b"name: 'ada' age: 36").unwrap();
/// assert_eq!(doc.get("name").unwrap().to_bytes().unwrap(), "ada".as_bytes());
/// ```
pub fn parse(input: &[u8]) -> Result<Value, Error> {
    parse_with_limits(input, &Limits::standard())
}

/// Parses a KODA text document with custom limits.
///
/// Input longer than `limits.max_input_len` is rejected before lexing, and
/// values nested deeper than `limits.max_depth` fail the parse.
pub fn parse_with_limits(input: &[u8], limits: &Limits) -> Result<Value, Error> {
    if input.len() > limits.max_input_len {
        return Err(Error::Size {
            what: "input",
            actual: input.len(),
            limit: limits.max_input_len,
        });
    }
    let mut parser = Parser::new(input, limits)?;
    let value = parser.parse_document()?;
    parser.expect_eof()?;
    Ok(value)
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a [u8], limits: &Limits) -> Result<Self, Error> {
        let mut lexer = Lexer::new(input);
        lexer.advance()?;
        Ok(Self {
            lexer,
            max_depth: limits.max_depth,
        })
    }

    /// Builds a parse error at the current token's start.
    fn error(&self, msg: impl Into<String>) -> Error {
        Error::Parse {
            msg: msg.into(),
            line: self.lexer.token_line(),
            column: self.lexer.token_column(),
        }
    }

    fn expect_eof(&self) -> Result<(), Error> {
        if self.lexer.token() != Token::Eof {
            return Err(self.error("expected end of input"));
        }
        Ok(())
    }

    fn parse_document(&mut self) -> Result<Value, Error> {
        // A leading key-shaped token means the document is an implicit-root
        // object, unless it is the only token (then it is a bare string).
        if matches!(self.lexer.token(), Token::Ident | Token::Str) {
            let snapshot = self.lexer.clone();
            self.lexer.advance()?;
            let implicit_root = self.lexer.token() != Token::Eof;
            self.lexer = snapshot;
            if implicit_root {
                return self.parse_root_object();
            }
        }
        self.parse_value(0)
    }

    fn parse_root_object(&mut self) -> Result<Value, Error> {
        let mut entries = VecMap::new();
        while matches!(self.lexer.token(), Token::Ident | Token::Str) {
            self.parse_entry(&mut entries, 1)?;
        }
        Ok(Value::Object(entries))
    }

    /// One `key [:] value [,]` entry of a braced or implicit-root object.
    /// The current token must already be `Ident` or `Str`.
    fn parse_entry(
        &mut self,
        entries: &mut VecMap<Bytes, Value>,
        depth: usize,
    ) -> Result<(), Error> {
        let key = self.lexer.take_bytes();
        if entries.contains_key(&key) {
            return Err(self.error("duplicate key"));
        }
        self.lexer.advance()?;
        if self.lexer.token() == Token::Colon {
            self.lexer.advance()?;
        }
        let value = self.parse_value(depth)?;
        entries.push(key, value);
        if self.lexer.token() == Token::Comma {
            self.lexer.advance()?;
        }
        Ok(())
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value, Error> {
        if depth > self.max_depth {
            return Err(Error::Depth {
                limit: self.max_depth,
            });
        }
        match self.lexer.token() {
            Token::LBrace => self.parse_object(depth),
            Token::LBracket => self.parse_array(depth),
            // A bare identifier in value position is a string; `true`,
            // `false` and `null` never reach this arm because they lex as
            // keyword tokens.
            Token::Str | Token::Ident => {
                let value = Value::Str(self.lexer.take_bytes());
                self.lexer.advance()?;
                Ok(value)
            }
            Token::Int => {
                let value = Value::Int(self.lexer.int_value());
                self.lexer.advance()?;
                Ok(value)
            }
            Token::Float => {
                let value = Value::Float(self.lexer.float_value());
                self.lexer.advance()?;
                Ok(value)
            }
            Token::True => {
                self.lexer.advance()?;
                Ok(Value::Bool(true))
            }
            Token::False => {
                self.lexer.advance()?;
                Ok(Value::Bool(false))
            }
            Token::Null => {
                self.lexer.advance()?;
                Ok(Value::Null)
            }
            Token::Eof | Token::RBrace | Token::RBracket | Token::Colon | Token::Comma => {
                Err(self.error("unexpected token"))
            }
        }
    }

    fn parse_object(&mut self, depth: usize) -> Result<Value, Error> {
        self.lexer.advance()?;
        let mut entries = VecMap::new();
        while self.lexer.token() != Token::RBrace {
            if !matches!(self.lexer.token(), Token::Ident | Token::Str) {
                return Err(self.error("expected key"));
            }
            self.parse_entry(&mut entries, depth + 1)?;
        }
        self.lexer.advance()?;
        Ok(Value::Object(entries))
    }

    fn parse_array(&mut self, depth: usize) -> Result<Value, Error> {
        self.lexer.advance()?;
        let mut elements = Vec::new();
        while self.lexer.token() != Token::RBracket {
            elements.push(self.parse_value(depth + 1)?);
            if self.lexer.token() == Token::Comma {
                self.lexer.advance()?;
            }
        }
        self.lexer.advance()?;
        Ok(Value::Array(elements))
    }
}

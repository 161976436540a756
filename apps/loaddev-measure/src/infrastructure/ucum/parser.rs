//! Recursive-descent parser for UCUM unit expressions.
//!
//! Grammar (case-sensitive UCUM subset):
//!
//! ```text
//! expression := '/' term | term
//! term       := component (('.' | '/') component)*
//! component  := '(' expression ')' exponent?
//!             | annotation
//!             | digits annotation?
//!             | simple exponent? annotation?
//! simple     := atom | prefix atom
//! exponent   := ('+' | '-')? digits
//! annotation := '{' [^}]* '}'
//! ```
//!
//! The parser stops at the first byte that cannot continue the expression
//! and reports how far it got. Parentheses nest at most `MAX_DEPTH` deep.

use rust_decimal::Decimal;

use super::UcumFormat;
use crate::domain::shared::value_objects::unit::ONE;
use crate::domain::shared::{Dimension, Unit};
use crate::infrastructure::codec::{ParsedUnit, UnitParseError};

/// Deepest allowed parenthesis nesting.
pub(super) const MAX_DEPTH: usize = 32;

pub(super) struct Parser<'a> {
    format: &'a UcumFormat,
    text: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub(super) const fn new(format: &'a UcumFormat, text: &'a str) -> Self {
        Self {
            format,
            text,
            pos: 0,
            depth: 0,
        }
    }

    pub(super) fn parse(mut self) -> Result<ParsedUnit, UnitParseError> {
        if self.text.is_empty() {
            return Ok(ParsedUnit {
                unit: ONE,
                consumed: 0,
            });
        }
        let unit = self.expression()?;
        let consumed = self.pos;
        Ok(ParsedUnit {
            unit: unit.with_symbol(&self.text[..consumed]),
            consumed,
        })
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn expression(&mut self) -> Result<Unit, UnitParseError> {
        if self.peek() == Some(b'/') {
            let at = self.pos;
            self.pos += 1;
            let term = self.term()?;
            return ONE
                .divide(&term)
                .map_err(|e| UnitParseError::new(at, e.to_string()));
        }
        self.term()
    }

    fn term(&mut self) -> Result<Unit, UnitParseError> {
        let mut unit = self.component()?;
        loop {
            let op = match self.peek() {
                Some(op @ (b'.' | b'/')) => op,
                _ => return Ok(unit),
            };
            let at = self.pos;
            self.pos += 1;
            let rhs = self.component()?;
            let combined = if op == b'.' {
                unit.multiply(&rhs)
            } else {
                unit.divide(&rhs)
            };
            unit = combined.map_err(|e| UnitParseError::new(at, e.to_string()))?;
        }
    }

    fn component(&mut self) -> Result<Unit, UnitParseError> {
        match self.peek() {
            None => Err(UnitParseError::new(self.pos, "expected a unit")),
            Some(b'(') => {
                let open = self.pos;
                if self.depth == MAX_DEPTH {
                    return Err(UnitParseError::new(open, "nesting too deep"));
                }
                self.pos += 1;
                self.depth += 1;
                let inner = self.expression()?;
                self.depth -= 1;
                if self.peek() != Some(b')') {
                    return Err(UnitParseError::new(
                        self.pos,
                        format!("missing ')' for '(' at index {open}"),
                    ));
                }
                self.pos += 1;
                self.exponent(inner)
            }
            Some(b'{') => {
                self.annotation()?;
                Ok(ONE)
            }
            Some(b) if b.is_ascii_digit() => {
                let factor = self.factor()?;
                if self.peek() == Some(b'{') {
                    self.annotation()?;
                }
                Ok(factor)
            }
            Some(_) => {
                let unit = self.simple_unit()?;
                let unit = self.exponent(unit)?;
                if self.peek() == Some(b'{') {
                    self.annotation()?;
                }
                Ok(unit)
            }
        }
    }

    fn simple_unit(&mut self) -> Result<Unit, UnitParseError> {
        let start = self.pos;
        let run = &self.text[start..self.symbol_end(start)];
        if run.is_empty() {
            let found = self.text[start..].chars().next().unwrap_or(' ');
            return Err(UnitParseError::new(
                start,
                format!("unexpected character '{found}'"),
            ));
        }

        // Longest prefix of the run that names a unit wins.
        for len in (1..=run.len()).rev().filter(|n| run.is_char_boundary(*n)) {
            if let Some(unit) = self.format.resolve(&run[..len]) {
                self.pos = start + len;
                return Ok(unit);
            }
        }
        Err(UnitParseError::new(start, format!("unknown unit '{run}'")))
    }

    fn symbol_end(&self, start: usize) -> usize {
        let bytes = self.text.as_bytes();
        let mut i = start;
        while let Some(&b) = bytes.get(i) {
            match b {
                b'[' => match self.text[i..].find(']') {
                    Some(close) => i += close + 1,
                    None => return self.text.len(),
                },
                b'.' | b'/' | b'(' | b')' | b'{' | b'}' | b'+' | b'-' | b'0'..=b'9' => break,
                _ => i += 1,
            }
        }
        i
    }

    fn exponent(&mut self, unit: Unit) -> Result<Unit, UnitParseError> {
        let bytes = self.text.as_bytes();
        let start = self.pos;
        let mut end = start;
        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let digits_start = end;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        if end == digits_start {
            return Ok(unit);
        }

        let token = &self.text[start..end];
        let exponent: i32 = token
            .parse()
            .map_err(|_| UnitParseError::new(start, format!("exponent '{token}' out of range")))?;
        self.pos = end;
        unit.pow(exponent)
            .map_err(|e| UnitParseError::new(start, e.to_string()))
    }

    fn factor(&mut self) -> Result<Unit, UnitParseError> {
        let start = self.pos;
        let bytes = self.text.as_bytes();
        while bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        let digits = &self.text[start..self.pos];
        let value: Decimal = digits
            .parse()
            .map_err(|_| UnitParseError::new(start, format!("factor '{digits}' out of range")))?;
        Ok(Unit::new(digits, Dimension::NONE, value, Decimal::ZERO))
    }

    fn annotation(&mut self) -> Result<(), UnitParseError> {
        let start = self.pos;
        match self.text[start..].find('}') {
            Some(close) => {
                self.pos = start + close + 1;
                Ok(())
            }
            None => Err(UnitParseError::new(start, "unterminated annotation")),
        }
    }
}

use super::Compiler;
use crate::error::Error;
use crate::fold;
use crate::grammer::token::{BinOp, TokenKind::*};
use crate::{check, expect, optional, repeat};
use vm::{ArithOp, Segment};

/// Largest multiplier the shift form is used for
const MAX_SHIFT_FACTOR: u32 = 16384;

impl Compiler {
    /// expression = term { op term }
    ///
    /// Operators associate to the left and share one precedence level.
    pub(super) fn compile_expression(&mut self) -> Result<(), Error> {
        if self.options.optimize {
            if let Some(value) = fold::try_fold(&mut self.parser) {
                tracing::debug!(value, line = self.parser.line(), "folded constant expression");
                self.push_literal(value);
                return Ok(());
            }
        }

        // n * term, with n a power of two: compile the term, then double it
        let mut shifts = self.shift_ahead(0);
        if shifts.is_some() && !self.star_at(1) {
            shifts = None;
        }
        if let Some(shifts) = shifts {
            self.parser.next();
            self.parser.next();
            self.compile_term()?;
            self.shift_left(shifts);
        } else {
            self.compile_term()?;
        }

        while let Some(op) = self.parser.peek().and_then(|token| token.kind.binop()) {
            self.parser.next();
            if op == BinOp::Mul {
                if let Some(shifts) = self.shift_ahead(0) {
                    self.parser.next();
                    self.shift_left(shifts);
                    continue;
                }
            }
            self.compile_term()?;
            self.compile_binop(op);
        }
        Ok(())
    }

    /// term = integer | string | keyword-constant | ident | ident "[" expression "]"
    ///      | subroutine-call | "(" expression ")" | ( "-" | "~" ) term
    fn compile_term(&mut self) -> Result<(), Error> {
        let line = self.parser.line();
        let Some(token) = self.parser.next() else {
            return Err(Error::UnexpectedEOF {
                expected: "term".to_string(),
                line,
            });
        };

        match token.kind {
            Number(text) => {
                let value = text.parse::<u32>().map_err(|_| Error::IntegerOverflow {
                    text: text.clone(),
                    line: token.line,
                })?;
                self.writer.push(Segment::Constant, value);
            }
            Text(text) => self.compile_string(&text),
            KwTrue => {
                self.writer.push(Segment::Constant, 0);
                self.writer.arith(ArithOp::Not);
            }
            KwFalse | KwNull => self.writer.push(Segment::Constant, 0),
            KwThis => self.writer.push(Segment::Pointer, 0),
            LParen => {
                self.compile_expression()?;
                expect!(self.parser, RParen)?;
            }
            Minus => {
                self.compile_term()?;
                self.writer.arith(ArithOp::Neg);
            }
            Tilde => {
                self.compile_term()?;
                self.writer.arith(ArithOp::Not);
            }
            Ident(name) => {
                if optional!(self.parser, LBracket).is_some() {
                    let symbol = self.lookup(&name, token.line)?;
                    self.writer.push(symbol.segment(), symbol.index);
                    self.compile_expression()?;
                    expect!(self.parser, RBracket)?;
                    self.writer.arith(ArithOp::Add);
                    self.writer.pop(Segment::Pointer, 1);
                    self.writer.push(Segment::That, 0);
                } else if check!(self.parser, LParen | Period) {
                    self.compile_call(name)?;
                } else {
                    let symbol = self.lookup(&name, token.line)?;
                    self.writer.push(symbol.segment(), symbol.index);
                }
            }
            kind => {
                return Err(Error::UnexpectedToken {
                    expected: "term".to_string(),
                    found: kind.to_string(),
                    line: token.line,
                })
            }
        }
        Ok(())
    }

    /// subroutine-call = ident "(" expression-list ")"
    ///                 | ident "." ident "(" expression-list ")"
    ///
    /// `name` has already been consumed.
    pub(super) fn compile_call(&mut self, name: String) -> Result<(), Error> {
        let (target, receiver) = if optional!(self.parser, Period).is_some() {
            let (callee, _) = self.parse_ident()?;
            match self.symbols.lookup(&name).cloned() {
                // Method on an object, dispatched by its declared type
                Some(symbol) => {
                    self.writer.push(symbol.segment(), symbol.index);
                    (format!("{}.{}", symbol.ty, callee), 1)
                }
                // Anything unresolved is a class name
                None => (format!("{}.{}", name, callee), 0),
            }
        } else {
            self.writer.push(Segment::Pointer, 0);
            (format!("{}.{}", self.symbols.class_name(), name), 1)
        };

        expect!(self.parser, LParen)?;
        let args = repeat!(self.parser, self.compile_expression(), Comma, RParen).len() as u32;
        expect!(self.parser, RParen)?;

        self.writer.call(&target, args + receiver);
        Ok(())
    }

    fn compile_string(&mut self, text: &str) {
        self.writer
            .push(Segment::Constant, text.chars().count() as u32);
        self.writer.call("String.new", 1);
        for ch in text.chars() {
            self.writer.push(Segment::Constant, ch as u32);
            self.writer.call("String.appendChar", 2);
        }
    }

    fn compile_binop(&mut self, op: BinOp) {
        match op {
            BinOp::Mul => self.writer.call("Math.multiply", 2),
            BinOp::Div => self.writer.call("Math.divide", 2),
            BinOp::Add => self.writer.arith(ArithOp::Add),
            BinOp::Sub => self.writer.arith(ArithOp::Sub),
            BinOp::And => self.writer.arith(ArithOp::And),
            BinOp::Or => self.writer.arith(ArithOp::Or),
            BinOp::Lt => self.writer.arith(ArithOp::Lt),
            BinOp::Gt => self.writer.arith(ArithOp::Gt),
            BinOp::Eq => self.writer.arith(ArithOp::Eq),
        }
    }

    /// Negative values have no literal form: push the magnitude, then negate
    fn push_literal(&mut self, value: i64) {
        self.writer
            .push(Segment::Constant, value.unsigned_abs() as u32);
        if value < 0 {
            self.writer.arith(ArithOp::Neg);
        }
    }

    /// Doublings that replace a multiplication by the literal `n` tokens ahead
    fn shift_ahead(&mut self, n: usize) -> Option<u32> {
        if !(self.options.optimize && self.options.strength_reduce) {
            return None;
        }
        match &self.parser.peek_nth(n)?.kind {
            Number(text) => {
                let factor = text.parse::<u32>().ok()?;
                (factor.is_power_of_two() && factor <= MAX_SHIFT_FACTOR)
                    .then(|| factor.trailing_zeros())
            }
            _ => None,
        }
    }

    fn star_at(&mut self, n: usize) -> bool {
        matches!(self.parser.peek_nth(n).map(|token| &token.kind), Some(Star))
    }

    /// x * 2 = x + x, with temp 0 duplicating the top of the stack
    fn shift_left(&mut self, shifts: u32) {
        for _ in 0..shifts {
            self.writer.pop(Segment::Temp, 0);
            self.writer.push(Segment::Temp, 0);
            self.writer.push(Segment::Temp, 0);
            self.writer.arith(ArithOp::Add);
        }
    }
}

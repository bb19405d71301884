//! Compile-time evaluation of literal-only expressions.
//!
//! The folder reads tokens through the same cursor as the code generator but
//! never emits anything. When an expression cannot be folded the cursor is put
//! back exactly where the attempt started.

use crate::grammer::parsercore::Parser;
use crate::grammer::token::{BinOp, TokenKind::*};
use crate::optional;

/// Boolean encoding of the machine: true is all ones.
const TRUE: i64 = -1;
const FALSE: i64 = 0;

/// Values the literal push can express directly or through a trailing `neg`.
const RANGE: std::ops::RangeInclusive<i64> = -32768..=32767;

/// Try to evaluate the whole expression at the cursor.
///
/// On success the cursor is left after the expression and the value lies in
/// [-32768, 32767]. On failure the cursor is unchanged.
pub fn try_fold(parser: &mut Parser) -> Option<i64> {
    let mark = parser.mark();
    match fold_expr(parser) {
        Some(value) if RANGE.contains(&value) => Some(value),
        _ => {
            parser.reset(mark);
            None
        }
    }
}

fn fold_expr(parser: &mut Parser) -> Option<i64> {
    let mut acc = fold_term(parser)?;
    while let Some(op) = parser.peek().and_then(|token| token.kind.binop()) {
        parser.next();
        let rhs = fold_term(parser)?;
        acc = apply(acc, op, rhs)?;
    }
    Some(acc)
}

fn fold_term(parser: &mut Parser) -> Option<i64> {
    let token = parser.peek()?;
    let value = match &token.kind {
        Number(text) => text.parse::<u32>().ok()? as i64,
        KwTrue => TRUE,
        KwFalse | KwNull => FALSE,
        LParen => {
            parser.next();
            let value = fold_expr(parser)?;
            optional!(parser, RParen)?;
            return Some(value);
        }
        Minus => {
            parser.next();
            return fold_term(parser).map(|v| v.wrapping_neg());
        }
        Tilde => {
            parser.next();
            return fold_term(parser).map(|v| !v);
        }
        // Variables, array elements, calls, strings and `this` are runtime values
        _ => return None,
    };
    parser.next();
    Some(value)
}

/// Apply a binary operator to folded operands.
///
/// Addition, subtraction and multiplication wrap to the low 16 bits. Division
/// truncates and refuses a zero divisor. Comparisons yield the boolean encoding.
/// Division and comparisons read their operands as the signed words the
/// machine holds, so a wrapped 65535 counts as -1.
pub fn apply(lhs: i64, op: BinOp, rhs: i64) -> Option<i64> {
    Some(match op {
        BinOp::Add => lhs.wrapping_add(rhs) & 0xFFFF,
        BinOp::Sub => lhs.wrapping_sub(rhs) & 0xFFFF,
        BinOp::Mul => lhs.wrapping_mul(rhs) & 0xFFFF,
        BinOp::Div => word(lhs).checked_div(word(rhs))?,
        BinOp::And => lhs & rhs,
        BinOp::Or => lhs | rhs,
        BinOp::Lt => boolean(word(lhs) < word(rhs)),
        BinOp::Gt => boolean(word(lhs) > word(rhs)),
        BinOp::Eq => boolean(word(lhs) == word(rhs)),
    })
}

/// Low 16 bits as a signed machine word
fn word(value: i64) -> i64 {
    (value & 0xFFFF) as u16 as i16 as i64
}

fn boolean(cond: bool) -> i64 {
    if cond {
        TRUE
    } else {
        FALSE
    }
}

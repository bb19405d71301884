use super::Compiler;
use crate::error::Error;
use crate::grammer::token::TokenKind::*;
use crate::{check, expect, optional};
use vm::{ArithOp, Segment};

impl Compiler {
    /// statements = { let | if | while | do | return }
    pub(super) fn compile_statements(&mut self) -> Result<(), Error> {
        loop {
            match self.parser.peek().map(|token| token.kind.clone()) {
                Some(KwLet) => self.compile_let()?,
                Some(KwIf) => self.compile_if()?,
                Some(KwWhile) => self.compile_while()?,
                Some(KwDo) => self.compile_do()?,
                Some(KwReturn) => self.compile_return()?,
                _ => return Ok(()),
            }
        }
    }

    /// let = "let" ident [ "[" expression "]" ] "=" expression ";"
    fn compile_let(&mut self) -> Result<(), Error> {
        expect!(self.parser, KwLet)?;
        let (name, line) = self.parse_ident()?;
        let symbol = self.lookup(&name, line)?;

        if optional!(self.parser, LBracket).is_some() {
            // Address first, then the value, which may itself use pointer 1
            self.writer.push(symbol.segment(), symbol.index);
            self.compile_expression()?;
            expect!(self.parser, RBracket)?;
            self.writer.arith(ArithOp::Add);

            expect!(self.parser, Equal)?;
            self.compile_expression()?;
            expect!(self.parser, Semicolon)?;

            self.writer.pop(Segment::Temp, 0);
            self.writer.pop(Segment::Pointer, 1);
            self.writer.push(Segment::Temp, 0);
            self.writer.pop(Segment::That, 0);
        } else {
            expect!(self.parser, Equal)?;
            self.compile_expression()?;
            expect!(self.parser, Semicolon)?;
            self.writer.pop(symbol.segment(), symbol.index);
        }
        Ok(())
    }

    /// if = "if" "(" expression ")" "{" statements "}" [ "else" "{" statements "}" ]
    fn compile_if(&mut self) -> Result<(), Error> {
        let else_label = self.unique_label("IF_FALSE");
        let end_label = self.unique_label("IF_END");

        expect!(self.parser, KwIf)?;
        expect!(self.parser, LParen)?;
        self.compile_expression()?;
        expect!(self.parser, RParen)?;

        self.writer.arith(ArithOp::Not);
        self.writer.if_goto(&else_label);

        expect!(self.parser, LCurly)?;
        self.compile_statements()?;
        expect!(self.parser, RCurly)?;

        self.writer.goto(&end_label);
        self.writer.label(&else_label);

        if optional!(self.parser, KwElse).is_some() {
            expect!(self.parser, LCurly)?;
            self.compile_statements()?;
            expect!(self.parser, RCurly)?;
        }

        self.writer.label(&end_label);
        Ok(())
    }

    /// while = "while" "(" expression ")" "{" statements "}"
    fn compile_while(&mut self) -> Result<(), Error> {
        let top_label = self.unique_label("WHILE_EXP");
        let end_label = self.unique_label("WHILE_END");

        expect!(self.parser, KwWhile)?;
        self.writer.label(&top_label);

        expect!(self.parser, LParen)?;
        self.compile_expression()?;
        expect!(self.parser, RParen)?;

        self.writer.arith(ArithOp::Not);
        self.writer.if_goto(&end_label);

        expect!(self.parser, LCurly)?;
        self.compile_statements()?;
        expect!(self.parser, RCurly)?;

        self.writer.goto(&top_label);
        self.writer.label(&end_label);
        Ok(())
    }

    /// do = "do" subroutine-call ";"
    fn compile_do(&mut self) -> Result<(), Error> {
        expect!(self.parser, KwDo)?;
        let (name, _) = self.parse_ident()?;
        self.compile_call(name)?;
        expect!(self.parser, Semicolon)?;
        // Discard the return value
        self.writer.pop(Segment::Temp, 0);
        Ok(())
    }

    /// return = "return" [ expression ] ";"
    fn compile_return(&mut self) -> Result<(), Error> {
        expect!(self.parser, KwReturn)?;
        if check!(self.parser, Semicolon) {
            self.writer.push(Segment::Constant, 0);
        } else {
            self.compile_expression()?;
        }
        expect!(self.parser, Semicolon)?;
        self.writer.ret();
        Ok(())
    }
}

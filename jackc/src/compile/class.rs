use super::{Compiler, SubroutineKind};
use crate::error::Error;
use crate::grammer::token::TokenKind::*;
use crate::symbols::Kind;
use crate::{check, expect, optional, repeat};
use vm::Segment;

impl Compiler {
    /// class = "class" ident "{" { class-var-dec } { subroutine-dec } "}"
    pub(super) fn compile_class(&mut self) -> Result<(), Error> {
        expect!(self.parser, KwClass)?;
        let (name, _) = self.parse_ident()?;
        self.symbols.start_class(&name);
        expect!(self.parser, LCurly)?;

        while check!(self.parser, KwStatic | KwField) {
            self.compile_class_var_dec()?;
        }

        while check!(self.parser, KwConstructor | KwFunction | KwMethod) {
            self.compile_subroutine()?;
        }

        expect!(self.parser, RCurly)?;
        Ok(())
    }

    /// class-var-dec = ( "static" | "field" ) type ident { "," ident } ";"
    fn compile_class_var_dec(&mut self) -> Result<(), Error> {
        let kind = match optional!(self.parser, KwStatic) {
            Some(_) => Kind::Static,
            None => {
                expect!(self.parser, KwField)?;
                Kind::Field
            }
        };
        self.compile_names(kind)
    }

    /// var-dec = "var" type ident { "," ident } ";"
    fn compile_var_dec(&mut self) -> Result<(), Error> {
        expect!(self.parser, KwVar)?;
        self.compile_names(Kind::Local)
    }

    /// type ident { "," ident } ";"
    fn compile_names(&mut self, kind: Kind) -> Result<(), Error> {
        let ty = self.parse_type()?;
        let (name, _) = self.parse_ident()?;
        self.symbols.define(&name, &ty, kind);
        while optional!(self.parser, Comma).is_some() {
            let (name, _) = self.parse_ident()?;
            self.symbols.define(&name, &ty, kind);
        }
        expect!(self.parser, Semicolon)?;
        Ok(())
    }

    /// subroutine-dec = ( "constructor" | "function" | "method" ) type ident
    ///                  "(" [ type ident { "," type ident } ] ")" subroutine-body
    fn compile_subroutine(&mut self) -> Result<(), Error> {
        self.subroutine = match self.parser.next().map(|token| token.kind) {
            Some(KwConstructor) => SubroutineKind::Constructor,
            Some(KwMethod) => SubroutineKind::Method,
            _ => SubroutineKind::Function,
        };
        self.symbols.start_subroutine();

        self.parse_type()?;
        let (name, _) = self.parse_ident()?;

        // The receiver takes argument 0 ahead of the declared parameters
        if self.subroutine == SubroutineKind::Method {
            let class_name = self.symbols.class_name().to_string();
            self.symbols.define("this", &class_name, Kind::Argument);
        }

        expect!(self.parser, LParen)?;
        let params = repeat!(self.parser, self.parse_param(), Comma, RParen);
        for (ty, param) in &params {
            self.symbols.define(param, ty, Kind::Argument);
        }
        expect!(self.parser, RParen)?;

        self.compile_subroutine_body(&name)
    }

    fn parse_param(&mut self) -> Result<(String, String), Error> {
        let ty = self.parse_type()?;
        let (name, _) = self.parse_ident()?;
        Ok((ty, name))
    }

    /// subroutine-body = "{" { var-dec } statements "}"
    fn compile_subroutine_body(&mut self, name: &str) -> Result<(), Error> {
        expect!(self.parser, LCurly)?;

        while check!(self.parser, KwVar) {
            self.compile_var_dec()?;
        }

        let full_name = format!("{}.{}", self.symbols.class_name(), name);
        let locals = self.symbols.count(Kind::Local);
        tracing::debug!(function = %full_name, locals, kind = ?self.subroutine, "compiling subroutine");
        let start = self.writer.len();
        self.writer.function(&full_name, locals);

        match self.subroutine {
            SubroutineKind::Constructor => {
                self.writer.push(Segment::Constant, self.symbols.field_count());
                self.writer.call("Memory.alloc", 1);
                self.writer.pop(Segment::Pointer, 0);
            }
            SubroutineKind::Method => {
                self.writer.push(Segment::Argument, 0);
                self.writer.pop(Segment::Pointer, 0);
            }
            SubroutineKind::Function => {}
        }

        self.compile_statements()?;
        expect!(self.parser, RCurly)?;
        tracing::debug!(
            function = %full_name,
            commands = self.writer.len() - start,
            "compiled subroutine"
        );
        Ok(())
    }
}

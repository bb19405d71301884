//! Single-pass code generation.
//!
//! Every grammar production consumes its tokens and emits its commands in the
//! same step; no syntax tree is built.

mod class;
mod expr;
mod stmt;

use crate::error::Error;
use crate::grammer::parsercore::Parser;
use crate::grammer::token::{Token, TokenKind::*};
use crate::peephole;
use crate::symbols::{Symbol, SymbolTable};
use crate::writer::Writer;
use crate::CompileOptions;
use vm::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubroutineKind {
    Constructor,
    Function,
    Method,
}

/// State of one compilation unit. Nothing in here outlives the source file.
pub struct Compiler {
    parser: Parser,
    symbols: SymbolTable,
    writer: Writer,
    labels: usize,
    subroutine: SubroutineKind,
    options: CompileOptions,
}

impl Compiler {
    pub fn new(tokens: Vec<Token>, options: CompileOptions) -> Self {
        Compiler {
            parser: Parser::new(tokens),
            symbols: SymbolTable::new(),
            writer: Writer::new(),
            labels: 0,
            subroutine: SubroutineKind::Function,
            options,
        }
    }

    pub fn compile(mut self) -> Result<Vec<Command>, Error> {
        self.compile_class()?;
        if self.writer.is_empty() {
            tracing::warn!(class = self.symbols.class_name(), "class declares no subroutines");
        }
        let commands = self.writer.finish();
        if self.options.optimize {
            let optimized = peephole::optimize(&commands);
            tracing::debug!(
                before = commands.len(),
                after = optimized.len(),
                "peephole pass"
            );
            Ok(optimized)
        } else {
            Ok(commands)
        }
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

impl Compiler {
    /// Labels are unique within the unit only, the counter is never reset.
    fn unique_label(&mut self, prefix: &str) -> String {
        let label = format!("{}_{}", prefix, self.labels);
        self.labels += 1;
        label
    }

    fn lookup(&self, name: &str, line: usize) -> Result<Symbol, Error> {
        self.symbols
            .lookup(name)
            .cloned()
            .ok_or_else(|| Error::UndefinedSymbol {
                name: name.to_string(),
                line,
            })
    }

    /// ident, with the line it was found on
    fn parse_ident(&mut self) -> Result<(String, usize), Error> {
        let line = self.parser.line();
        match self.parser.next() {
            Some(Token {
                kind: Ident(name),
                line,
            }) => Ok((name, line)),
            Some(token) => Err(Error::UnexpectedToken {
                expected: "identifier".to_string(),
                found: token.kind.to_string(),
                line: token.line,
            }),
            None => Err(Error::UnexpectedEOF {
                expected: "identifier".to_string(),
                line,
            }),
        }
    }

    /// type = "int" | "char" | "boolean" | "void" | ident
    fn parse_type(&mut self) -> Result<String, Error> {
        let token = self.parser.expect_tobe(
            |token| matches!(token.kind, KwInt | KwChar | KwBoolean | KwVoid | Ident(_)),
            "type",
        )?;
        Ok(token.kind.to_string())
    }
}

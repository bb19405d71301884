//! Single-pass compiler from Jack classes to stack machine commands.
//!
//! Each source file is one compilation unit with its own symbol table, label
//! counter and command list, so units can be compiled independently and in
//! parallel.

pub mod compile;
pub mod dump;
pub mod error;
pub mod fold;
pub mod grammer;
pub mod peephole;
pub mod symbols;
pub mod writer;

use grammer::lexer::Lexer;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use vm::Command;

pub use compile::Compiler;
pub use error::Error;

/// Source file extension
pub const SOURCE_EXT: &str = "jack";
/// Output file extension
pub const OUTPUT_EXT: &str = "vm";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Constant folding and the peephole pass
    pub optimize: bool,
    /// Multiplication by a power of two as repeated doubling, needs `optimize`
    pub strength_reduce: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            optimize: true,
            strength_reduce: false,
        }
    }
}

/// Compile one class given as source text.
pub fn compile_source(source: &str, options: CompileOptions) -> Result<Vec<Command>, Error> {
    let tokens = Lexer::new(source).parse();
    Compiler::new(tokens, options).compile()
}

pub fn compile_file(path: &Path, options: CompileOptions) -> Result<Vec<Command>, Error> {
    let _span = tracing::debug_span!("compile", file = %path.display()).entered();
    let source =
        std::fs::read_to_string(path).map_err(|e| Error::FileRead(path.to_path_buf(), e))?;
    let commands = compile_source(&source, options)?;
    tracing::debug!(commands = commands.len(), "compiled");
    Ok(commands)
}

/// Resolve the input argument to the list of files to compile.
///
/// A file is taken as is. A directory yields its `.jack` files sorted by name.
pub fn collect_sources(path: &Path) -> Result<Vec<PathBuf>, Error> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(Error::InputNotFound(path.to_path_buf()));
    }

    let entries = std::fs::read_dir(path).map_err(|e| Error::FileRead(path.to_path_buf(), e))?;
    let mut sources = vec![];
    for entry in entries {
        let entry = entry.map_err(|e| Error::FileRead(path.to_path_buf(), e))?;
        let file = entry.path();
        if file.is_file() && file.extension().is_some_and(|ext| ext == SOURCE_EXT) {
            sources.push(file);
        }
    }
    sources.sort();

    if sources.is_empty() {
        return Err(Error::NoSourceFiles(path.to_path_buf()));
    }
    Ok(sources)
}

/// Compile every file in parallel. Results come back in input order.
pub fn compile_batch(
    paths: &[PathBuf],
    options: CompileOptions,
) -> Vec<(PathBuf, Result<Vec<Command>, Error>)> {
    paths
        .par_iter()
        .map(|path| (path.clone(), compile_file(path, options)))
        .collect()
}

/// `dir/Name.vm` for `.../Name.jack`, next to the source when `dir` is `None`
pub fn output_path(source: &Path, dir: Option<&Path>) -> PathBuf {
    let name = Path::new(source.file_name().unwrap_or_default()).with_extension(OUTPUT_EXT);
    match dir.or_else(|| source.parent()) {
        Some(dir) => dir.join(name),
        None => name,
    }
}

pub fn write_output(path: &Path, commands: &[Command]) -> Result<(), Error> {
    std::fs::write(path, vm::render(commands)).map_err(|e| Error::FileWrite(path.to_path_buf(), e))
}

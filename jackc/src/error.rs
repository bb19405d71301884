use color_print::cprintln;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Parse errors
    #[error("Expected `{expected}`, got `{found}` at line {line}")]
    UnexpectedToken {
        expected: String,
        found: String,
        line: usize,
    },

    #[error("Expected `{expected}`, got end of input at line {line}")]
    UnexpectedEOF { expected: String, line: usize },

    #[error("Integer constant `{text}` is out of range at line {line}")]
    IntegerOverflow { text: String, line: usize },

    // Semantic errors
    #[error("Undefined symbol `{name}` at line {line}")]
    UndefinedSymbol { name: String, line: usize },

    // Batch errors
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("No .jack files found in {}", .0.display())]
    NoSourceFiles(PathBuf),

    #[error("Failed to read file: {}", .0.display())]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to write file: {}", .0.display())]
    FileWrite(PathBuf, #[source] std::io::Error),
}

impl Error {
    /// Source line the error points at, if it comes from the compiler itself
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::UnexpectedToken { line, .. }
            | Error::UnexpectedEOF { line, .. }
            | Error::IntegerOverflow { line, .. }
            | Error::UndefinedSymbol { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, file: &str, source: Option<&str>) {
        cprintln!("<red,bold>error</>: {}", self);

        let Some(line_num) = self.line() else {
            cprintln!("     <blue>--></> <underline>{}</>", file);
            return;
        };

        cprintln!("     <blue>--></> <underline>{}:{}</>", file, line_num);
        cprintln!("      <blue>|</>");

        // line_num is 1-based
        let line_content = source
            .and_then(|src| src.lines().nth(line_num.saturating_sub(1)))
            .unwrap_or("");

        cprintln!(" <blue>{:>4} |</> {}", line_num, line_content);
        cprintln!("      <blue>|</>");
    }
}

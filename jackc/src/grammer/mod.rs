pub mod lexer;
pub mod parsercore;
pub mod token;

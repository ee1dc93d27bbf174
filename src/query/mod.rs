pub mod ast;
pub mod lexer;
pub mod parser;
pub mod matcher;
pub mod cache;

pub use parser::parse;

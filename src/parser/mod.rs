mod ast;
mod grammar;
mod source;
pub mod tokenizer;

pub use ast::{Expression, Printer, Visitor};
pub use grammar::{parse, Parser};
pub use source::Source;
pub use tokenizer::{tokenize, Token, TokenList, TokenType, Tokenizer, END_LEXEME};

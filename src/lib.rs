mod error;
mod interpreter;
mod parser;

pub use error::{Error, ErrorKind};
pub use interpreter::Interpreter;
pub use parser::{
    parse, tokenize, Expression, Parser, Printer, Source, Token, TokenList, TokenType, Tokenizer,
    Visitor,
};

/// Scans, parses and evaluates `bytes` as one arithmetic expression.
pub fn evaluate_bytes(bytes: &[u8]) -> Result<f64, Error> {
    evaluate(bytes)
}

/// Scans, parses and evaluates `text` as one arithmetic expression.
pub fn evaluate_string(text: &str) -> Result<f64, Error> {
    evaluate(text)
}

#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
fn evaluate<S: Source + ?Sized>(source: &S) -> Result<f64, Error> {
    let tokens = tokenize(source)?;
    let expression = parse(&tokens)?;
    let value = Interpreter::new().interpret(&expression)?;
    tracing::debug!(value, "evaluated");
    Ok(value)
}

#[cfg(test)]
mod test;

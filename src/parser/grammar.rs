use super::ast::Expression;
use super::tokenizer::{Token, TokenType as TT, END_LEXEME, NUMBER};
use crate::error::Error;

// expression := term
// term       := factor (("+" | "-") factor)*
// factor     := unary (("*" | "/" | "<<" | ">>") unary)*
// unary      := ("-" | "+") unary
//             | pow
// pow        := primary (("**" | "^") pow)?
// primary    := NUMBER
//             | "(" expression ")"
//
// The right operand of a power is another `pow`, never a `unary`:
// `2**-3` is rejected and has to be written `2**(-3)`.

/// Deepest tree the parser builds. Each nested `(`, sign, power or chained
/// binary operator is one level; evaluating and dropping the tree recurse
/// just as deep, so this bounds the stack for the whole pipeline.
pub const MAX_DEPTH: usize = 256;

pub struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            current: 0,
            depth: 0,
        }
    }

    /// Parses a single expression and requires the input to end after it.
    pub fn parse(&mut self) -> Result<Expression, Error> {
        self.current = 0;
        self.depth = 0;
        let expr = self.expression()?;
        match self.peek() {
            Some(token) if token.typ != TT::ENDMARKER => Err(Error::unexpected_token(token)),
            _ => Ok(expr),
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.current)
    }

    fn previous(&self) -> Option<&'a Token> {
        self.current
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
    }

    fn is_at_end(&self) -> bool {
        self.peek().map_or(true, |token| token.typ == TT::ENDMARKER)
    }

    /// Steps past the next token unless at the end, then returns the last
    /// consumed token.
    fn advance(&mut self) -> Option<&'a Token> {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn matches(&mut self, types: &[TT]) -> Option<&'a Token> {
        match self.peek() {
            Some(token) if token.typ != TT::ENDMARKER && types.contains(&token.typ) => {
                self.current += 1;
                Some(token)
            }
            _ => None,
        }
    }

    /// Enters one more level below `token`, failing on it past `MAX_DEPTH`.
    fn descend(&mut self, token: &Token) -> Result<(), Error> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(Error::unexpected_token(token));
        }
        Ok(())
    }

    fn expression(&mut self) -> Result<Expression, Error> {
        self.term()
    }

    fn term(&mut self) -> Result<Expression, Error> {
        let depth = self.depth;
        let mut expr = self.factor()?;
        while let Some(operator) = self.matches(&[TT::PLUS, TT::MINUS]) {
            // every operator in a chain deepens the left-leaning tree
            self.descend(operator)?;
            let right = self.factor()?;
            expr = Expression::binary(expr, operator.clone(), right);
        }
        self.depth = depth;
        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expression, Error> {
        let depth = self.depth;
        let mut expr = self.unary()?;
        while let Some(operator) =
            self.matches(&[TT::STAR, TT::SLASH, TT::LEFTSHIFT, TT::RIGHTSHIFT])
        {
            self.descend(operator)?;
            let right = self.unary()?;
            expr = Expression::binary(expr, operator.clone(), right);
        }
        self.depth = depth;
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expression, Error> {
        if let Some(operator) = self.matches(&[TT::MINUS, TT::PLUS]) {
            self.descend(operator)?;
            let right = self.unary()?;
            self.depth -= 1;
            return Ok(Expression::unary(operator.clone(), right));
        }
        self.pow()
    }

    fn pow(&mut self) -> Result<Expression, Error> {
        let base = self.primary()?;
        if let Some(operator) = self.matches(&[TT::CIRCUMFLEX, TT::DOUBLESTAR]) {
            self.descend(operator)?;
            let exponent = self.pow()?;
            self.depth -= 1;
            return Ok(Expression::binary(base, operator.clone(), exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expression, Error> {
        if let Some(token) = self.matches(&[TT::NUMBER]) {
            return number(token).map(Expression::Literal);
        }

        if let Some(paren) = self.matches(&[TT::LPAR]) {
            self.descend(paren)?;
            let expr = self.expression()?;
            self.depth -= 1;
            return match self.advance() {
                Some(token) if token.typ == TT::RPAR => Ok(Expression::grouping(expr)),
                Some(token) => Err(Error::unexpected_token(token)),
                None => Err(self.unknown_expression()),
            };
        }

        // stray closing paren
        if let Some(token) = self.matches(&[TT::RPAR]) {
            return Err(Error::unexpected_token(token));
        }

        Err(self.unknown_expression())
    }

    fn unknown_expression(&self) -> Error {
        match self.peek() {
            Some(token) => Error::UnknownExpression {
                found: token.lexeme.clone(),
                position: token.position,
            },
            None => Error::UnknownExpression {
                found: END_LEXEME.to_string(),
                position: self.previous().map_or(0, |token| token.position),
            },
        }
    }
}

/// Converts a `NUMBER` lexeme, ignoring `_` separators.
fn number(token: &Token) -> Result<f64, Error> {
    if !NUMBER.is_match(&token.lexeme) {
        return Err(Error::NumberConversion {
            literal: token.lexeme.clone(),
            reason: "malformed numeric literal".to_string(),
        });
    }
    let digits: String = token.lexeme.chars().filter(|&c| c != '_').collect();
    digits.parse::<f64>().map_err(|err| Error::NumberConversion {
        literal: token.lexeme.clone(),
        reason: err.to_string(),
    })
}

pub fn parse(tokens: &[Token]) -> Result<Expression, Error> {
    let expr = Parser::new(tokens).parse()?;
    tracing::trace!(tree = %expr, "parsed");
    Ok(expr)
}

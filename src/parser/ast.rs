use super::tokenizer::Token;

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(f64),
    Binary(Box<Expression>, Token, Box<Expression>),
    Unary(Token, Box<Expression>),
    /// Kept distinct from its contents so the tree mirrors the source.
    Grouping(Box<Expression>),
}

impl Expression {
    pub(super) fn binary(left: Expression, operator: Token, right: Expression) -> Self {
        Self::Binary(Box::new(left), operator, Box::new(right))
    }
    pub(super) fn unary(operator: Token, right: Expression) -> Self {
        Self::Unary(operator, Box::new(right))
    }
    pub(super) fn grouping(inner: Expression) -> Self {
        Self::Grouping(Box::new(inner))
    }

    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::Literal(value) => visitor.visit_literal(*value),
            Self::Binary(left, operator, right) => visitor.visit_binary(left, operator, right),
            Self::Unary(operator, right) => visitor.visit_unary(operator, right),
            Self::Grouping(inner) => visitor.visit_grouping(inner),
        }
    }
}

/// A tree walk over [`Expression`], one method per node variant.
pub trait Visitor {
    type Output;

    fn visit_literal(&mut self, value: f64) -> Self::Output;
    fn visit_binary(
        &mut self,
        left: &Expression,
        operator: &Token,
        right: &Expression,
    ) -> Self::Output;
    fn visit_unary(&mut self, operator: &Token, right: &Expression) -> Self::Output;
    fn visit_grouping(&mut self, inner: &Expression) -> Self::Output;
}

/// Renders a tree in parenthesized prefix form, e.g. `(+ 1 (* 2 3))`.
pub struct Printer;

impl Visitor for Printer {
    type Output = String;

    fn visit_literal(&mut self, value: f64) -> String {
        value.to_string()
    }
    fn visit_binary(&mut self, left: &Expression, operator: &Token, right: &Expression) -> String {
        format!(
            "({} {} {})",
            operator.lexeme,
            left.accept(self),
            right.accept(self)
        )
    }
    fn visit_unary(&mut self, operator: &Token, right: &Expression) -> String {
        format!("({} {})", operator.lexeme, right.accept(self))
    }
    fn visit_grouping(&mut self, inner: &Expression) -> String {
        format!("(group {})", inner.accept(self))
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.accept(&mut Printer))
    }
}

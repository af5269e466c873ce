use crate::error::Error;
use crate::parser::{Expression, Token, TokenType, Visitor};

/// Evaluates a tree bottom-up to a single `f64`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Interpreter;

impl Interpreter {
    pub fn new() -> Self {
        Self
    }

    pub fn interpret(&mut self, expression: &Expression) -> Result<f64, Error> {
        expression.accept(self).map_err(Error::in_evaluation)
    }
}

impl Visitor for Interpreter {
    type Output = Result<f64, Error>;

    fn visit_literal(&mut self, value: f64) -> Self::Output {
        Ok(value)
    }

    fn visit_binary(
        &mut self,
        left: &Expression,
        operator: &Token,
        right: &Expression,
    ) -> Self::Output {
        let left = left.accept(self).map_err(Error::in_evaluation)?;
        let right = right.accept(self).map_err(Error::in_evaluation)?;

        match operator.typ {
            TokenType::MINUS => Ok(left - right),
            TokenType::PLUS => Ok(left + right),
            TokenType::STAR => Ok(left * right),
            TokenType::SLASH => {
                if right == 0.0 {
                    return Err(Error::DivisionByZero);
                }
                Ok(left / right)
            }
            TokenType::LEFTSHIFT => Ok(shift(left, right, Direction::Left)),
            TokenType::RIGHTSHIFT => Ok(shift(left, right, Direction::Right)),
            TokenType::CIRCUMFLEX | TokenType::DOUBLESTAR => Ok(left.powf(right)),
            _ => Err(Error::UnknownOperator(operator.lexeme.clone())),
        }
    }

    fn visit_unary(&mut self, operator: &Token, right: &Expression) -> Self::Output {
        let right = right.accept(self).map_err(Error::in_evaluation)?;

        match operator.typ {
            TokenType::MINUS => Ok(-right),
            TokenType::PLUS => Ok(right),
            _ => Err(Error::UnknownOperator(operator.lexeme.clone())),
        }
    }

    fn visit_grouping(&mut self, inner: &Expression) -> Self::Output {
        inner.accept(self).map_err(Error::in_evaluation)
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Direction {
    Left,
    Right,
}

/// Shifts on the operands truncated to `i64`; the fractional part is dropped.
fn shift(value: f64, count: f64, direction: Direction) -> f64 {
    let value = value as i64;
    let count = count as i64;
    // a negative count shifts the other way
    let direction = match (direction, count < 0) {
        (Direction::Left, true) => Direction::Right,
        (Direction::Right, true) => Direction::Left,
        (direction, false) => direction,
    };
    let count = count.unsigned_abs();

    let shifted = match direction {
        Direction::Left if count >= 64 => 0,
        Direction::Left => value << count,
        Direction::Right if count >= 64 => {
            if value < 0 {
                -1
            } else {
                0
            }
        }
        Direction::Right => value >> count,
    };
    shifted as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn shift_truncates_fractions() {
        assert_eq!(shift(5.9, 1.7, Direction::Left), 10.0);
        assert_eq!(shift(-8.5, 1.2, Direction::Right), -4.0);
    }

    #[test]
    fn shift_counts_past_width() {
        assert_eq!(shift(3.0, 64.0, Direction::Left), 0.0);
        assert_eq!(shift(3.0, 100.0, Direction::Right), 0.0);
        assert_eq!(shift(-3.0, 100.0, Direction::Right), -1.0);
    }

    #[test]
    fn negative_count_reverses_direction() {
        assert_eq!(shift(16.0, -2.0, Direction::Left), 4.0);
        assert_eq!(shift(1.0, -3.0, Direction::Right), 8.0);
    }

    #[test]
    fn unknown_operator_is_reported() {
        let tree = Expression::Binary(
            Box::new(Expression::Literal(1.0)),
            Token::new(TokenType::LPAR, "(", 1),
            Box::new(Expression::Literal(2.0)),
        );
        let err = Interpreter::new().interpret(&tree).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::UnknownOperator);
        assert_eq!(err.to_string(), "evaluation failure: unknown operator (");
    }
}

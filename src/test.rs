use super::{evaluate_bytes, evaluate_string, Error, ErrorKind};
use pretty_assertions::assert_eq;

fn evaluates_to(input: &str, expected: f64) {
    match evaluate_bytes(input.as_bytes()) {
        Ok(value) => assert_eq!(value, expected, "evaluating {input:?}"),
        Err(err) => panic!("evaluating {input:?} failed: {err}"),
    }
}

fn fails_with(input: &str, kind: ErrorKind) {
    match evaluate_string(input) {
        Ok(value) => panic!("expected {input:?} to fail, got {value}"),
        Err(err) => assert_eq!(err.kind(), kind, "evaluating {input:?}: {err}"),
    }
}

#[test]
fn test_literals_and_whitespace() {
    evaluates_to("0", 0.0);
    evaluates_to("42", 42.0);
    evaluates_to("  7  ", 7.0);
    evaluates_to("1234567890", 1234567890.0);
    evaluates_to("\t2\t+\n3", 5.0);
    evaluates_to("\r\n1\r\n", 1.0);
}

#[test]
fn test_underscore_grouping() {
    evaluates_to("1_000_000", 1000000.0);
    evaluates_to("12_345 + 6_789", 19134.0);
    evaluates_to("(1_2_3) + (4_5_6)", 579.0);
    evaluates_to("9_9_9_9 - 8_8_8_8", 1111.0);
    evaluates_to("1_000*2 + 3_000/6", 2500.0);
    evaluates_to("(1_000_000) / (1_0_0)", 10000.0);
}

#[test]
fn test_decimals() {
    evaluates_to("3.14", 3.14);
    evaluates_to("0.5 * 4", 2.0);
    evaluates_to("1_000.2_5", 1000.25);
}

#[test]
fn test_arithmetic() {
    evaluates_to("1+2", 3.0);
    evaluates_to("1+2*3", 7.0);
    evaluates_to("(1+2)*3", 9.0);
    evaluates_to("2*3+4*5-6/3", 24.0);
    evaluates_to("8/4/2", 1.0);
    evaluates_to("7-4-1", 2.0);
    evaluates_to("4/2*3", 6.0);
    evaluates_to("4*(2/3)", 4.0 * (2.0 / 3.0));
}

#[test]
fn test_unary() {
    evaluates_to("-5+2", -3.0);
    evaluates_to("+5", 5.0);
    evaluates_to("-(1+2)", -3.0);
    evaluates_to("-(-(-2))", -2.0);
    evaluates_to("-+-2", 2.0);
}

#[test]
fn test_power() {
    evaluates_to("2**3", 8.0);
    evaluates_to("2^3", 8.0);
    evaluates_to("2**3**2", 512.0);
    evaluates_to("3^2^3", 6561.0);
    evaluates_to("(2**3)**2", 64.0);
    evaluates_to("-2**2", -4.0);
    evaluates_to("(-2)**2", 4.0);
    evaluates_to("-2**3", -8.0);
    evaluates_to("0**0", 1.0);
    evaluates_to("2**0", 1.0);
    evaluates_to("2**(3+2*2)", 128.0);
    evaluates_to("((2))**((3))", 8.0);
    evaluates_to("2**(-1)", 0.5);
    evaluates_to("4**0.5", 2.0);
}

#[test]
fn test_shifts() {
    evaluates_to("2<<3", 16.0);
    evaluates_to("16>>3", 2.0);
    evaluates_to("1+2<<3", 17.0);
    evaluates_to("(1+2)<<3", 24.0);
    evaluates_to("8>>2+1", 3.0);
    evaluates_to("8>>(2+1)", 1.0);
    evaluates_to("2<<1<<2", 16.0);
    evaluates_to("32>>1>>3", 2.0);
    evaluates_to("2*3<<2", 24.0);
    evaluates_to("2<<3*2", 32.0);
    evaluates_to("-(2<<3)", -16.0);
    evaluates_to("2<<3/2", 8.0);
    evaluates_to("2.9<<1.9", 4.0);
}

#[test]
fn test_round_trip() {
    let expr = "2**3**2 + (1_000_000 / (2<<3)) - (10 - 2) * (3 + 4) / 2 + -(5<<2) + (16>>3) + -2**2 + (-2)**3";
    assert_eq!(evaluate_string(expr).unwrap(), 62954.0);
    assert_eq!(evaluate_bytes(expr.as_bytes()).unwrap(), 62954.0);
}

#[test]
fn test_syntax_errors() {
    let unexpected = [
        "1__0", "_1", "1_", "1_000_", "5_2__1", "__", "1___2", "1_ 2", "5.2.", ".5", "5.", "1_.0",
        "1._0", "2+", "2<<<3", "(1+2", "1+2)", ")1+2(", "X", "--X",
    ];
    for input in unexpected {
        fails_with(input, ErrorKind::UnexpectedToken);
    }

    let unknown = [
        "2**", "**2", "2^^3", "2**^3", "^", "**", "2*/3", "2//3", "*2", "/2", ">>2", "2<<>>1",
        "3>>>>1", "(", "", "2**-3",
    ];
    for input in unknown {
        fails_with(input, ErrorKind::UnknownExpression);
    }
}

#[test]
fn test_division_by_zero() {
    fails_with("1/0", ErrorKind::DivisionByZero);
    fails_with("1/(2-2)", ErrorKind::DivisionByZero);
    fails_with("(1/0)+1", ErrorKind::DivisionByZero);
}

#[test]
fn test_error_context_keeps_kind() {
    let err = evaluate_string("(1/0)+1").unwrap_err();
    assert!(matches!(err, Error::Evaluation(_)));
    assert!(matches!(err.root(), Error::DivisionByZero));
    assert_eq!(
        err.to_string(),
        "evaluation failure: evaluation failure: evaluation failure: division by zero"
    );

    let err = evaluate_string("1/0").unwrap_err();
    assert_eq!(err.to_string(), "evaluation failure: division by zero");
    assert_eq!(err.position(), None);
}

#[test]
fn test_unknown_byte_reports_position() {
    let err = evaluate_string("1 + X").unwrap_err();
    assert_eq!(err.to_string(), "syntax error, unexpected token X at position 4");
    assert_eq!(err.position(), Some(4));
}

#[test]
fn test_bytes_and_strings_agree() {
    for input in ["1+2*3", "2**3**2", "(1", "1/0"] {
        let from_bytes = evaluate_bytes(input.as_bytes()).map_err(|err| err.to_string());
        let from_string = evaluate_string(input).map_err(|err| err.to_string());
        assert_eq!(from_bytes, from_string);
    }
}

#[test]
fn test_non_utf8_bytes() {
    let err = evaluate_bytes(&[b'1', b'+', 0xff]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedToken);
    assert_eq!(err.position(), Some(2));
}

#[test]
fn test_deep_nesting() {
    let nested = format!("{}1{}", "(".repeat(256), ")".repeat(256));
    evaluates_to(&nested, 1.0);
    evaluates_to(&format!("{}1", "- ".repeat(256)), 1.0);

    fails_with(&"(".repeat(100_000), ErrorKind::UnexpectedToken);
    fails_with(&format!("{}1", "- ".repeat(100_000)), ErrorKind::UnexpectedToken);
    fails_with(&format!("1{}", "+1".repeat(100_000)), ErrorKind::UnexpectedToken);
}

mod properties {
    use crate::{evaluate_bytes, evaluate_string};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn precedence(a in 0u32..10_000, b in 0u32..10_000, c in 0u32..10_000) {
            let (x, y, z) = (f64::from(a), f64::from(b), f64::from(c));
            prop_assert_eq!(evaluate_string(&format!("{a}+{b}*{c}")).unwrap(), x + (y * z));
            prop_assert_eq!(evaluate_string(&format!("{a}*{b}+{c}")).unwrap(), (x * y) + z);
        }

        #[test]
        fn left_associativity(a in 0u32..10_000, b in 1u32..10_000, c in 1u32..10_000) {
            let (x, y, z) = (f64::from(a), f64::from(b), f64::from(c));
            prop_assert_eq!(evaluate_string(&format!("{a}-{b}-{c}")).unwrap(), (x - y) - z);
            prop_assert_eq!(evaluate_string(&format!("{a}/{b}/{c}")).unwrap(), (x / y) / z);
        }

        #[test]
        fn unary_binds_looser_than_power(a in 0u32..50, b in 0u32..8) {
            let (x, y) = (f64::from(a), f64::from(b));
            prop_assert_eq!(evaluate_string(&format!("-{a}**{b}")).unwrap(), -(x.powf(y)));
        }

        #[test]
        fn idempotent(input in "[0-9+*/()<>^ -]{0,24}") {
            // compare bit patterns so NaN results still count as equal
            let first = evaluate_string(&input).map(f64::to_bits).map_err(|err| err.to_string());
            let second = evaluate_string(&input).map(f64::to_bits).map_err(|err| err.to_string());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
            let _ = evaluate_bytes(&bytes);
        }
    }
}

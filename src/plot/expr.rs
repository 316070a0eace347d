//! Expression evaluation seam.
//!
//! The plotter never parses math itself. An [`Evaluator`] compiles the text
//! once into an [`Expression`] that is then evaluated for every pixel column.

use crate::error::{MathSimError, Result};

/// A compiled function of the single variable `x`.
pub trait Expression {
    /// Evaluate at `x`. Errors are treated as gaps by the plotter.
    fn evaluate(&self, x: f64) -> Result<f64>;
}

impl<F> Expression for F
where
    F: Fn(f64) -> Result<f64>,
{
    fn evaluate(&self, x: f64) -> Result<f64> {
        self(x)
    }
}

/// Turns expression text into an [`Expression`].
pub trait Evaluator {
    /// Compile `source`; fails on invalid syntax or unknown names.
    fn compile(&self, source: &str) -> Result<Box<dyn Expression>>;
}

/// Evaluator backed by the `meval` crate.
///
/// Supports `+ - * / ^ %`, parentheses, the constants `pi` and `e`, and the
/// usual functions (`sqrt`, `abs`, `exp`, `ln`, `log`, `sin`, `cos`, `tan`,
/// ...). A number or closing parenthesis directly followed by a name or an
/// opening parenthesis multiplies, so `2x` and `(x+1)(x-1)` work.
#[derive(Debug, Clone, Copy, Default)]
pub struct MevalEvaluator;

impl MevalEvaluator {
    fn context() -> meval::Context<'static> {
        let mut ctx = meval::Context::new();
        ctx.func("log", f64::ln);
        ctx.func("log10", f64::log10);
        ctx.func("log2", f64::log2);
        ctx
    }
}

impl Evaluator for MevalEvaluator {
    fn compile(&self, source: &str) -> Result<Box<dyn Expression>> {
        let expr: meval::Expr = with_implicit_products(source)
            .parse()
            .map_err(|e: meval::Error| MathSimError::invalid_expression(e.to_string()))?;
        let func = expr
            .bind_with_context(Self::context(), "x")
            .map_err(|e| MathSimError::invalid_expression(e.to_string()))?;
        Ok(Box::new(move |x: f64| -> Result<f64> { Ok(func(x)) }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Start,
    Number,
    Name,
    Close,
    Other,
}

/// Insert `*` where a product is written by juxtaposition.
fn with_implicit_products(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len() + 4);
    let mut last = Token::Start;
    let mut gap = false;

    for (i, &c) in chars.iter().enumerate() {
        if c.is_whitespace() {
            out.push(c);
            gap = true;
            continue;
        }

        let continues = !gap
            && match last {
                Token::Number => {
                    c.is_ascii_digit()
                        || c == '.'
                        || (matches!(c, 'e' | 'E') && is_exponent_tail(&chars[i + 1..]))
                },
                Token::Name => c.is_alphanumeric() || c == '_',
                _ => false,
            };
        let product = !continues
            && match last {
                Token::Number => c.is_alphabetic() || c == '_' || c == '(',
                Token::Close => c.is_alphanumeric() || c == '_' || c == '(' || c == '.',
                _ => false,
            };
        if product {
            out.push('*');
        }
        out.push(c);

        if !continues {
            last = if c.is_ascii_digit() || c == '.' {
                Token::Number
            } else if c.is_alphabetic() || c == '_' {
                Token::Name
            } else if c == ')' {
                Token::Close
            } else {
                Token::Other
            };
        }
        gap = false;
    }
    out
}

fn is_exponent_tail(rest: &[char]) -> bool {
    match rest {
        [d, ..] if d.is_ascii_digit() => true,
        [sign, d, ..] => matches!(sign, '+' | '-') && d.is_ascii_digit(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_polynomial() {
        let expr = MevalEvaluator.compile("x^2 + 3*x + 2").unwrap();
        assert_eq!(expr.evaluate(2.0).unwrap(), 12.0);
    }

    #[test]
    fn builtins_are_available() {
        let expr = MevalEvaluator.compile("sqrt(x) * cos(0)").unwrap();
        assert_eq!(expr.evaluate(9.0).unwrap(), 3.0);
        let pi = MevalEvaluator.compile("pi").unwrap();
        assert_eq!(pi.evaluate(0.0).unwrap(), std::f64::consts::PI);
    }

    #[test]
    fn juxtaposition_multiplies() {
        assert_eq!(with_implicit_products("2x^2 + 3x"), "2*x^2 + 3*x");
        assert_eq!(with_implicit_products("(x+1)(x-1)"), "(x+1)*(x-1)");
        assert_eq!(with_implicit_products("2 sin(x)"), "2 *sin(x)");
        assert_eq!(with_implicit_products("1e-3x"), "1e-3*x");
        assert_eq!(with_implicit_products("log10(x)"), "log10(x)");

        let expr = MevalEvaluator.compile("2x").unwrap();
        assert_eq!(expr.evaluate(3.0).unwrap(), 6.0);
        let expr = MevalEvaluator.compile("(x+1)(x-1)").unwrap();
        assert_eq!(expr.evaluate(2.0).unwrap(), 3.0);
    }

    #[test]
    fn log_is_natural() {
        let expr = MevalEvaluator.compile("log(x)").unwrap();
        assert!((expr.evaluate(std::f64::consts::E).unwrap() - 1.0).abs() < 1e-12);
        let expr = MevalEvaluator.compile("log10(x)").unwrap();
        assert!((expr.evaluate(1000.0).unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn unbalanced_parentheses_fail() {
        assert!(matches!(
            MevalEvaluator.compile("(x + 1"),
            Err(MathSimError::InvalidExpression(_))
        ));
    }

    #[test]
    fn unknown_variable_fails() {
        assert!(MevalEvaluator.compile("x + y").is_err());
    }

    #[test]
    fn domain_errors_surface_as_nan() {
        let expr = MevalEvaluator.compile("sqrt(x)").unwrap();
        assert!(expr.evaluate(-1.0).unwrap().is_nan());
    }
}

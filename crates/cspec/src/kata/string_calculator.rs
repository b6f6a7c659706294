//! String calculator kata
//!
//! `add` sums the numbers in a comma- or newline-separated string:
//!
//! | Input | Result |
//! |-------|--------|
//! | `""` | `0` |
//! | `"1"` | `1` |
//! | `"1,2\n3"` | `6` |
//! | `"1,x"` | `InvalidNumber("x")` |
//! | `"1,-2,-3"` | `NegativesNotAllowed([-2, -3])` |
//! | `"9223372036854775807,1"` | `Overflow` |

use cspec_domain::{Constructor, Subject};
use thiserror::Error;

/// Rejected calculator input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculatorError {
    /// A token is not an integer
    #[error("Invalid number: '{0}'")]
    InvalidNumber(String),

    /// The input contains negative numbers
    #[error("Negatives not allowed: {0:?}")]
    NegativesNotAllowed(Vec<i64>),

    /// The sum does not fit in an `i64`
    #[error("Sum overflows i64")]
    Overflow,
}

/// Stateless string calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCalculator;

impl StringCalculator {
    /// Create a new calculator
    pub fn new() -> Self {
        Self
    }

    /// Sum the numbers in `input`
    pub fn add(&self, input: &str) -> Result<i64, CalculatorError> {
        if input.trim().is_empty() {
            return Ok(0);
        }

        let numbers = input
            .split([',', '\n'])
            .map(|token| {
                let token = token.trim();
                token
                    .parse::<i64>()
                    .map_err(|_| CalculatorError::InvalidNumber(token.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let negatives: Vec<i64> = numbers.iter().copied().filter(|n| *n < 0).collect();
        if !negatives.is_empty() {
            return Err(CalculatorError::NegativesNotAllowed(negatives));
        }

        numbers
            .iter()
            .try_fold(0_i64, |total, n| total.checked_add(*n))
            .ok_or(CalculatorError::Overflow)
    }
}

impl Subject for StringCalculator {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::nullary("new", || Ok(StringCalculator::new()))]
    }
}

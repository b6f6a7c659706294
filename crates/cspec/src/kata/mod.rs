//! Example subjects exercised by the specifications under `tests/`

pub mod calculator;
pub mod string_calculator;

pub use calculator::{Adder, AdderDouble, Calculator, IntegerAdder};
pub use string_calculator::{CalculatorError, StringCalculator};

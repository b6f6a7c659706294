//! String calculator contexts
//!
//! Nested modules share the `when_calculating_sum` context and vary only
//! the input established for it.

use cspec::kata::{CalculatorError, StringCalculator};
use cspec::prelude::*;

struct WhenCalculatingSum {
    input: &'static str,
    result: Option<i64>,
}

impl WhenCalculatingSum {
    fn with_input(input: &'static str) -> Self {
        Self {
            input,
            result: None,
        }
    }
}

impl Specification for WhenCalculatingSum {
    type Subject = StringCalculator;

    fn context_name(&self) -> &str {
        "when calculating sum"
    }

    fn because(&mut self, context: &mut Context<StringCalculator>) -> Result<()> {
        let input = self.input;
        self.result =
            context.trap_on_sut::<CalculatorError, _>(|calculator| Ok(calculator.add(input)?))?;
        Ok(())
    }
}

fn observe<F>(input: &'static str, name: &str, observation: F) -> ContextReport
where
    F: FnOnce(&WhenCalculatingSum, &Context<StringCalculator>) -> Result<()>,
{
    let report = Harness::default()
        .run(WhenCalculatingSum::with_input(input), |fixture| {
            fixture.it(name, observation)
        })
        .unwrap();
    assert!(report.all_passed(), "{report:?}");
    report
}

mod when_calculating_sum {
    use super::*;

    mod and_input_string_is_empty {
        use super::*;

        #[test]
        fn it_should_return_0() {
            observe("", "should return 0", |spec, _| spec.result.should().be(Some(0)));
        }

        #[test]
        fn it_should_not_trap_anything() {
            observe("", "should not trap anything", |_, context| {
                context.exception_caught().is_none().should().be_true()
            });
        }
    }

    mod and_input_consists_of_a_single_number {
        use super::*;

        #[test]
        fn it_should_return_1() {
            observe("1", "should return 1", |spec, _| spec.result.should().be(Some(1)));
        }
    }

    mod and_input_has_comma_and_newline_separators {
        use super::*;

        #[test]
        fn it_should_return_the_total() {
            observe("1,2\n3", "should return the total", |spec, _| {
                spec.result.should().be(Some(6))
            });
        }
    }

    mod and_input_contains_negatives {
        use super::*;

        #[test]
        fn it_should_trap_every_negative() {
            observe("1,-2,3,-4", "should trap every negative", |_, context| {
                context
                    .exception_caught_as::<CalculatorError>()
                    .cloned()
                    .should()
                    .be(Some(CalculatorError::NegativesNotAllowed(vec![-2, -4])))
            });
        }

        #[test]
        fn it_should_produce_no_result() {
            observe("-1", "should produce no result", |spec, _| {
                spec.result.should().be_none()
            });
        }
    }

    mod and_input_is_not_a_number {
        use super::*;

        #[test]
        fn it_should_trap_the_offending_token() {
            observe("1,two", "should trap the offending token", |_, context| {
                context
                    .exception_caught_as::<CalculatorError>()
                    .cloned()
                    .should()
                    .be(Some(CalculatorError::InvalidNumber("two".to_string())))
            });
        }
    }
}

/// Same stimulus, but the context only traps formatting errors
struct WhenTrappingTheWrongKind;

impl Specification for WhenTrappingTheWrongKind {
    type Subject = StringCalculator;

    fn because(&mut self, context: &mut Context<StringCalculator>) -> Result<()> {
        context.trap_on_sut::<std::fmt::Error, _>(|calculator| Ok(calculator.add("x")?))?;
        Ok(())
    }
}

#[test]
fn untrapped_errors_fail_the_set_up() {
    let err = Harness::default()
        .run(WhenTrappingTheWrongKind, |_| Ok(()))
        .unwrap_err();

    match err {
        Error::SetUp { phase, source } => {
            assert_eq!(phase, "because");
            assert!(matches!(*source, Error::Untrapped { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn failed_observations_are_reported_by_name() {
    let report = Harness::default()
        .run(WhenCalculatingSum::with_input("2"), |fixture| {
            let _ = fixture.it("should return 3", |spec, _| spec.result.should().be(Some(3)));
            fixture.it("should return 2", |spec, _| spec.result.should().be(Some(2)))
        })
        .unwrap();

    assert_eq!(report.context, "when calculating sum");
    assert_eq!(report.failed(), 1);
    assert_eq!(report.passed(), 1);
    assert!(!report.outcome("should return 3").unwrap().passed);
    assert!(report.outcome("should return 2").unwrap().passed);
}

//! Capabilities, doubles and subjects shared by the unit tests

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use cspec_domain::{Constructor, DefaultDouble, Subject};
use cspec_providers::{Behavior, PartialArgs, Result, TestDouble, register_double};
use serde_json::json;

// ============================================================================
// Capabilities
// ============================================================================

pub trait Logger: Send + Sync {
    fn log(&self, message: &str);
}

pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

pub trait Counter: Send + Sync {
    fn next(&self) -> u64;
}

/// Capability no blueprint exists for
pub trait Unknown: Send + Sync {}

// ============================================================================
// Doubles
// ============================================================================

pub struct LoggerDouble {
    behavior: Behavior,
}

impl TestDouble for LoggerDouble {
    fn create(behavior: Behavior, _args: &PartialArgs) -> Result<Self> {
        Ok(Self { behavior })
    }

    fn behavior(&self) -> &Behavior {
        &self.behavior
    }
}

impl Logger for LoggerDouble {
    fn log(&self, message: &str) {
        self.behavior.record("log", json!([message]));
    }
}

pub struct ClockDouble {
    behavior: Behavior,
}

impl TestDouble for ClockDouble {
    fn create(behavior: Behavior, _args: &PartialArgs) -> Result<Self> {
        Ok(Self { behavior })
    }

    fn behavior(&self) -> &Behavior {
        &self.behavior
    }
}

impl Clock for ClockDouble {
    fn now(&self) -> u64 {
        self.behavior.respond_or_default("now", json!([]))
    }
}

/// Partial double: counts up from a seeded base unless `next` is overridden
pub struct CounterDouble {
    behavior: Behavior,
    base: u64,
    issued: AtomicU64,
}

impl TestDouble for CounterDouble {
    fn create(behavior: Behavior, args: &PartialArgs) -> Result<Self> {
        Ok(Self {
            behavior,
            base: args.get_or(0, 0)?,
            issued: AtomicU64::new(0),
        })
    }

    fn behavior(&self) -> &Behavior {
        &self.behavior
    }
}

impl Counter for CounterDouble {
    fn next(&self) -> u64 {
        if self.behavior.is_overridden("next") {
            return self.behavior.respond_or_default("next", json!([]));
        }
        self.behavior.record("next", json!([]));
        self.base + self.issued.fetch_add(1, Ordering::SeqCst)
    }
}

register_double!(LOGGER_DOUBLE: dyn Logger => LoggerDouble, "Logger recording every message");
register_double!(CLOCK_DOUBLE: dyn Clock => ClockDouble, "Clock returning configured instants");
register_double!(COUNTER_DOUBLE: dyn Counter => CounterDouble, "Counter counting up from a seeded base");

// ============================================================================
// Subjects
// ============================================================================

pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}

// ============================================================================
// Default stand-ins
// ============================================================================

/// Does nothing; stands in for any capability without a blueprint
pub struct Inert;

impl Logger for Inert {
    fn log(&self, _message: &str) {}
}

impl Counter for Inert {
    fn next(&self) -> u64 {
        0
    }
}

impl Unknown for Inert {}

impl DefaultDouble for dyn Logger {
    fn default_double() -> Arc<Self> {
        Arc::new(Inert)
    }
}

impl DefaultDouble for dyn Clock {
    fn default_double() -> Arc<Self> {
        Arc::new(FixedClock(0))
    }
}

impl DefaultDouble for dyn Counter {
    fn default_double() -> Arc<Self> {
        Arc::new(Inert)
    }
}

impl DefaultDouble for dyn Unknown {
    fn default_double() -> Arc<Self> {
        Arc::new(Inert)
    }
}

/// Two constructors; the binary one is the greediest
pub struct Service {
    pub logger: Arc<dyn Logger>,
    pub clock: Arc<dyn Clock>,
    pub constructor: &'static str,
}

impl Service {
    pub fn stamp(&self, message: &str) -> u64 {
        let now = self.clock.now();
        self.logger.log(&format!("{now}: {message}"));
        now
    }
}

impl Subject for Service {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![
            Constructor::unary("with_logger", |logger: Arc<dyn Logger>| {
                Ok(Service {
                    logger,
                    clock: Arc::new(FixedClock(0)),
                    constructor: "with_logger",
                })
            }),
            Constructor::binary("new", |logger: Arc<dyn Logger>, clock: Arc<dyn Clock>| {
                Ok(Service {
                    logger,
                    clock,
                    constructor: "new",
                })
            }),
        ]
    }
}

/// Single zero-argument constructor
pub struct Reporter {
    pub title: String,
}

impl Subject for Reporter {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::nullary("new", || {
            Ok(Reporter {
                title: "report".to_string(),
            })
        })]
    }
}

/// Two constructors of equal arity
pub struct Ticker {
    pub constructor: &'static str,
}

impl Subject for Ticker {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![
            Constructor::unary("from_clock", |_: Arc<dyn Clock>| {
                Ok(Ticker {
                    constructor: "from_clock",
                })
            }),
            Constructor::unary("from_counter", |_: Arc<dyn Counter>| {
                Ok(Ticker {
                    constructor: "from_counter",
                })
            }),
        ]
    }
}

/// Constructor that rejects its input
pub struct Faulty;

impl Subject for Faulty {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::unary("new", |clock: Arc<dyn Clock>| {
            if clock.now() == 0 {
                return Err(cspec_domain::Error::invalid_argument("clock not started"));
            }
            Ok(Faulty)
        })]
    }
}

/// Constructor that panics
pub struct Panicky;

impl Subject for Panicky {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::nullary("new", || panic!("boom"))]
    }
}

/// Needs a capability no blueprint exists for
pub struct Orphan;

impl Subject for Orphan {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::unary("new", |_: Arc<dyn Unknown>| Ok(Orphan))]
    }
}

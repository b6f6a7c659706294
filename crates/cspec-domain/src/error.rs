//! Error handling types

use thiserror::Error;

/// Result type alias for harness operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error produced by user code (hooks, constructors, trapped actions)
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for the context/specification harness
#[derive(Error, Debug)]
pub enum Error {
    /// The selected constructor failed while building the subject
    #[error("Construction error: {subject} via `{constructor}`: {message}")]
    Construction {
        /// Type name of the subject under test
        subject: &'static str,
        /// Name of the constructor that was invoked
        constructor: &'static str,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// The subject declares no constructor at all
    #[error("No constructor declared for {subject}")]
    NoConstructor {
        /// Type name of the subject under test
        subject: &'static str,
    },

    /// Several constructors share the greatest arity and ties are rejected
    #[error("Ambiguous constructor for {subject}: {candidates:?} all take {arity} parameter(s)")]
    AmbiguousConstructor {
        /// Type name of the subject under test
        subject: &'static str,
        /// Shared parameter count
        arity: usize,
        /// Names of the tied constructors, in declaration order
        candidates: Vec<&'static str>,
    },

    /// The double factory has no blueprint for the requested capability
    #[error("Unknown capability: no test-double blueprint for {capability}")]
    UnknownCapability {
        /// Capability type name
        capability: String,
    },

    /// A double was asked for a capability view it does not offer
    #[error("Capability mismatch: expected {expected}, found {found}")]
    CapabilityMismatch {
        /// Capability the caller asked for
        expected: String,
        /// Primary capability of the double that was supplied
        found: String,
    },

    /// A constructor consumed more arguments than were bound
    #[error("Missing argument #{index} ({capability})")]
    MissingArgument {
        /// Zero-based argument position
        index: usize,
        /// Capability expected at that position
        capability: String,
    },

    /// A mock's expectations were not met
    #[error("Expectation violation on {capability}: {message}")]
    ExpectationViolation {
        /// Capability of the double whose expectations failed
        capability: String,
        /// Description of the unmet expectations
        message: String,
    },

    /// An error raised inside a trapped action that did not match the expected kind
    #[error("Untrapped error: {source}")]
    Untrapped {
        /// The original error, propagated unchanged
        #[source]
        source: BoxError,
    },

    /// One of the set-up phases failed
    #[error("Set-up failed in {phase}: {source}")]
    SetUp {
        /// Phase that failed (`establish_context`, `create_subject`, `because`)
        phase: &'static str,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },

    /// Disposing the context failed
    #[error("Tear-down failed: {message}")]
    TearDown {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<Error>>,
    },

    /// An observation (assertion) did not hold
    #[error("Observation '{observation}' failed: {message}")]
    ObservationFailed {
        /// Observation name
        observation: String,
        /// Assertion message
        message: String,
    },

    /// The context already owns a subject
    #[error("Subject already created for {subject}")]
    SubjectAlreadyCreated {
        /// Type name of the subject under test
        subject: &'static str,
    },

    /// The subject was requested before it was created
    #[error("Subject not created: {message}")]
    SubjectNotCreated {
        /// Description of the access that failed
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Generic error from user code
    #[error("Generic error: {0}")]
    Generic(#[from] BoxError),
}

impl Error {
    /// Create a construction error wrapping the constructor's own failure
    pub fn construction<E>(subject: &'static str, constructor: &'static str, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        let source = source.into();
        Self::Construction {
            subject,
            constructor,
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Create a construction error for a constructor that panicked
    pub fn construction_panic<S: Into<String>>(
        subject: &'static str,
        constructor: &'static str,
        message: S,
    ) -> Self {
        Self::Construction {
            subject,
            constructor,
            message: format!("constructor panicked: {}", message.into()),
            source: None,
        }
    }

    /// Create an unknown capability error
    pub fn unknown_capability<S: Into<String>>(capability: S) -> Self {
        Self::UnknownCapability {
            capability: capability.into(),
        }
    }

    /// Create an expectation violation error
    pub fn expectation<C: Into<String>, M: Into<String>>(capability: C, message: M) -> Self {
        Self::ExpectationViolation {
            capability: capability.into(),
            message: message.into(),
        }
    }

    /// Wrap a failure of one set-up phase
    pub fn set_up(phase: &'static str, source: Error) -> Self {
        Self::SetUp {
            phase,
            source: Box::new(source),
        }
    }

    /// Create an observation failure
    pub fn observation<O: Into<String>, M: Into<String>>(observation: O, message: M) -> Self {
        Self::ObservationFailed {
            observation: observation.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a generic error from a message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        let message: String = message.into();
        Self::Generic(message.into())
    }

    /// Whether this error (or the set-up phase it wraps) is a construction failure
    pub fn is_construction(&self) -> bool {
        match self {
            Self::Construction { .. } => true,
            Self::SetUp { source, .. } => source.is_construction(),
            _ => false,
        }
    }
}

//! Subject factory policies

use serde::{Deserialize, Serialize};

/// How the subject factory handles several constructors of equal maximum arity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The constructor declared first wins
    #[default]
    FirstDeclared,
    /// Construction fails with `Error::AmbiguousConstructor`
    Reject,
}

//! Subject Constructor Declarations
//!
//! Rust has no runtime constructor introspection, so a subject under test
//! declares its constructors statically through [`Subject::constructors`].
//! Each [`Constructor`] carries the ordered [`Parameter`]s it needs and a
//! build function that receives the bound doubles as [`Arguments`].
//!
//! Every parameter type implements [`DefaultDouble`], so a parameter the
//! context did not declare, and the double factory cannot synthesize, is
//! still bound to a default stand-in.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use cspec_domain::{Constructor, DefaultDouble, Subject};
//!
//! pub trait Clock: Send + Sync {
//!     fn now(&self) -> u64;
//! }
//!
//! struct Epoch;
//!
//! impl Clock for Epoch {
//!     fn now(&self) -> u64 {
//!         0
//!     }
//! }
//!
//! impl DefaultDouble for dyn Clock {
//!     fn default_double() -> Arc<Self> {
//!         Arc::new(Epoch)
//!     }
//! }
//!
//! pub struct Greeter {
//!     clock: Option<Arc<dyn Clock>>,
//! }
//!
//! impl Subject for Greeter {
//!     fn constructors() -> Vec<Constructor<Self>> {
//!         vec![
//!             Constructor::nullary("new", || Ok(Greeter { clock: None })),
//!             Constructor::unary("with_clock", |clock: Arc<dyn Clock>| {
//!                 Ok(Greeter { clock: Some(clock) })
//!             }),
//!         ]
//!     }
//! }
//!
//! let constructors = Greeter::constructors();
//! assert_eq!(constructors[1].arity(), 1);
//! ```

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::ports::doubles::ErasedDouble;
use crate::value_objects::{CapabilityId, DoubleKind};

/// A type the subject factory can build
pub trait Subject: Sized + 'static {
    /// Every public constructor, in declaration order
    fn constructors() -> Vec<Constructor<Self>>;
}

/// Subject of specifications that have no object under test
impl Subject for () {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::nullary("unit", || Ok(()))]
    }
}

/// Stand-in used when nothing else can be bound to a parameter
///
/// Implemented on the capability itself (`impl DefaultDouble for dyn Clock`).
pub trait DefaultDouble: Send + Sync + 'static {
    /// A fresh double with default, always-succeeding behavior
    fn default_double() -> Arc<Self>;
}

/// One constructor parameter: its capability and default stand-in
#[derive(Clone, Copy)]
pub struct Parameter {
    capability: CapabilityId,
    fallback: fn() -> ErasedDouble,
}

impl Parameter {
    /// Parameter requiring capability `A`
    pub fn of<A: ?Sized + DefaultDouble>() -> Self {
        Self {
            capability: CapabilityId::of::<A>(),
            fallback: default_stub::<A>,
        }
    }

    /// Required capability
    pub fn capability(&self) -> CapabilityId {
        self.capability
    }

    /// Erased default stand-in for the capability
    pub fn fallback(&self) -> ErasedDouble {
        (self.fallback)()
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Parameter").field(&self.capability).finish()
    }
}

fn default_stub<A: ?Sized + DefaultDouble>() -> ErasedDouble {
    ErasedDouble::new(DoubleKind::Stub, A::default_double())
}

type BuildFn<S> = Box<dyn Fn(&mut Arguments) -> Result<S>>;

/// One declared constructor of a subject
pub struct Constructor<S> {
    name: &'static str,
    params: Vec<Parameter>,
    build: BuildFn<S>,
}

impl<S: 'static> Constructor<S> {
    /// Constructor taking explicitly listed parameters
    ///
    /// `build` pulls its arguments in order with [`Arguments::next`].
    pub fn custom<F>(name: &'static str, params: Vec<Parameter>, build: F) -> Self
    where
        F: Fn(&mut Arguments) -> Result<S> + 'static,
    {
        Self {
            name,
            params,
            build: Box::new(build),
        }
    }

    /// Zero-argument constructor
    pub fn nullary<F>(name: &'static str, build: F) -> Self
    where
        F: Fn() -> Result<S> + 'static,
    {
        Self::custom(name, Vec::new(), move |_| build())
    }

    /// One-argument constructor
    pub fn unary<A, F>(name: &'static str, build: F) -> Self
    where
        A: ?Sized + DefaultDouble,
        F: Fn(Arc<A>) -> Result<S> + 'static,
    {
        Self::custom(name, vec![Parameter::of::<A>()], move |args| {
            build(args.next::<A>()?)
        })
    }

    /// Two-argument constructor
    pub fn binary<A, B, F>(name: &'static str, build: F) -> Self
    where
        A: ?Sized + DefaultDouble,
        B: ?Sized + DefaultDouble,
        F: Fn(Arc<A>, Arc<B>) -> Result<S> + 'static,
    {
        Self::custom(
            name,
            vec![Parameter::of::<A>(), Parameter::of::<B>()],
            move |args| {
                let a = args.next::<A>()?;
                let b = args.next::<B>()?;
                build(a, b)
            },
        )
    }

    /// Three-argument constructor
    pub fn ternary<A, B, C, F>(name: &'static str, build: F) -> Self
    where
        A: ?Sized + DefaultDouble,
        B: ?Sized + DefaultDouble,
        C: ?Sized + DefaultDouble,
        F: Fn(Arc<A>, Arc<B>, Arc<C>) -> Result<S> + 'static,
    {
        Self::custom(
            name,
            vec![
                Parameter::of::<A>(),
                Parameter::of::<B>(),
                Parameter::of::<C>(),
            ],
            move |args| {
                let a = args.next::<A>()?;
                let b = args.next::<B>()?;
                let c = args.next::<C>()?;
                build(a, b, c)
            },
        )
    }

    /// Constructor name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Parameters in declaration order
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Required capabilities in declaration order
    pub fn capabilities(&self) -> Vec<CapabilityId> {
        self.params.iter().map(Parameter::capability).collect()
    }

    /// Parameter count
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Run the build function with bound arguments
    ///
    /// `bound` must hold exactly one double per parameter, in order.
    pub fn invoke(&self, bound: Vec<ErasedDouble>) -> Result<S> {
        if bound.len() != self.params.len() {
            return Err(Error::invalid_argument(format!(
                "{}::{} takes {} argument(s), {} bound",
                type_name::<S>(),
                self.name,
                self.params.len(),
                bound.len()
            )));
        }
        let mut args = Arguments::new(self.capabilities(), bound);
        (self.build)(&mut args)
    }
}

impl<S> fmt::Debug for Constructor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish()
    }
}

/// Bound constructor arguments, consumed in declaration order
#[derive(Debug)]
pub struct Arguments {
    params: Vec<CapabilityId>,
    values: Vec<ErasedDouble>,
    position: usize,
}

impl Arguments {
    /// Arguments for `params`, bound to `values` position by position
    pub fn new(params: Vec<CapabilityId>, values: Vec<ErasedDouble>) -> Self {
        Self {
            params,
            values,
            position: 0,
        }
    }

    /// Take the next argument as capability `C`
    pub fn next<C: ?Sized + 'static>(&mut self) -> Result<Arc<C>> {
        let index = self.position;
        let double = self.values.get(index).ok_or_else(|| Error::MissingArgument {
            index,
            capability: self
                .params
                .get(index)
                .map_or_else(|| type_name::<C>().to_string(), |p| p.name().to_string()),
        })?;
        let handle = double
            .view::<C>()
            .ok_or_else(|| Error::CapabilityMismatch {
                expected: type_name::<C>().to_string(),
                found: double.primary().name().to_string(),
            })?;
        self.position += 1;
        Ok(handle)
    }

    /// Arguments not consumed yet
    pub fn remaining(&self) -> usize {
        self.values.len().saturating_sub(self.position)
    }
}

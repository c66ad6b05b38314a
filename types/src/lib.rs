//! Sieve Types
//!
//! Runtime types that coerce and validate dynamic values, and the
//! constrained-type decorator that gates a type behind a rule.
//!
//! Responsibilities:
//! - Define the capability set shared by every type (`Type`)
//! - Provide nominal, constructor, and lax variants
//! - Enforce rules before delegating (`ConstrainedType`)
//! - Report violations as raised errors or as non-raising `Failure`s

mod builder;
mod capability;
mod constrained;
mod constructor;
mod error;
mod lax;
mod nominal;
mod outcome;

pub use builder::{nominal, strict, Builder};
pub use capability::{SharedType, Type, TypeKind};
pub use constrained::{ConstrainedType, Enforcement};
pub use constructor::{Constructor, Transform};
pub use error::{CoercionError, ConstraintError, TypeError, TypeResult};
pub use lax::Lax;
pub use nominal::{Nominal, Primitive};
pub use outcome::{Failure, Outcome};

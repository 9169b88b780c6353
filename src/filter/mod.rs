//! Filter engine module
//!
//! Secondary, independent predicates applied to the candidate list after the
//! scan: name/path length bounds, wildcard masks, a regular expression, and a
//! structured field predicate. All enabled filters must pass (logical AND),
//! except wildcard masks which are OR'd together - an item matching any
//! configured mask passes the mask check.
//!
//! Invalid configuration (a malformed regex, an unparsable predicate or mask)
//! disables only that filter and surfaces as a warning; it never rejects the
//! whole batch.

pub mod engine;
pub mod predicate;
pub mod types;

pub use engine::{FilterBuild, FilterConfig};
pub use predicate::{Field, Op, Predicate, PredicateError};
pub use types::{Bounds, FilterSpec};

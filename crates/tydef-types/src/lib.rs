//! Runtime type descriptors.
//!
//! A descriptor is a predicate over [`Value`]s plus, for container types, the
//! structural decomposition of a value into child values. An [`Env`] is the
//! closed set of descriptors inference may produce.
//!
//! [`Value`]: tydef_value::Value

pub mod builtin;
pub mod env;
pub mod infer;
pub mod types;

pub mod prelude {
    pub use crate::env::{Env, EnvEntry};
    pub use crate::infer::Mode;
    pub use crate::types::*;
}

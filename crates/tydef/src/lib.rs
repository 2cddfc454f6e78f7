//! Runtime checked, curried functions.
//!
//! A [`Definer`] turns a name, type class constraints, a signature and an
//! implementation into a [`Curried`] function. Every supplied argument is
//! checked against its declared type as it arrives, type variables are
//! unified across positions and partial applications, and the return value
//! is checked once the implementation has run.
//!
//! ```
//! use tydef::prelude::*;
//!
//! let def = create(true, builtin::env());
//! let n = builtin::number;
//! let add = def.def("add", Constraints::new(), vec![n(), n(), n()], |args| {
//!     let num = |v: &Value| v.as_num().copied().unwrap_or(f64::NAN);
//!     Value::from(num(&args[0]) + num(&args[1]))
//! })?;
//! assert_eq!(add.call([2, 3])?, Value::from(5));
//! # Ok::<(), TypeError>(())
//! ```

mod context;
mod curry;
mod definer;
mod error;
mod options;
mod report;
mod signature;
mod verify;

pub use context::{Binding, Context, Evidence};
pub use curry::{Applied, Arg, Curried, Implementation, __};
pub use definer::{create, Definer};
pub use error::{number_word, DefinitionError, ErrorKind, TypeError};
pub use options::{DefOptions, CHECK_TYPES_VAR};
pub use signature::{Constraints, Position, Signature};
pub use verify::Verifier;

pub use tydef_diag as diag;
pub use tydef_types::{builtin, env, infer, types};
pub use tydef_value as value;

pub mod prelude {
    pub use crate::{
        create, Applied, Arg, Constraints, Curried, DefOptions, Definer, ErrorKind, TypeError, __,
    };
    pub use tydef_types::{builtin, prelude::*};
    pub use tydef_value::{Function, List, Object, Value};
}

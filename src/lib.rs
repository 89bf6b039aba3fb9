//! protected-mock - configure and verify non-public members of a mock by name
//!
//! Members that cannot be named in a typed expression are reached through
//! [`Mock::protected`], which resolves a member name and a mixed list of
//! literal and matcher arguments into the same call descriptor a typed
//! setup would produce, then hands it to the mock engine.
//!
//! ```rust,ignore
//! use protected_mock::{args, It, Mock, Times};
//!
//! let mut mock = Mock::new(widget_descriptor());
//! mock.protected()
//!     .setup_result::<String>("Format", &args![It::is_any::<i32>()])?
//!     .returns("formatted".to_string());
//!
//! mock.call("Format", vec![5.into()])?;
//! mock.protected().verify_result::<String>("Format", Times::once(), &args![5])?;
//! ```

pub mod core;
pub mod engine;
pub mod matcher;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test fixtures and logging setup for unit tests.
///
/// This module is only available when compiling with `--cfg test`.
#[cfg(test)]
pub mod test_support;

pub use core::{
    member::{MethodInfo, Parameter, PropertyInfo, Visibility},
    ty::{Ty, Typed},
    type_desc::{Describe, TypeDescriptor},
    value::Value,
};
pub use engine::{Mock, MockError, Times};
pub use matcher::{Expr, It};
pub use ops::Protected;
pub use resolver::{Arg, CallDescriptor, MemberResolver, ProtectedError};
pub use util::config::{MockBehavior, MockConfig, SequenceExhausted};

/// Build an argument list for the by-name operations.
///
/// Each element is converted with `Arg::from`, so literals and matcher
/// expressions can be mixed: `args![5, It::is_any::<String>()]`.
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        [$($crate::Arg::from($arg)),*]
    };
}

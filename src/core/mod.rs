//! Core data structures.
//!
//! The type model the resolver works against:
//! - Runtime types and values (`Ty`, `Value`)
//! - Member metadata (`MethodInfo`, `PropertyInfo`)
//! - Type descriptors, the reflection data of a mocked type

pub mod member;
pub mod ty;
pub mod type_desc;
pub mod value;

pub use member::{MethodInfo, Parameter, PropertyInfo, Visibility};
pub use ty::{Ty, TyKind, Typed};
pub use type_desc::{Describe, TypeDescriptor, TypeDescriptorBuilder};
pub use value::{ObjectValue, Value};

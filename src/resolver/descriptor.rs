//! Call descriptors - the recipes handed to the mock engine.
//!
//! A descriptor names one member and the expressions bound to its
//! arguments. It is the same shape whether it was produced by name-based
//! resolution or built directly from a known member, so the engine cannot
//! tell the two apart.

use std::fmt;

use crate::core::member::{MethodInfo, PropertyInfo};
use crate::core::ty::Ty;
use crate::matcher::{Expr, It};
use crate::resolver::args::ArgumentSpec;

#[derive(Debug, Clone, PartialEq)]
pub enum CallDescriptor {
    /// A method call with one bound expression per parameter.
    Invocation { method: MethodInfo, args: Vec<Expr> },
    /// A property getter call.
    PropertyRead { property: PropertyInfo },
    /// A property setter call with the bound value expression.
    PropertyWrite { property: PropertyInfo, value: Expr },
}

impl CallDescriptor {
    /// Bind `specs` positionally to the parameters of `method`.
    ///
    /// The caller guarantees `specs.len() == method.arity()`, which holds
    /// for any method the resolver returned for those specs.
    pub fn invocation(method: &MethodInfo, specs: &[ArgumentSpec]) -> Self {
        debug_assert_eq!(specs.len(), method.arity());
        let args = method
            .param_types()
            .zip(specs)
            .map(|(ty, spec)| spec.bind(ty))
            .collect();

        CallDescriptor::Invocation {
            method: method.clone(),
            args,
        }
    }

    pub fn property_read(property: &PropertyInfo) -> Self {
        CallDescriptor::PropertyRead {
            property: property.clone(),
        }
    }

    /// A setter call. Without a value, any value of the property type matches.
    pub fn property_write(property: &PropertyInfo, value: Option<&ArgumentSpec>) -> Self {
        let value = match value {
            Some(spec) => spec.bind(&property.ty),
            None => It::is_any_of(property.ty.clone()),
        };

        CallDescriptor::PropertyWrite {
            property: property.clone(),
            value,
        }
    }

    /// Whether `other` was built from the same member and the same authored
    /// arguments. Unlike `==`, predicate matchers compare by type and
    /// description rather than by closure identity.
    pub fn same_pattern(&self, other: &CallDescriptor) -> bool {
        format!("{:?}", self) == format!("{:?}", other)
    }

    pub fn member_name(&self) -> &str {
        match self {
            CallDescriptor::Invocation { method, .. } => &method.name,
            CallDescriptor::PropertyRead { property }
            | CallDescriptor::PropertyWrite { property, .. } => &property.name,
        }
    }

    /// The type a configured response must have.
    pub fn result_type(&self) -> Ty {
        match self {
            CallDescriptor::Invocation { method, .. } => method.return_type.clone(),
            CallDescriptor::PropertyRead { property } => property.ty.clone(),
            CallDescriptor::PropertyWrite { .. } => Ty::void(),
        }
    }
}

impl fmt::Display for CallDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallDescriptor::Invocation { method, args } => {
                let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(
                    f,
                    "{}.{}({})",
                    method.declaring_type,
                    method.name,
                    args.join(", ")
                )
            }
            CallDescriptor::PropertyRead { property } => {
                write!(f, "{}.{}", property.declaring_type, property.name)
            }
            CallDescriptor::PropertyWrite { property, value } => {
                write!(f, "{}.{} = {}", property.declaring_type, property.name, value)
            }
        }
    }
}

//! Recorded invocations and descriptor matching.

use std::fmt;

use crate::core::member::{MethodInfo, PropertyInfo};
use crate::core::value::Value;
use crate::resolver::CallDescriptor;

/// The member an intercepted call reached.
#[derive(Debug, Clone, PartialEq)]
pub enum InvokedMember {
    Method(MethodInfo),
    Getter(PropertyInfo),
    Setter(PropertyInfo),
}

/// One intercepted call with its actual argument values.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub member: InvokedMember,
    pub args: Vec<Value>,
}

impl Invocation {
    pub fn method(method: MethodInfo, args: Vec<Value>) -> Self {
        Invocation {
            member: InvokedMember::Method(method),
            args,
        }
    }

    pub fn getter(property: PropertyInfo) -> Self {
        Invocation {
            member: InvokedMember::Getter(property),
            args: Vec::new(),
        }
    }

    pub fn setter(property: PropertyInfo, value: Value) -> Self {
        Invocation {
            member: InvokedMember::Setter(property),
            args: vec![value],
        }
    }

    /// Whether this call is one the descriptor describes.
    pub fn matches(&self, call: &CallDescriptor) -> bool {
        match (&self.member, call) {
            (InvokedMember::Method(actual), CallDescriptor::Invocation { method, args }) => {
                actual == method
                    && args.len() == self.args.len()
                    && args.iter().zip(&self.args).all(|(e, v)| e.matches(v))
            }
            (InvokedMember::Getter(actual), CallDescriptor::PropertyRead { property }) => {
                actual == property
            }
            (InvokedMember::Setter(actual), CallDescriptor::PropertyWrite { property, value }) => {
                actual == property && self.args.first().is_some_and(|v| value.matches(v))
            }
            _ => false,
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.member {
            InvokedMember::Method(method) => {
                let args: Vec<String> = self.args.iter().map(|a| a.to_string()).collect();
                write!(
                    f,
                    "{}.{}({})",
                    method.declaring_type,
                    method.name,
                    args.join(", ")
                )
            }
            InvokedMember::Getter(property) => {
                write!(f, "{}.{}", property.declaring_type, property.name)
            }
            InvokedMember::Setter(property) => {
                let value = self.args.first().unwrap_or(&Value::Null);
                write!(f, "{}.{} = {}", property.declaring_type, property.name, value)
            }
        }
    }
}

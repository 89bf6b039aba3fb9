//! Runtime values passed to and returned from mocked members.

use std::fmt;

use crate::core::ty::Ty;

/// An instance of a user-defined reference or value type.
///
/// Objects compare by type and label, which is enough to tell two test
/// instances apart.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectValue {
    pub ty: Ty,
    pub label: String,
}

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    Str(String),
    Object(ObjectValue),
}

impl Value {
    /// Create an object value of a user-defined type.
    pub fn object(ty: Ty, label: impl Into<String>) -> Self {
        Value::Object(ObjectValue {
            ty,
            label: label.into(),
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The runtime type of this value. `Null` has none.
    pub fn runtime_ty(&self) -> Option<Ty> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(Ty::bool()),
            Value::Int(_) => Some(Ty::int()),
            Value::Long(_) => Some(Ty::long()),
            Value::Double(_) => Some(Ty::double()),
            Value::Str(_) => Some(Ty::string()),
            Value::Object(obj) => Some(obj.ty.clone()),
        }
    }

    /// Whether this value can be passed in a slot of type `ty`.
    ///
    /// `Null` fits any reference slot. By-ref slots accept their element type.
    pub fn fits(&self, ty: &Ty) -> bool {
        let slot = ty.without_ref();
        match self.runtime_ty() {
            None => slot.is_reference(),
            Some(actual) => slot.is_assignable_from(&actual),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(f64::from(*n)),
            Value::Long(n) => Some(*n as f64),
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Long(n) => write!(f, "{}L", n),
            Value::Double(d) => write!(f, "{:?}", d),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Object(obj) => write!(f, "{}({})", obj.ty, obj.label),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Long(n)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_types() {
        assert_eq!(Value::Int(5).runtime_ty(), Some(Ty::int()));
        assert_eq!(Value::from("x").runtime_ty(), Some(Ty::string()));
        assert_eq!(Value::Null.runtime_ty(), None);
    }

    #[test]
    fn test_fits_slot() {
        let animal = Ty::class("Animal", None);
        let dog = Ty::class("Dog", Some(animal.clone()));

        assert!(Value::object(dog, "rex").fits(&animal));
        assert!(Value::Null.fits(&animal));
        assert!(!Value::Null.fits(&Ty::int()));
        assert!(Value::Int(3).fits(&Ty::int().by_ref()));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(5).to_string(), "5");
        assert_eq!(Value::from("hi").to_string(), "\"hi\"");
        assert_eq!(Value::Long(7).to_string(), "7L");
    }
}

//! Runtime type handles for mocked members.
//!
//! A `Ty` is the stand-in for reflection type metadata: it knows its name,
//! whether it is a value, reference, interface or by-reference type, and its
//! supertypes. Assignability follows the usual object-model rules: identity
//! for value types, base-chain and interface walks for reference types, and
//! `object` as the implicit root of everything that is not `void` or by-ref.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::core::value::Value;

/// The storage category of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TyKind {
    /// No value (method return type only).
    Void,
    /// Copied by value; never covariant.
    Value,
    /// Class-like reference type.
    Reference,
    /// Interface implemented by reference or value types.
    Interface,
    /// A by-reference (`ref`/`out`) parameter type wrapping an element type.
    ByRef,
}

/// A cheap-to-clone type handle.
#[derive(Clone)]
pub struct Ty {
    inner: Arc<TyInner>,
}

struct TyInner {
    name: String,
    kind: TyKind,
    base: Option<Ty>,
    interfaces: Vec<Ty>,
    element: Option<Ty>,
}

impl Ty {
    fn new(
        name: impl Into<String>,
        kind: TyKind,
        base: Option<Ty>,
        interfaces: Vec<Ty>,
        element: Option<Ty>,
    ) -> Self {
        Ty {
            inner: Arc::new(TyInner {
                name: name.into(),
                kind,
                base,
                interfaces,
                element,
            }),
        }
    }

    pub fn void() -> Self {
        Ty::new("void", TyKind::Void, None, Vec::new(), None)
    }

    pub fn bool() -> Self {
        Ty::value_type("bool")
    }

    pub fn int() -> Self {
        Ty::value_type("int")
    }

    pub fn long() -> Self {
        Ty::value_type("long")
    }

    pub fn double() -> Self {
        Ty::value_type("double")
    }

    pub fn string() -> Self {
        Ty::new("string", TyKind::Reference, None, Vec::new(), None)
    }

    pub fn object() -> Self {
        Ty::new("object", TyKind::Reference, None, Vec::new(), None)
    }

    /// A user-defined value type.
    pub fn value_type(name: impl Into<String>) -> Self {
        Ty::new(name, TyKind::Value, None, Vec::new(), None)
    }

    /// A reference type with an optional base class.
    pub fn class(name: impl Into<String>, base: Option<Ty>) -> Self {
        Ty::new(name, TyKind::Reference, base, Vec::new(), None)
    }

    /// A reference type implementing the given interfaces.
    pub fn class_implementing(
        name: impl Into<String>,
        base: Option<Ty>,
        interfaces: Vec<Ty>,
    ) -> Self {
        Ty::new(name, TyKind::Reference, base, interfaces, None)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Ty::new(name, TyKind::Interface, None, Vec::new(), None)
    }

    /// Wrap this type as a by-reference parameter type.
    pub fn by_ref(&self) -> Self {
        if self.is_by_ref() {
            return self.clone();
        }
        Ty::new(
            format!("{}&", self.inner.name),
            TyKind::ByRef,
            None,
            Vec::new(),
            Some(self.clone()),
        )
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn kind(&self) -> TyKind {
        self.inner.kind
    }

    pub fn base(&self) -> Option<&Ty> {
        self.inner.base.as_ref()
    }

    pub fn is_void(&self) -> bool {
        self.inner.kind == TyKind::Void
    }

    pub fn is_by_ref(&self) -> bool {
        self.inner.kind == TyKind::ByRef
    }

    /// Whether values of this type are references (nullable).
    pub fn is_reference(&self) -> bool {
        matches!(self.inner.kind, TyKind::Reference | TyKind::Interface)
    }

    pub fn is_object(&self) -> bool {
        self.inner.kind == TyKind::Reference && self.inner.name == "object"
    }

    /// The element type of a by-ref type.
    pub fn element_type(&self) -> Option<&Ty> {
        self.inner.element.as_ref()
    }

    /// Strip one by-ref layer, if any.
    pub fn without_ref(&self) -> &Ty {
        self.element_type().unwrap_or(self)
    }

    /// Every proper supertype: the base chain, then interfaces, depth first.
    pub fn supertypes(&self) -> Vec<Ty> {
        let mut out = Vec::new();
        self.collect_supertypes(&mut out);
        out
    }

    fn collect_supertypes(&self, out: &mut Vec<Ty>) {
        if let Some(base) = &self.inner.base {
            if !out.contains(base) {
                out.push(base.clone());
            }
            base.collect_supertypes(out);
        }
        for iface in &self.inner.interfaces {
            if !out.contains(iface) {
                out.push(iface.clone());
            }
            iface.collect_supertypes(out);
        }
    }

    /// Whether a value of type `from` can be stored in a slot of this type.
    pub fn is_assignable_from(&self, from: &Ty) -> bool {
        if self == from {
            return true;
        }
        match self.inner.kind {
            // By-ref slots are invariant.
            TyKind::Void | TyKind::ByRef | TyKind::Value => false,
            TyKind::Reference | TyKind::Interface => {
                if from.is_void() || from.is_by_ref() {
                    return false;
                }
                if self.is_object() {
                    return true;
                }
                from.supertypes().iter().any(|t| t == self)
            }
        }
    }

    /// The value an unconfigured member of this type yields.
    pub fn default_value(&self) -> Option<Value> {
        match self.inner.kind {
            TyKind::Void => None,
            TyKind::ByRef => self.without_ref().default_value(),
            TyKind::Reference | TyKind::Interface => Some(Value::Null),
            TyKind::Value => Some(match self.inner.name.as_str() {
                "bool" => Value::Bool(false),
                "int" => Value::Int(0),
                "long" => Value::Long(0),
                "double" => Value::Double(0.0),
                _ => Value::Null,
            }),
        }
    }
}

impl PartialEq for Ty {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        self.inner.kind == other.inner.kind
            && self.inner.name == other.inner.name
            && self.inner.element == other.inner.element
    }
}

impl Eq for Ty {}

impl Hash for Ty {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.kind.hash(state);
        self.inner.name.hash(state);
    }
}

impl fmt::Debug for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ty({})", self.inner.name)
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.element {
            Some(element) => write!(f, "ref {}", element),
            None => f.write_str(&self.inner.name),
        }
    }
}

/// Rust types with a fixed counterpart in the mocked type model.
///
/// Used by the typed facade operations (`setup_result::<R>`,
/// `setup_get::<P>`, ...) the way a generic result parameter is used by a
/// strongly-typed mocking API.
pub trait Typed: Sized {
    fn ty() -> Ty;

    fn into_value(self) -> Value;

    fn from_value(value: &Value) -> Option<Self>;
}

impl Typed for () {
    fn ty() -> Ty {
        Ty::void()
    }

    fn into_value(self) -> Value {
        Value::Null
    }

    fn from_value(_value: &Value) -> Option<Self> {
        Some(())
    }
}

impl Typed for bool {
    fn ty() -> Ty {
        Ty::bool()
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl Typed for i32 {
    fn ty() -> Ty {
        Ty::int()
    }

    fn into_value(self) -> Value {
        Value::Int(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl Typed for i64 {
    fn ty() -> Ty {
        Ty::long()
    }

    fn into_value(self) -> Value {
        Value::Long(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Long(n) => Some(*n),
            Value::Int(n) => Some(i64::from(*n)),
            _ => None,
        }
    }
}

impl Typed for f64 {
    fn ty() -> Ty {
        Ty::double()
    }

    fn into_value(self) -> Value {
        Value::Double(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }
}

impl Typed for String {
    fn ty() -> Ty {
        Ty::string()
    }

    fn into_value(self) -> Value {
        Value::Str(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

//! Method and property metadata.
//!
//! These are the "reflection" records a `TypeDescriptor` exposes. Properties
//! carry no index parameters: indexers cannot be described, so they can never
//! be configured by name.

use std::fmt;

use crate::core::ty::Ty;

/// Member accessibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    Internal,
    ProtectedInternal,
    PrivateProtected,
    Private,
}

impl Visibility {
    pub fn is_public(self) -> bool {
        self == Visibility::Public
    }

    /// Whether a derived type can see a member with this visibility.
    pub fn is_inheritable(self) -> bool {
        self != Visibility::Private
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Internal => "internal",
            Visibility::ProtectedInternal => "protected internal",
            Visibility::PrivateProtected => "private protected",
            Visibility::Private => "private",
        };
        f.write_str(s)
    }
}

/// A declared method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub ty: Ty,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: Ty) -> Self {
        Parameter {
            name: name.into(),
            ty,
        }
    }
}

/// A method declared on (or inherited by) a target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: String,
    pub params: Vec<Parameter>,
    pub return_type: Ty,
    pub visibility: Visibility,
    pub declaring_type: String,
    pub is_static: bool,
}

impl MethodInfo {
    /// Ordered parameter types.
    pub fn param_types(&self) -> impl Iterator<Item = &Ty> + '_ {
        self.params.iter().map(|p| &p.ty)
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn returns_void(&self) -> bool {
        self.return_type.is_void()
    }

    /// Two methods with the same name and parameter types share a signature.
    pub fn same_signature(&self, other: &MethodInfo) -> bool {
        self.name == other.name && self.param_types().eq(other.param_types())
    }

    /// `Format(int)`
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.param_types().map(|t| t.to_string()).collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

impl fmt::Display for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}.{}",
            self.visibility,
            self.return_type,
            self.declaring_type,
            self.signature()
        )
    }
}

/// A property declared on (or inherited by) a target type.
///
/// `getter`/`setter` hold the accessor visibility, `None` when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: String,
    pub ty: Ty,
    pub getter: Option<Visibility>,
    pub setter: Option<Visibility>,
    pub declaring_type: String,
}

impl PropertyInfo {
    pub fn can_read(&self) -> bool {
        self.getter.is_some()
    }

    pub fn can_write(&self) -> bool {
        self.setter.is_some()
    }

    pub fn has_public_getter(&self) -> bool {
        self.getter.is_some_and(Visibility::is_public)
    }

    pub fn has_public_setter(&self) -> bool {
        self.setter.is_some_and(Visibility::is_public)
    }

    /// Whether any accessor is visible to a derived type.
    pub fn is_inheritable(&self) -> bool {
        self.getter.is_some_and(Visibility::is_inheritable)
            || self.setter.is_some_and(Visibility::is_inheritable)
    }
}

impl fmt::Display for PropertyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}.{} {{", self.ty, self.declaring_type, self.name)?;
        if let Some(vis) = self.getter {
            write!(f, " {} get;", vis)?;
        }
        if let Some(vis) = self.setter {
            write!(f, " {} set;", vis)?;
        }
        f.write_str(" }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str, params: Vec<Ty>) -> MethodInfo {
        MethodInfo {
            name: name.to_string(),
            params: params
                .into_iter()
                .enumerate()
                .map(|(i, ty)| Parameter::new(format!("p{}", i), ty))
                .collect(),
            return_type: Ty::void(),
            visibility: Visibility::Protected,
            declaring_type: "Widget".to_string(),
            is_static: false,
        }
    }

    #[test]
    fn test_signature() {
        let m = method("Add", vec![Ty::int(), Ty::int().by_ref()]);
        assert_eq!(m.signature(), "Add(int, ref int)");
        assert_eq!(m.to_string(), "protected void Widget.Add(int, ref int)");
    }

    #[test]
    fn test_same_signature_ignores_parameter_names() {
        let a = method("Add", vec![Ty::int()]);
        let mut b = method("Add", vec![Ty::int()]);
        b.params[0].name = "other".to_string();
        assert!(a.same_signature(&b));
        assert!(!a.same_signature(&method("Add", vec![Ty::long()])));
    }

    #[test]
    fn test_property_accessors() {
        let prop = PropertyInfo {
            name: "Size".to_string(),
            ty: Ty::int(),
            getter: Some(Visibility::Public),
            setter: Some(Visibility::Protected),
            declaring_type: "Widget".to_string(),
        };
        assert!(prop.has_public_getter());
        assert!(!prop.has_public_setter());
        assert_eq!(
            prop.to_string(),
            "int Widget.Size { public get; protected set; }"
        );
    }
}

//! Type descriptors - the member tables of mockable types.
//!
//! A `TypeDescriptor` lists every method and property a type exposes,
//! including members inherited from a base descriptor. It is immutable once
//! built and is what the resolver indexes.

use std::sync::Arc;

use crate::core::member::{MethodInfo, Parameter, PropertyInfo, Visibility};
use crate::core::ty::Ty;

/// Member table of a mockable type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    ty: Ty,
    methods: Vec<MethodInfo>,
    properties: Vec<PropertyInfo>,
}

impl TypeDescriptor {
    /// Start describing a reference type with the given name.
    pub fn builder(name: impl Into<String>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder::new(Ty::class(name, None))
    }

    /// Start describing an existing type handle (keeps its supertypes).
    pub fn builder_for(ty: Ty) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder::new(ty)
    }

    pub fn ty(&self) -> &Ty {
        &self.ty
    }

    pub fn name(&self) -> &str {
        self.ty.name()
    }

    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    /// Instance methods only.
    pub fn instance_methods(&self) -> impl Iterator<Item = &MethodInfo> + '_ {
        self.methods.iter().filter(|m| !m.is_static)
    }
}

/// Types that can describe their own members.
///
/// This is the seam through which a mock learns what it can intercept.
pub trait Describe {
    fn describe() -> TypeDescriptor;
}

/// Builder for `TypeDescriptor`.
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
    ty: Ty,
    methods: Vec<MethodInfo>,
    properties: Vec<PropertyInfo>,
}

impl TypeDescriptorBuilder {
    fn new(ty: Ty) -> Self {
        TypeDescriptorBuilder {
            ty,
            methods: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Inherit the non-private members of `base`.
    ///
    /// Members declared afterwards with the same signature (methods) or name
    /// (properties) override the inherited ones.
    pub fn inherit(mut self, base: &TypeDescriptor) -> Self {
        for method in base.methods() {
            if method.visibility.is_inheritable() {
                self.add_method(method.clone());
            }
        }
        for property in base.properties() {
            if property.is_inheritable() {
                self.add_property(property.clone());
            }
        }
        self
    }

    /// Declare an instance method.
    pub fn method(
        mut self,
        visibility: Visibility,
        name: impl Into<String>,
        params: Vec<Parameter>,
        return_type: Ty,
    ) -> Self {
        let method = MethodInfo {
            name: name.into(),
            params,
            return_type,
            visibility,
            declaring_type: self.ty.name().to_string(),
            is_static: false,
        };
        self.add_method(method);
        self
    }

    /// Declare a static method. Static methods are never mockable.
    pub fn static_method(
        mut self,
        visibility: Visibility,
        name: impl Into<String>,
        params: Vec<Parameter>,
        return_type: Ty,
    ) -> Self {
        let method = MethodInfo {
            name: name.into(),
            params,
            return_type,
            visibility,
            declaring_type: self.ty.name().to_string(),
            is_static: true,
        };
        self.add_method(method);
        self
    }

    /// Declare a property with optional getter and setter accessors.
    pub fn property(
        mut self,
        name: impl Into<String>,
        ty: Ty,
        getter: Option<Visibility>,
        setter: Option<Visibility>,
    ) -> Self {
        let property = PropertyInfo {
            name: name.into(),
            ty,
            getter,
            setter,
            declaring_type: self.ty.name().to_string(),
        };
        self.add_property(property);
        self
    }

    fn add_method(&mut self, method: MethodInfo) {
        self.methods.retain(|m| !m.same_signature(&method));
        self.methods.push(method);
    }

    fn add_property(&mut self, property: PropertyInfo) {
        self.properties.retain(|p| p.name != property.name);
        self.properties.push(property);
    }

    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor {
            ty: self.ty,
            methods: self.methods,
            properties: self.properties,
        }
    }

    /// Build and wrap for sharing between a mock and its resolver.
    pub fn build_shared(self) -> Arc<TypeDescriptor> {
        Arc::new(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> TypeDescriptor {
        TypeDescriptor::builder("Base")
            .method(
                Visibility::Protected,
                "Render",
                vec![Parameter::new("depth", Ty::int())],
                Ty::string(),
            )
            .method(Visibility::Private, "Hidden", vec![], Ty::void())
            .property("Name", Ty::string(), Some(Visibility::Protected), None)
            .property("Secret", Ty::int(), Some(Visibility::Private), None)
            .build()
    }

    #[test]
    fn test_inherit_skips_private_members() {
        let derived = TypeDescriptor::builder("Derived").inherit(&base()).build();

        let names: Vec<_> = derived.methods().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Render"]);
        assert_eq!(derived.properties().len(), 1);
        assert_eq!(derived.properties()[0].declaring_type, "Base");
    }

    #[test]
    fn test_override_replaces_inherited_method() {
        let derived = TypeDescriptor::builder("Derived")
            .inherit(&base())
            .method(
                Visibility::Protected,
                "Render",
                vec![Parameter::new("level", Ty::int())],
                Ty::string(),
            )
            .build();

        assert_eq!(derived.methods().len(), 1);
        assert_eq!(derived.methods()[0].declaring_type, "Derived");
    }

    #[test]
    fn test_static_methods_are_not_instance_methods() {
        let desc = TypeDescriptor::builder("Util")
            .static_method(Visibility::Protected, "Create", vec![], Ty::object())
            .build();

        assert_eq!(desc.methods().len(), 1);
        assert_eq!(desc.instance_methods().count(), 0);
    }
}

//! Accessibility and shape guards.
//!
//! Each facade operation runs a fixed sequence of these checks and stops at
//! the first failure, which becomes the single reported error.

use crate::core::member::{MethodInfo, PropertyInfo};
use crate::core::ty::Ty;
use crate::resolver::errors::{Accessor, ProtectedError};
use crate::resolver::{display_types, MemberQuery, ResolvedMember};

/// Reject an empty or blank member name.
pub fn ensure_name(name: &str) -> Result<(), ProtectedError> {
    if name.trim().is_empty() {
        return Err(ProtectedError::EmptyName);
    }
    Ok(())
}

/// Guards bound to one target type, for error reporting.
pub struct Guards<'a> {
    type_name: &'a str,
}

impl<'a> Guards<'a> {
    pub fn new(type_name: &'a str) -> Self {
        Guards { type_name }
    }

    /// A method lookup must have found something.
    ///
    /// With no arguments the failure is `MemberMissing`; otherwise
    /// `MethodMissing`, listing each inferred argument type.
    pub fn method_found(
        &self,
        query: &MemberQuery,
        resolved: ResolvedMember,
    ) -> Result<MethodInfo, ProtectedError> {
        match resolved {
            ResolvedMember::Method(method) => Ok(method),
            _ if query.args.is_empty() => Err(self.member_missing(&query.name)),
            _ => {
                tracing::debug!("method {}.{} is missing", self.type_name, query.name);
                Err(ProtectedError::MethodMissing {
                    type_name: self.type_name.to_string(),
                    member: query.name.clone(),
                    arg_types: display_types(&query.shape()),
                })
            }
        }
    }

    /// A property lookup must have found something.
    pub fn property_found(
        &self,
        name: &str,
        resolved: ResolvedMember,
    ) -> Result<PropertyInfo, ProtectedError> {
        match resolved {
            ResolvedMember::Property(property) => Ok(property),
            _ => Err(self.member_missing(name)),
        }
    }

    pub fn non_public_method(&self, method: &MethodInfo) -> Result<(), ProtectedError> {
        if method.visibility.is_public() {
            tracing::debug!("rejecting public method {}", method);
            return Err(ProtectedError::MethodIsPublic {
                type_name: self.type_name.to_string(),
                member: method.name.clone(),
            });
        }
        Ok(())
    }

    /// The getter must not be public. A property whose only accessor is a
    /// public setter is public as a whole and is rejected here too, ahead
    /// of the readability check.
    pub fn non_public_getter(&self, property: &PropertyInfo) -> Result<(), ProtectedError> {
        if property.has_public_getter() {
            return Err(self.public_property(property, Accessor::Getter));
        }
        if property.getter.is_none() && property.has_public_setter() {
            return Err(self.public_property(property, Accessor::Setter));
        }
        Ok(())
    }

    pub fn non_public_setter(&self, property: &PropertyInfo) -> Result<(), ProtectedError> {
        if property.has_public_setter() {
            return Err(self.public_property(property, Accessor::Setter));
        }
        if property.setter.is_none() && property.has_public_getter() {
            return Err(self.public_property(property, Accessor::Getter));
        }
        Ok(())
    }

    pub fn returns_value(&self, method: &MethodInfo) -> Result<(), ProtectedError> {
        if method.returns_void() {
            return Err(ProtectedError::CantSetReturnValueForVoid {
                type_name: self.type_name.to_string(),
                member: method.name.clone(),
            });
        }
        Ok(())
    }

    pub fn readable(&self, property: &PropertyInfo) -> Result<(), ProtectedError> {
        if !property.can_read() {
            return Err(ProtectedError::PropertyNotReadable {
                type_name: self.type_name.to_string(),
                member: property.name.clone(),
            });
        }
        Ok(())
    }

    pub fn writable(&self, property: &PropertyInfo) -> Result<(), ProtectedError> {
        if !property.can_write() {
            return Err(ProtectedError::PropertyNotWritable {
                type_name: self.type_name.to_string(),
                member: property.name.clone(),
            });
        }
        Ok(())
    }

    /// A value of type `value` must fit a slot of type `slot`.
    pub fn compatible(&self, member: &str, slot: &Ty, value: &Ty) -> Result<(), ProtectedError> {
        if !slot.is_assignable_from(value) {
            return Err(ProtectedError::TypeMismatch {
                type_name: self.type_name.to_string(),
                member: member.to_string(),
                expected: slot.to_string(),
                found: value.to_string(),
            });
        }
        Ok(())
    }

    fn member_missing(&self, name: &str) -> ProtectedError {
        tracing::debug!("member {}.{} is missing", self.type_name, name);
        ProtectedError::MemberMissing {
            type_name: self.type_name.to_string(),
            member: name.to_string(),
        }
    }

    fn public_property(&self, property: &PropertyInfo, accessor: Accessor) -> ProtectedError {
        tracing::debug!("rejecting public {} of {}", accessor, property);
        ProtectedError::UnexpectedPublicProperty {
            type_name: self.type_name.to_string(),
            member: property.name.clone(),
            accessor,
        }
    }
}

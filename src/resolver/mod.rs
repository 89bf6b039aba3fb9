//! Member resolution by name.
//!
//! A `MemberResolver` indexes one target type's members once, at
//! construction, and then answers "which member does this name and argument
//! shape refer to?" without scanning the type again. Resolution is pure and
//! deterministic: it reads only the immutable registry.

pub mod args;
pub mod descriptor;
pub mod errors;
pub mod guards;
pub mod messages;

pub use args::{Arg, ArgumentSpec};
pub use descriptor::CallDescriptor;
pub use errors::{Accessor, ProtectedError};
pub use guards::Guards;

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::member::{MethodInfo, PropertyInfo};
use crate::core::ty::Ty;
use crate::core::type_desc::TypeDescriptor;
use crate::core::value::Value;

/// One by-name lookup request.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberQuery {
    pub name: String,
    pub args: Vec<ArgumentSpec>,
    pub exact: bool,
}

impl MemberQuery {
    /// Classify `args` and build a query.
    pub fn new(name: impl Into<String>, args: &[Arg], exact: bool) -> Result<Self, ProtectedError> {
        Ok(MemberQuery {
            name: name.into(),
            args: args::classify_all(args)?,
            exact,
        })
    }

    /// Inferred argument types, in order.
    pub fn shape(&self) -> Vec<Ty> {
        self.args.iter().map(|a| a.ty().clone()).collect()
    }
}

/// Outcome of a lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedMember {
    Method(MethodInfo),
    Property(PropertyInfo),
    NotFound,
}

impl ResolvedMember {
    pub fn is_found(&self) -> bool {
        !matches!(self, ResolvedMember::NotFound)
    }
}

/// Per-type member registry.
#[derive(Debug)]
pub struct MemberResolver {
    target: Arc<TypeDescriptor>,
    /// Instance methods by name, in declaration order.
    methods: HashMap<String, Vec<MethodInfo>>,
    properties: HashMap<String, PropertyInfo>,
}

impl MemberResolver {
    /// Index the members of `target`.
    pub fn new(target: Arc<TypeDescriptor>) -> Self {
        let mut methods: HashMap<String, Vec<MethodInfo>> = HashMap::new();
        for method in target.instance_methods() {
            methods
                .entry(method.name.clone())
                .or_default()
                .push(method.clone());
        }

        let properties = target
            .properties()
            .iter()
            .map(|p| (p.name.clone(), p.clone()))
            .collect();

        tracing::debug!(
            "indexed {} methods and {} properties of {}",
            target.instance_methods().count(),
            target.properties().len(),
            target.name()
        );

        MemberResolver {
            target,
            methods,
            properties,
        }
    }

    pub fn target(&self) -> &TypeDescriptor {
        &self.target
    }

    pub fn type_name(&self) -> &str {
        self.target.name()
    }

    /// Look up a property by name.
    pub fn locate_property(&self, name: &str) -> ResolvedMember {
        match self.properties.get(name) {
            Some(property) => ResolvedMember::Property(property.clone()),
            None => ResolvedMember::NotFound,
        }
    }

    /// Find the single method matching the query's name and argument shape.
    ///
    /// Exact queries require identical parameter types; otherwise each
    /// parameter must be assignable from the inferred argument type. When
    /// several overloads accept the shape, the one every other candidate
    /// could stand in for wins; without such a candidate the call is
    /// `AmbiguousMethod`.
    pub fn locate_method(&self, query: &MemberQuery) -> Result<ResolvedMember, ProtectedError> {
        let shape = query.shape();
        let candidates: Vec<&MethodInfo> = self
            .methods
            .get(&query.name)
            .into_iter()
            .flatten()
            .filter(|m| m.arity() == shape.len())
            .filter(|m| shape_matches(m, &shape, query.exact))
            .collect();

        let candidates = most_specific(candidates);

        match candidates.as_slice() {
            [] => {
                tracing::debug!(
                    "no method {}.{} matches ({})",
                    self.type_name(),
                    query.name,
                    display_types(&shape).join(", ")
                );
                Ok(ResolvedMember::NotFound)
            }
            [method] => {
                tracing::debug!("resolved {}.{} to {}", self.type_name(), query.name, method);
                Ok(ResolvedMember::Method((*method).clone()))
            }
            many => Err(ProtectedError::AmbiguousMethod {
                type_name: self.type_name().to_string(),
                member: query.name.clone(),
                candidates: many.iter().map(|m| m.signature()).collect(),
            }),
        }
    }

    /// Pick the overload an intercepted call with these runtime values lands on.
    ///
    /// Prefers a candidate whose parameter types equal the runtime types;
    /// otherwise the only candidate every value fits.
    pub fn method_for_values(&self, name: &str, values: &[Value]) -> Option<&MethodInfo> {
        let candidates: Vec<&MethodInfo> = self
            .methods
            .get(name)
            .into_iter()
            .flatten()
            .filter(|m| m.arity() == values.len())
            .filter(|m| m.param_types().zip(values).all(|(ty, v)| v.fits(ty)))
            .collect();

        let identical = candidates.iter().find(|m| {
            m.param_types()
                .zip(values)
                .all(|(ty, v)| v.runtime_ty().as_ref() == Some(ty.without_ref()))
        });

        match (identical, candidates.as_slice()) {
            (Some(m), _) => Some(*m),
            (None, [only]) => Some(*only),
            _ => None,
        }
    }
}

/// Narrow `candidates` to the single most specific one, if it exists.
fn most_specific(candidates: Vec<&MethodInfo>) -> Vec<&MethodInfo> {
    if candidates.len() < 2 {
        return candidates;
    }

    let best = candidates.iter().position(|m| {
        candidates
            .iter()
            .all(|other| std::ptr::eq(*m, *other) || at_least_as_specific(m, other))
    });

    match best {
        Some(index) => vec![candidates[index]],
        None => candidates,
    }
}

/// Every parameter of `other` accepts the matching parameter of `method`.
fn at_least_as_specific(method: &MethodInfo, other: &MethodInfo) -> bool {
    method
        .param_types()
        .zip(other.param_types())
        .all(|(mine, theirs)| theirs.is_assignable_from(mine))
}

fn shape_matches(method: &MethodInfo, shape: &[Ty], exact: bool) -> bool {
    method.param_types().zip(shape).all(|(param, arg)| {
        if exact {
            param == arg
        } else {
            param.is_assignable_from(arg)
        }
    })
}

pub(crate) fn display_types(types: &[Ty]) -> Vec<String> {
    types.iter().map(|t| t.to_string()).collect()
}

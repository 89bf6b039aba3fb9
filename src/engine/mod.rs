//! The mock engine.
//!
//! A `Mock` stands in for one target type. It stores configured call
//! patterns, records every intercepted call, and answers count assertions.
//! The engine knows nothing about names: it only ever sees fully resolved
//! `CallDescriptor`s, whether they came from the by-name facade or were
//! built directly from a known member.

pub mod errors;
pub mod invocation;
pub mod setup;
pub mod times;

pub use errors::MockError;
pub use invocation::{Invocation, InvokedMember};
pub use setup::{ActionSetup, Response, ResultSetup, SequenceSetup, Setup};
pub use times::Times;

use std::sync::Arc;

use crate::core::member::{MethodInfo, PropertyInfo};
use crate::core::ty::Ty;
use crate::core::type_desc::{Describe, TypeDescriptor};
use crate::core::value::Value;
use crate::resolver::{Accessor, CallDescriptor, MemberResolver, ResolvedMember};
use crate::util::config::{MockBehavior, MockConfig, SequenceExhausted};

#[derive(Debug)]
pub struct Mock {
    resolver: Arc<MemberResolver>,
    config: MockConfig,
    setups: Vec<Setup>,
    invocations: Vec<Invocation>,
}

impl Mock {
    pub fn new(descriptor: TypeDescriptor) -> Self {
        Mock::with_config(descriptor, MockConfig::default())
    }

    pub fn with_config(descriptor: TypeDescriptor, config: MockConfig) -> Self {
        let resolver = MemberResolver::new(Arc::new(descriptor));
        Mock::from_resolver(Arc::new(resolver), config)
    }

    /// Mock a type that describes itself.
    pub fn of<T: Describe>() -> Self {
        Mock::new(T::describe())
    }

    /// Build a mock over an existing registry. Mocks of the same type can
    /// share one resolver.
    pub fn from_resolver(resolver: Arc<MemberResolver>, config: MockConfig) -> Self {
        Mock {
            resolver,
            config,
            setups: Vec::new(),
            invocations: Vec::new(),
        }
    }

    pub fn resolver(&self) -> &MemberResolver {
        &self.resolver
    }

    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    pub fn setups(&self) -> &[Setup] {
        &self.setups
    }

    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    pub fn clear_invocations(&mut self) {
        self.invocations.clear();
    }

    /// Drop all setups and recorded invocations.
    pub fn reset(&mut self) {
        self.setups.clear();
        self.invocations.clear();
    }

    /// Register a call pattern. Later setups take precedence over earlier
    /// ones for calls both match.
    pub fn setup(&mut self, call: CallDescriptor) -> &mut Setup {
        tracing::debug!("setup {}", call);
        let index = self.setups.len();
        self.setups.push(Setup::single(call));
        &mut self.setups[index]
    }

    /// Register a sequence, or continue the existing sequence for an
    /// identical call pattern so repeated setups append steps.
    pub fn setup_sequence(&mut self, call: CallDescriptor) -> &mut Setup {
        let existing = self
            .setups
            .iter()
            .rposition(|s| s.is_sequence() && s.call().same_pattern(&call));

        let index = match existing {
            Some(index) => {
                tracing::debug!("continuing sequence {}", call);
                index
            }
            None => {
                tracing::debug!("setup sequence {}", call);
                self.setups.push(Setup::sequence(call));
                self.setups.len() - 1
            }
        };
        &mut self.setups[index]
    }

    /// Assert how many recorded invocations match `call`.
    pub fn verify(&self, call: &CallDescriptor, times: Times) -> Result<(), MockError> {
        let actual = self.invocations.iter().filter(|i| i.matches(call)).count();

        if times.contains(actual) {
            tracing::debug!("verified {} ({} calls)", call, actual);
            return Ok(());
        }

        tracing::debug!("verification of {} failed: {} calls, expected {}", call, actual, times);
        Err(MockError::VerificationFailed {
            call: call.to_string(),
            expected: times,
            actual,
            performed: self.invocations.iter().map(|i| i.to_string()).collect(),
        })
    }

    /// Simulate the target type calling one of its own methods by name.
    ///
    /// The overload is picked from the runtime types of `args`. Returns
    /// `None` for void methods.
    pub fn call(&mut self, name: &str, args: Vec<Value>) -> Result<Option<Value>, MockError> {
        let method = self
            .resolver
            .method_for_values(name, &args)
            .cloned()
            .ok_or_else(|| MockError::UnknownMember {
                type_name: self.resolver.type_name().to_string(),
                member: name.to_string(),
                arg_types: args
                    .iter()
                    .map(|v| v.runtime_ty().map_or_else(|| "null".to_string(), |t| t.to_string()))
                    .collect(),
            })?;
        self.call_method(&method, args)
    }

    /// Simulate a call to a specific method.
    pub fn call_method(
        &mut self,
        method: &MethodInfo,
        args: Vec<Value>,
    ) -> Result<Option<Value>, MockError> {
        let result_type = method.return_type.clone();
        self.dispatch(Invocation::method(method.clone(), args), &result_type)
    }

    /// Simulate the target type reading one of its own properties.
    pub fn get(&mut self, name: &str) -> Result<Value, MockError> {
        let property = self.property_with(name, Accessor::Getter)?;
        let ty = property.ty.clone();
        let value = self.dispatch(Invocation::getter(property), &ty)?;
        Ok(value.unwrap_or(Value::Null))
    }

    /// Simulate the target type writing one of its own properties.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), MockError> {
        let property = self.property_with(name, Accessor::Setter)?;
        self.dispatch(Invocation::setter(property, value), &Ty::void())?;
        Ok(())
    }

    fn property_with(&self, name: &str, accessor: Accessor) -> Result<PropertyInfo, MockError> {
        let property = match self.resolver.locate_property(name) {
            ResolvedMember::Property(property) => property,
            _ => {
                return Err(MockError::UnknownMember {
                    type_name: self.resolver.type_name().to_string(),
                    member: name.to_string(),
                    arg_types: Vec::new(),
                })
            }
        };

        let present = match accessor {
            Accessor::Getter => property.can_read(),
            Accessor::Setter => property.can_write(),
        };
        if !present {
            return Err(MockError::MissingAccessor {
                type_name: self.resolver.type_name().to_string(),
                member: name.to_string(),
                accessor,
            });
        }
        Ok(property)
    }

    fn dispatch(
        &mut self,
        invocation: Invocation,
        result_type: &Ty,
    ) -> Result<Option<Value>, MockError> {
        let label = invocation.to_string();
        tracing::debug!("intercepted {}", label);
        self.invocations.push(invocation.clone());

        let matched = self
            .setups
            .iter_mut()
            .rev()
            .find(|s| invocation.matches(s.call()));

        let response = match matched {
            Some(setup) => match setup.next_response(&invocation.args) {
                Some(response) => response,
                None if self.config.sequence_exhausted == SequenceExhausted::Error => {
                    return Err(MockError::SequenceExhausted { call: label });
                }
                None => Response::Default,
            },
            None if self.config.behavior == MockBehavior::Strict => {
                return Err(MockError::NoSetup { call: label });
            }
            None => Response::Default,
        };

        match response {
            Response::Default => Ok(result_type.default_value()),
            Response::Return(_) if result_type.is_void() => Ok(None),
            Response::Return(value) => Ok(Some(value)),
            Response::Throw(message) => Err(MockError::Thrown {
                call: label,
                message,
            }),
        }
    }
}

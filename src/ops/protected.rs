//! Setup and verification of non-public members by name.
//!
//! Every operation runs the same pipeline: reject a blank name, classify
//! the arguments, locate the member, run the guards for the operation, and
//! build a `CallDescriptor`. Only a fully built descriptor ever reaches the
//! engine; on any failure the mock is left untouched.
//!
//! Operations that can target a property or a method (`setup_result`,
//! `setup_sequence_result`, `verify_result`) try the property first. When
//! a property is found the arguments are not inspected.

use crate::core::member::{MethodInfo, PropertyInfo};
use crate::core::ty::Typed;
use crate::engine::{ActionSetup, Mock, ResultSetup, SequenceSetup, Times};
use crate::resolver::guards::{ensure_name, Guards};
use crate::resolver::{
    args, Arg, ArgumentSpec, CallDescriptor, MemberQuery, ProtectedError, ResolvedMember,
};

/// By-name access to the non-public members of a mock's type.
///
/// Obtained from [`Mock::protected`]. Each operation consumes the facade;
/// setups return a handle borrowing the mock for further configuration.
pub struct Protected<'a> {
    mock: &'a mut Mock,
    exact: bool,
}

impl Mock {
    /// Configure or verify non-public members by name.
    pub fn protected(&mut self) -> Protected<'_> {
        let exact = self.config().exact_parameter_match;
        Protected { mock: self, exact }
    }
}

impl<'a> Protected<'a> {
    /// Require parameter types to equal the argument types, instead of
    /// accepting any assignable argument.
    pub fn exact(mut self) -> Self {
        self.exact = true;
        self
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }

    /// Configure a method call, whatever it returns.
    pub fn setup(self, name: &str, args: &[Arg]) -> Result<ActionSetup<'a>, ProtectedError> {
        ensure_name(name)?;
        let (method, specs) = self.method(name, args)?;
        let call = CallDescriptor::invocation(&method, &specs);

        Ok(ActionSetup::new(self.mock.setup(call)))
    }

    /// Configure a property read or a value-returning method call.
    pub fn setup_result<R: Typed>(
        self,
        name: &str,
        args: &[Arg],
    ) -> Result<ResultSetup<'a, R>, ProtectedError> {
        ensure_name(name)?;
        let call = self.result_call::<R>(name, args)?;

        Ok(ResultSetup::new(self.mock.setup(call)))
    }

    /// Configure a property getter.
    pub fn setup_get<P: Typed>(self, name: &str) -> Result<ResultSetup<'a, P>, ProtectedError> {
        ensure_name(name)?;
        let call = self.getter_call::<P>(name)?;

        Ok(ResultSetup::new(self.mock.setup(call)))
    }

    /// Configure a property setter receiving `value`, which may be a
    /// literal or a matcher.
    pub fn setup_set<P: Typed>(
        self,
        name: &str,
        value: impl Into<Arg>,
    ) -> Result<ActionSetup<'a>, ProtectedError> {
        ensure_name(name)?;
        let call = self.setter_call::<P>(name, Some(&value.into()))?;

        Ok(ActionSetup::new(self.mock.setup(call)))
    }

    /// Configure a property setter receiving any value.
    pub fn setup_set_any<P: Typed>(self, name: &str) -> Result<ActionSetup<'a>, ProtectedError> {
        ensure_name(name)?;
        let call = self.setter_call::<P>(name, None)?;

        Ok(ActionSetup::new(self.mock.setup(call)))
    }

    /// Script successive calls of a method. Repeating this for the same
    /// call appends steps to the existing script.
    pub fn setup_sequence(
        self,
        name: &str,
        args: &[Arg],
    ) -> Result<SequenceSetup<'a, ()>, ProtectedError> {
        ensure_name(name)?;
        let (method, specs) = self.method(name, args)?;
        let call = CallDescriptor::invocation(&method, &specs);

        Ok(SequenceSetup::new(self.mock.setup_sequence(call)))
    }

    /// Script successive results of a property read or method call.
    pub fn setup_sequence_result<R: Typed>(
        self,
        name: &str,
        args: &[Arg],
    ) -> Result<SequenceSetup<'a, R>, ProtectedError> {
        ensure_name(name)?;
        let call = self.result_call::<R>(name, args)?;

        Ok(SequenceSetup::new(self.mock.setup_sequence(call)))
    }

    /// Assert how often a method was called with matching arguments.
    pub fn verify(self, name: &str, times: Times, args: &[Arg]) -> Result<(), ProtectedError> {
        ensure_name(name)?;
        let (method, specs) = self.method(name, args)?;
        let call = CallDescriptor::invocation(&method, &specs);

        Ok(self.mock.verify(&call, times)?)
    }

    /// Assert how often a property was read or a value-returning method
    /// was called.
    pub fn verify_result<R: Typed>(
        self,
        name: &str,
        times: Times,
        args: &[Arg],
    ) -> Result<(), ProtectedError> {
        ensure_name(name)?;
        let call = self.result_call::<R>(name, args)?;

        Ok(self.mock.verify(&call, times)?)
    }

    /// Assert how often a property getter was called.
    pub fn verify_get<P: Typed>(self, name: &str, times: Times) -> Result<(), ProtectedError> {
        ensure_name(name)?;
        let call = self.getter_call::<P>(name)?;

        Ok(self.mock.verify(&call, times)?)
    }

    /// Assert how often a property setter received a matching value.
    pub fn verify_set<P: Typed>(
        self,
        name: &str,
        times: Times,
        value: impl Into<Arg>,
    ) -> Result<(), ProtectedError> {
        ensure_name(name)?;
        let call = self.setter_call::<P>(name, Some(&value.into()))?;

        Ok(self.mock.verify(&call, times)?)
    }

    /// Assert how often a property setter was called with any value.
    pub fn verify_set_any<P: Typed>(self, name: &str, times: Times) -> Result<(), ProtectedError> {
        ensure_name(name)?;
        let call = self.setter_call::<P>(name, None)?;

        Ok(self.mock.verify(&call, times)?)
    }

    fn guards(&self) -> Guards<'_> {
        Guards::new(self.mock.resolver().type_name())
    }

    /// Classify `args` and resolve the non-public method they select.
    fn method(
        &self,
        name: &str,
        args: &[Arg],
    ) -> Result<(MethodInfo, Vec<ArgumentSpec>), ProtectedError> {
        let query = MemberQuery::new(name, args, self.exact)?;
        let guards = self.guards();

        let resolved = self.mock.resolver().locate_method(&query)?;
        let method = guards.method_found(&query, resolved)?;
        guards.non_public_method(&method)?;

        tracing::debug!("protected call resolved to {}", method);
        Ok((method, query.args))
    }

    fn property(&self, name: &str) -> Result<PropertyInfo, ProtectedError> {
        let resolved = self.mock.resolver().locate_property(name);
        self.guards().property_found(name, resolved)
    }

    fn result_call<R: Typed>(
        &self,
        name: &str,
        args: &[Arg],
    ) -> Result<CallDescriptor, ProtectedError> {
        let guards = self.guards();

        if let ResolvedMember::Property(property) = self.mock.resolver().locate_property(name) {
            guards.non_public_getter(&property)?;
            guards.readable(&property)?;
            guards.compatible(name, &property.ty, &R::ty())?;
            return Ok(CallDescriptor::property_read(&property));
        }

        let (method, specs) = self.method(name, args)?;
        guards.returns_value(&method)?;
        guards.compatible(name, &method.return_type, &R::ty())?;
        Ok(CallDescriptor::invocation(&method, &specs))
    }

    fn getter_call<P: Typed>(&self, name: &str) -> Result<CallDescriptor, ProtectedError> {
        let guards = self.guards();
        let property = self.property(name)?;

        guards.non_public_getter(&property)?;
        guards.readable(&property)?;
        guards.compatible(name, &property.ty, &P::ty())?;
        Ok(CallDescriptor::property_read(&property))
    }

    fn setter_call<P: Typed>(
        &self,
        name: &str,
        value: Option<&Arg>,
    ) -> Result<CallDescriptor, ProtectedError> {
        let guards = self.guards();
        let property = self.property(name)?;

        guards.non_public_setter(&property)?;
        guards.writable(&property)?;
        guards.compatible(name, &property.ty, &P::ty())?;

        let value = value.map(|v| args::classify(0, v)).transpose()?;
        if let Some(spec) = &value {
            guards.compatible(name, &property.ty, spec.ty())?;
        }
        Ok(CallDescriptor::property_write(&property, value.as_ref()))
    }
}

//! Configured responses and the fluent handles that edit them.

use std::fmt;
use std::marker::PhantomData;

use crate::core::ty::Typed;
use crate::core::value::Value;
use crate::resolver::CallDescriptor;

/// Side effect run with the actual argument values of a matching call.
pub type Callback = Box<dyn FnMut(&[Value]) + Send>;

/// What a matching call produces.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// The default value of the result type.
    Default,
    Return(Value),
    Throw(String),
}

#[derive(Debug)]
enum Script {
    Single(Response),
    Sequence { steps: Vec<Response>, position: usize },
}

/// One configured call pattern.
pub struct Setup {
    call: CallDescriptor,
    script: Script,
    callback: Option<Callback>,
}

impl Setup {
    pub(crate) fn single(call: CallDescriptor) -> Self {
        Setup {
            call,
            script: Script::Single(Response::Default),
            callback: None,
        }
    }

    pub(crate) fn sequence(call: CallDescriptor) -> Self {
        Setup {
            call,
            script: Script::Sequence {
                steps: Vec::new(),
                position: 0,
            },
            callback: None,
        }
    }

    pub fn call(&self) -> &CallDescriptor {
        &self.call
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self.script, Script::Sequence { .. })
    }

    /// Steps not yet consumed. Always zero for a single response.
    pub fn remaining(&self) -> usize {
        match &self.script {
            Script::Single(_) => 0,
            Script::Sequence { steps, position } => steps.len().saturating_sub(*position),
        }
    }

    fn respond(&mut self, response: Response) {
        match &mut self.script {
            Script::Single(current) => *current = response,
            Script::Sequence { steps, .. } => steps.push(response),
        }
    }

    /// Run the callback and produce the next response. `None` means the
    /// sequence has no steps left.
    pub(crate) fn next_response(&mut self, args: &[Value]) -> Option<Response> {
        if let Some(callback) = self.callback.as_mut() {
            callback(args);
        }

        match &mut self.script {
            Script::Single(response) => Some(response.clone()),
            Script::Sequence { steps, position } => {
                let step = steps.get(*position).cloned()?;
                *position += 1;
                Some(step)
            }
        }
    }
}

impl fmt::Debug for Setup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setup")
            .field("call", &self.call.to_string())
            .field("script", &self.script)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Handle for a setup whose member yields nothing.
pub struct ActionSetup<'a> {
    setup: &'a mut Setup,
}

impl<'a> ActionSetup<'a> {
    pub(crate) fn new(setup: &'a mut Setup) -> Self {
        ActionSetup { setup }
    }

    pub fn descriptor(&self) -> &CallDescriptor {
        self.setup.call()
    }

    pub fn callback<F>(self, callback: F) -> Self
    where
        F: FnMut(&[Value]) + Send + 'static,
    {
        self.setup.callback = Some(Box::new(callback));
        self
    }

    /// Make matching calls fail with `message`.
    pub fn throws(self, message: impl Into<String>) -> Self {
        self.setup.respond(Response::Throw(message.into()));
        self
    }
}

/// Handle for a setup whose member yields an `R`.
pub struct ResultSetup<'a, R> {
    setup: &'a mut Setup,
    _result: PhantomData<fn() -> R>,
}

impl<'a, R: Typed> ResultSetup<'a, R> {
    pub(crate) fn new(setup: &'a mut Setup) -> Self {
        ResultSetup {
            setup,
            _result: PhantomData,
        }
    }

    pub fn descriptor(&self) -> &CallDescriptor {
        self.setup.call()
    }

    pub fn returns(self, value: R) -> Self {
        self.setup.respond(Response::Return(value.into_value()));
        self
    }

    /// Return a value not expressible as `R`, such as an object instance
    /// or null.
    pub fn returns_value(self, value: Value) -> Self {
        self.setup.respond(Response::Return(value));
        self
    }

    pub fn throws(self, message: impl Into<String>) -> Self {
        self.setup.respond(Response::Throw(message.into()));
        self
    }

    pub fn callback<F>(self, callback: F) -> Self
    where
        F: FnMut(&[Value]) + Send + 'static,
    {
        self.setup.callback = Some(Box::new(callback));
        self
    }
}

/// Handle appending steps to a sequence setup.
///
/// Each matching call consumes one step in the order they were added.
pub struct SequenceSetup<'a, R> {
    setup: &'a mut Setup,
    _result: PhantomData<fn() -> R>,
}

impl<'a, R: Typed> SequenceSetup<'a, R> {
    pub(crate) fn new(setup: &'a mut Setup) -> Self {
        SequenceSetup {
            setup,
            _result: PhantomData,
        }
    }

    pub fn descriptor(&self) -> &CallDescriptor {
        self.setup.call()
    }

    pub fn returns(self, value: R) -> Self {
        self.setup.respond(Response::Return(value.into_value()));
        self
    }

    pub fn returns_value(self, value: Value) -> Self {
        self.setup.respond(Response::Return(value));
        self
    }

    pub fn throws(self, message: impl Into<String>) -> Self {
        self.setup.respond(Response::Throw(message.into()));
        self
    }

    /// A step that completes without a configured value.
    pub fn pass(self) -> Self {
        self.setup.respond(Response::Default);
        self
    }
}

impl fmt::Debug for ActionSetup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ActionSetup").field(&self.setup).finish()
    }
}

impl<R> fmt::Debug for ResultSetup<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResultSetup").field(&self.setup).finish()
    }
}

impl<R> fmt::Debug for SequenceSetup<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SequenceSetup").field(&self.setup).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::core::member::{PropertyInfo, Visibility};
    use crate::core::ty::Ty;

    fn read_call() -> CallDescriptor {
        CallDescriptor::property_read(&PropertyInfo {
            name: "Count".to_string(),
            ty: Ty::int(),
            getter: Some(Visibility::Protected),
            setter: None,
            declaring_type: "Widget".to_string(),
        })
    }

    #[test]
    fn test_single_response_repeats() {
        let mut setup = Setup::single(read_call());
        let _ = ResultSetup::<i32>::new(&mut setup).returns(3);

        assert_eq!(setup.next_response(&[]), Some(Response::Return(Value::Int(3))));
        assert_eq!(setup.next_response(&[]), Some(Response::Return(Value::Int(3))));
    }

    #[test]
    fn test_sequence_steps_in_order() {
        let mut setup = Setup::sequence(read_call());
        let _ = SequenceSetup::<i32>::new(&mut setup)
            .returns(1)
            .throws("boom")
            .pass();
        assert_eq!(setup.remaining(), 3);

        assert_eq!(setup.next_response(&[]), Some(Response::Return(Value::Int(1))));
        assert_eq!(setup.next_response(&[]), Some(Response::Throw("boom".into())));
        assert_eq!(setup.next_response(&[]), Some(Response::Default));
        assert_eq!(setup.next_response(&[]), None);
    }

    #[test]
    fn test_callback_sees_arguments() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);

        let mut setup = Setup::single(read_call());
        let _ = ActionSetup::new(&mut setup).callback(move |args| {
            counter.fetch_add(args.len(), Ordering::SeqCst);
        });

        setup.next_response(&[Value::Int(1), Value::Int(2)]);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_handles_debug_as_their_setup() {
        let mut setup = Setup::single(read_call());
        let rendered = format!("{:?}", ResultSetup::<i32>::new(&mut setup).returns(3));
        assert!(rendered.starts_with("ResultSetup(Setup {"));
        assert!(rendered.contains("Widget.Count"));

        let mut setup = Setup::sequence(read_call());
        let rendered = format!("{:?}", SequenceSetup::<i32>::new(&mut setup).pass());
        assert!(rendered.contains("Sequence"));

        let mut setup = Setup::single(read_call());
        assert!(format!("{:?}", ActionSetup::new(&mut setup)).starts_with("ActionSetup("));
    }
}

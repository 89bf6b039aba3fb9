//! Mock engine errors.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::engine::times::Times;
use crate::resolver::Accessor;
use crate::util::diagnostic::Diagnostic;

/// Failure raised by the engine while verifying or dispatching a call.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum MockError {
    #[error("expected invocation on the mock {expected}, but was performed {actual} times: {call}")]
    #[diagnostic(code(protected_mock::engine::verification_failed))]
    VerificationFailed {
        call: String,
        expected: Times,
        actual: usize,
        performed: Vec<String>,
    },

    #[error("{call} has no matching setup on a strict mock")]
    #[diagnostic(
        code(protected_mock::engine::no_setup),
        help("configure the member before exercising the mock, or use loose behavior")
    )]
    NoSetup { call: String },

    #[error("{call} threw: {message}")]
    #[diagnostic(code(protected_mock::engine::thrown))]
    Thrown { call: String, message: String },

    #[error("sequence configured for {call} has no steps left")]
    #[diagnostic(code(protected_mock::engine::sequence_exhausted))]
    SequenceExhausted { call: String },

    #[error("{type_name} has no member {member} accepting ({})", .arg_types.join(", "))]
    #[diagnostic(code(protected_mock::engine::unknown_member))]
    UnknownMember {
        type_name: String,
        member: String,
        arg_types: Vec<String>,
    },

    #[error("property {type_name}.{member} has no {accessor}")]
    #[diagnostic(code(protected_mock::engine::missing_accessor))]
    MissingAccessor {
        type_name: String,
        member: String,
        accessor: Accessor,
    },
}

impl MockError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());

        match self {
            MockError::VerificationFailed { performed, .. } => {
                if performed.is_empty() {
                    return diag.with_context("no invocations were performed");
                }
                performed.iter().fold(diag, |diag, call| {
                    diag.with_context(format!("performed: {}", call))
                })
            }
            MockError::NoSetup { .. } => {
                diag.with_suggestion("help: Configure the member before exercising the mock")
            }
            MockError::SequenceExhausted { .. } => {
                diag.with_suggestion("help: Add more steps to the sequence")
            }
            MockError::Thrown { .. }
            | MockError::UnknownMember { .. }
            | MockError::MissingAccessor { .. } => diag,
        }
    }
}

//! Resolution error types and diagnostics.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::engine::MockError;
use crate::resolver::messages::{self, suggestions};
use crate::util::diagnostic::Diagnostic;

/// Which property accessor a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    Getter,
    Setter,
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Getter => write!(f, "getter"),
            Accessor::Setter => write!(f, "setter"),
        }
    }
}

/// Error while configuring or verifying a member by name.
///
/// Every variant is an invalid-input error: nothing was forwarded to the
/// mock engine when one of them is returned, except for `Engine`, which
/// carries the engine's own failure (e.g. a count mismatch).
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ProtectedError {
    #[error("{}", messages::empty_name())]
    #[diagnostic(code(protected_mock::resolve::empty_name))]
    EmptyName,

    #[error("{}", messages::null_argument(.index))]
    #[diagnostic(code(protected_mock::resolve::null_argument))]
    NullArgumentMisuse { index: usize },

    #[error("{}", messages::unsupported_member(.index, .member))]
    #[diagnostic(code(protected_mock::resolve::unsupported_matcher_member))]
    UnsupportedMatcherMember { index: usize, member: String },

    #[error("{}", messages::unreducible_argument(.index, .expr))]
    #[diagnostic(code(protected_mock::resolve::unreducible_argument))]
    UnreducibleArgument { index: usize, expr: String },

    #[error("{}", messages::member_missing(.type_name, .member))]
    #[diagnostic(code(protected_mock::resolve::member_missing))]
    MemberMissing { type_name: String, member: String },

    #[error("{}", messages::method_missing(.type_name, .member, .arg_types))]
    #[diagnostic(code(protected_mock::resolve::method_missing))]
    MethodMissing {
        type_name: String,
        member: String,
        arg_types: Vec<String>,
    },

    #[error("{}", messages::ambiguous_method(.type_name, .member, .candidates))]
    #[diagnostic(code(protected_mock::resolve::ambiguous_method))]
    AmbiguousMethod {
        type_name: String,
        member: String,
        candidates: Vec<String>,
    },

    #[error("{}", messages::method_is_public(.type_name, .member))]
    #[diagnostic(code(protected_mock::resolve::method_is_public))]
    MethodIsPublic { type_name: String, member: String },

    #[error("{}", messages::unexpected_public_property(.type_name, .member, .accessor))]
    #[diagnostic(code(protected_mock::resolve::unexpected_public_property))]
    UnexpectedPublicProperty {
        type_name: String,
        member: String,
        accessor: Accessor,
    },

    #[error("{}", messages::property_not_readable(.type_name, .member))]
    #[diagnostic(code(protected_mock::resolve::property_not_readable))]
    PropertyNotReadable { type_name: String, member: String },

    #[error("{}", messages::property_not_writable(.type_name, .member))]
    #[diagnostic(code(protected_mock::resolve::property_not_writable))]
    PropertyNotWritable { type_name: String, member: String },

    #[error("{}", messages::cant_set_return_value_for_void(.type_name, .member))]
    #[diagnostic(code(protected_mock::resolve::void_return))]
    CantSetReturnValueForVoid { type_name: String, member: String },

    #[error("{}", messages::type_mismatch(.type_name, .member, .expected, .found))]
    #[diagnostic(code(protected_mock::resolve::type_mismatch))]
    TypeMismatch {
        type_name: String,
        member: String,
        expected: String,
        found: String,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Engine(#[from] MockError),
}

impl ProtectedError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());

        match self {
            ProtectedError::EmptyName => diag,

            ProtectedError::NullArgumentMisuse { .. } => {
                diag.with_suggestion(suggestions::USE_NULL_MATCHER)
            }

            ProtectedError::UnsupportedMatcherMember { .. }
            | ProtectedError::UnreducibleArgument { .. } => {
                diag.with_suggestion(suggestions::USE_CONSTANT)
            }

            ProtectedError::MemberMissing { .. } => {
                diag.with_suggestion(suggestions::CHECK_MEMBER_NAME)
            }

            ProtectedError::MethodMissing { arg_types, .. } => {
                let mut diag = diag;
                for (i, ty) in arg_types.iter().enumerate() {
                    diag = diag.with_context(format!("argument {} inferred as `{}`", i, ty));
                }
                diag.with_suggestion(suggestions::CHECK_MEMBER_NAME)
                    .with_suggestion(suggestions::CHECK_ARGUMENT_TYPES)
            }

            ProtectedError::AmbiguousMethod { candidates, .. } => {
                let mut diag = diag;
                for candidate in candidates {
                    diag = diag.with_context(format!("candidate: {}", candidate));
                }
                diag.with_suggestion(suggestions::USE_EXACT_MATCH)
            }

            ProtectedError::MethodIsPublic { .. }
            | ProtectedError::UnexpectedPublicProperty { .. } => {
                diag.with_suggestion(suggestions::USE_TYPED_API)
            }

            ProtectedError::PropertyNotReadable { .. }
            | ProtectedError::PropertyNotWritable { .. }
            | ProtectedError::TypeMismatch { .. } => diag,

            ProtectedError::CantSetReturnValueForVoid { .. } => {
                diag.with_suggestion(suggestions::USE_VOID_SETUP)
            }

            ProtectedError::Engine(err) => err.to_diagnostic(),
        }
    }
}

//! Message catalog for resolution failures.
//!
//! Every user-facing sentence lives here so errors and diagnostics stay
//! consistent.

use std::fmt::Display;

/// Suggestions attached to diagnostics.
pub mod suggestions {
    pub const USE_NULL_MATCHER: &str =
        "help: Pass `It::is_null::<T>()` or `It::is_any::<T>()` instead of a null literal";

    pub const USE_TYPED_API: &str =
        "help: Public members can be configured through the strongly-typed API";

    pub const CHECK_MEMBER_NAME: &str =
        "help: Check the member name and that it is declared on the mocked type";

    pub const CHECK_ARGUMENT_TYPES: &str =
        "help: Argument types must match the declared parameter types (see `exact()`)";

    pub const USE_EXACT_MATCH: &str =
        "help: Use `exact()` to select the overload whose parameter types match exactly";

    pub const USE_VOID_SETUP: &str =
        "help: Use `setup` rather than `setup_result` for methods that return nothing";

    pub const USE_CONSTANT: &str =
        "help: Arguments must be constants, matchers, or expressions that fold to a constant";
}

pub fn empty_name() -> String {
    "member name must not be empty or blank".to_string()
}

pub fn null_argument(index: impl Display) -> String {
    format!(
        "argument {} is a null literal; use a null or any matcher instead, \
         as a literal null prevents proper method lookup",
        index
    )
}

pub fn unsupported_member(index: impl Display, member: impl Display) -> String {
    format!(
        "argument {}: matcher member `{}` is not supported; \
         only matcher calls, fields and properties can stand in for arguments",
        index, member
    )
}

pub fn unreducible_argument(index: impl Display, expr: impl Display) -> String {
    format!(
        "argument {}: expression `{}` cannot be reduced to a constant",
        index, expr
    )
}

pub fn member_missing(type_name: impl Display, member: impl Display) -> String {
    format!("member {}.{} does not exist", type_name, member)
}

pub fn method_missing(
    type_name: impl Display,
    member: impl Display,
    arg_types: &[String],
) -> String {
    format!(
        "method {}.{} accepting ({}) does not exist",
        type_name,
        member,
        arg_types.join(", ")
    )
}

pub fn ambiguous_method(
    type_name: impl Display,
    member: impl Display,
    candidates: &[String],
) -> String {
    format!(
        "call to {}.{} is ambiguous between: {}",
        type_name,
        member,
        candidates.join(", ")
    )
}

pub fn method_is_public(type_name: impl Display, member: impl Display) -> String {
    format!(
        "method {}.{} is public; configure it through the strongly-typed API instead",
        type_name, member
    )
}

pub fn unexpected_public_property(
    type_name: impl Display,
    member: impl Display,
    accessor: impl Display,
) -> String {
    format!(
        "property {}.{} has a public {}; configure it through the strongly-typed API instead",
        type_name, member, accessor
    )
}

pub fn property_not_readable(type_name: impl Display, member: impl Display) -> String {
    format!("property {}.{} is write-only", type_name, member)
}

pub fn property_not_writable(type_name: impl Display, member: impl Display) -> String {
    format!("property {}.{} is read-only", type_name, member)
}

pub fn cant_set_return_value_for_void(type_name: impl Display, member: impl Display) -> String {
    format!(
        "can't set a return value for void method {}.{}",
        type_name, member
    )
}

pub fn type_mismatch(
    type_name: impl Display,
    member: impl Display,
    expected: impl Display,
    found: impl Display,
) -> String {
    format!(
        "{}.{}: type `{}` is not compatible with `{}`",
        type_name, member, found, expected
    )
}

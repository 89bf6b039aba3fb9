//! Argument matchers.
//!
//! A matcher is a placeholder argument: "any int", "any by-ref string",
//! "a string matching this regex". Each matcher carries the *shape* it was
//! authored in (a call, a field read, a property read) because the resolver
//! infers the argument type from that shape. The by-reference wildcard is a
//! field shape with `by_ref` set by its constructor.

pub mod expr;

pub use expr::{BinaryOp, Expr, UnaryOp};

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::core::ty::{Ty, Typed};
use crate::core::value::Value;

type PredicateFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// What a matcher accepts.
#[derive(Clone)]
pub enum Match {
    /// Any value assignable to the type (including null for references).
    Any(Ty),
    /// Any value passed to a by-reference parameter of the type.
    AnyRef(Ty),
    IsNull(Ty),
    NotNull(Ty),
    Predicate {
        ty: Ty,
        description: String,
        predicate: PredicateFn,
    },
    Regex(Regex),
    /// Inclusive numeric range.
    Range { ty: Ty, low: Value, high: Value },
}

impl Match {
    /// The type of value this matcher stands in for.
    pub fn ty(&self) -> Ty {
        match self {
            Match::Any(ty)
            | Match::AnyRef(ty)
            | Match::IsNull(ty)
            | Match::NotNull(ty)
            | Match::Predicate { ty, .. }
            | Match::Range { ty, .. } => ty.clone(),
            Match::Regex(_) => Ty::string(),
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Match::Any(ty) => value.fits(ty),
            Match::AnyRef(_) => true,
            Match::IsNull(_) => value.is_null(),
            Match::NotNull(ty) => !value.is_null() && value.fits(ty),
            Match::Predicate { ty, predicate, .. } => value.fits(ty) && predicate(value),
            Match::Regex(re) => value.as_str().is_some_and(|s| re.is_match(s)),
            Match::Range { low, high, .. } => match (value.as_f64(), low.as_f64(), high.as_f64()) {
                (Some(v), Some(lo), Some(hi)) => lo <= v && v <= hi,
                _ => false,
            },
        }
    }
}

impl PartialEq for Match {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Match::Any(a), Match::Any(b))
            | (Match::AnyRef(a), Match::AnyRef(b))
            | (Match::IsNull(a), Match::IsNull(b))
            | (Match::NotNull(a), Match::NotNull(b)) => a == b,
            (Match::Predicate { predicate: a, .. }, Match::Predicate { predicate: b, .. }) => {
                Arc::ptr_eq(a, b)
            }
            (Match::Regex(a), Match::Regex(b)) => a.as_str() == b.as_str(),
            (
                Match::Range {
                    ty: t1,
                    low: l1,
                    high: h1,
                },
                Match::Range {
                    ty: t2,
                    low: l2,
                    high: h2,
                },
            ) => t1 == t2 && l1 == l2 && h1 == h2,
            _ => false,
        }
    }
}

impl fmt::Debug for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Match::Any(ty) => write!(f, "Any({})", ty),
            Match::AnyRef(ty) => write!(f, "AnyRef({})", ty),
            Match::IsNull(ty) => write!(f, "IsNull({})", ty),
            Match::NotNull(ty) => write!(f, "NotNull({})", ty),
            Match::Predicate { ty, description, .. } => {
                write!(f, "Predicate({}, {})", ty, description)
            }
            Match::Regex(re) => write!(f, "Regex({})", re.as_str()),
            Match::Range { ty, low, high } => write!(f, "Range({}, {}..={})", ty, low, high),
        }
    }
}

/// The syntactic form a matcher was authored in.
#[derive(Debug, Clone, PartialEq)]
pub enum MatcherShape {
    /// A matcher method call such as `IsAny<int>()`.
    Call { method: String, return_type: Ty },
    /// A matcher read from a field. `by_ref` marks the by-reference wildcard.
    Field { name: String, ty: Ty, by_ref: bool },
    /// A matcher read from a property.
    Property { name: String, ty: Ty },
    /// Any other member access (events, method groups). Not supported.
    Member { name: String },
}

/// A matcher placeholder together with its authored shape.
#[derive(Debug, Clone, PartialEq)]
pub struct MatcherExpr {
    pub shape: MatcherShape,
    pub matcher: Match,
}

impl MatcherExpr {
    pub fn new(shape: MatcherShape, matcher: Match) -> Self {
        MatcherExpr { shape, matcher }
    }

    fn call(method: &str, matcher: Match) -> Self {
        let return_type = matcher.ty();
        MatcherExpr::new(
            MatcherShape::Call {
                method: method.to_string(),
                return_type,
            },
            matcher,
        )
    }
}

impl fmt::Display for MatcherExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.shape {
            MatcherShape::Call {
                method,
                return_type,
            } => write!(f, "It.{}<{}>()", method, return_type),
            MatcherShape::Field {
                ty, by_ref: true, ..
            } => write!(f, "It.Ref<{}>.IsAny", ty),
            MatcherShape::Field { name, .. }
            | MatcherShape::Property { name, .. }
            | MatcherShape::Member { name } => f.write_str(name),
        }
    }
}

/// Matcher constructors.
pub struct It;

impl It {
    /// Any value of `T`.
    pub fn is_any<T: Typed>() -> Expr {
        It::is_any_of(T::ty())
    }

    pub fn is_any_of(ty: Ty) -> Expr {
        MatcherExpr::call("IsAny", Match::Any(ty)).into()
    }

    /// Any value passed by reference to a `ref`/`out` parameter of `T`.
    pub fn ref_any<T: Typed>() -> Expr {
        It::ref_any_of(T::ty())
    }

    pub fn ref_any_of(ty: Ty) -> Expr {
        MatcherExpr::new(
            MatcherShape::Field {
                name: "IsAny".to_string(),
                ty: ty.clone(),
                by_ref: true,
            },
            Match::AnyRef(ty),
        )
        .into()
    }

    pub fn is_null<T: Typed>() -> Expr {
        It::is_null_of(T::ty())
    }

    /// A null value of reference type `ty`.
    pub fn is_null_of(ty: Ty) -> Expr {
        MatcherExpr::call("IsNull", Match::IsNull(ty)).into()
    }

    pub fn is_not_null<T: Typed>() -> Expr {
        It::is_not_null_of(T::ty())
    }

    pub fn is_not_null_of(ty: Ty) -> Expr {
        MatcherExpr::call("IsNotNull", Match::NotNull(ty)).into()
    }

    /// A value of `T` satisfying `predicate`.
    pub fn is<T, F>(description: impl Into<String>, predicate: F) -> Expr
    where
        T: Typed,
        F: Fn(T) -> bool + Send + Sync + 'static,
    {
        let predicate: PredicateFn =
            Arc::new(move |value: &Value| T::from_value(value).is_some_and(|v| predicate(v)));
        MatcherExpr::call(
            "Is",
            Match::Predicate {
                ty: T::ty(),
                description: description.into(),
                predicate,
            },
        )
        .into()
    }

    /// A string matching `pattern`.
    pub fn is_regex(pattern: &str) -> Result<Expr, regex::Error> {
        let re = Regex::new(pattern)?;
        Ok(MatcherExpr::call("IsRegex", Match::Regex(re)).into())
    }

    /// A number in `low..=high`.
    pub fn is_in_range<T: Typed>(low: T, high: T) -> Expr {
        MatcherExpr::call(
            "IsInRange",
            Match::Range {
                ty: T::ty(),
                low: low.into_value(),
                high: high.into_value(),
            },
        )
        .into()
    }
}

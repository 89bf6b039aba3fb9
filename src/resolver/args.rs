//! Argument-type extraction.
//!
//! Every raw argument is classified once into an `ArgumentSpec` that records
//! the type used for overload matching and what will be bound to the
//! parameter slot. Classification order:
//!
//! 1. a null literal is rejected;
//! 2. a matcher authored as a call takes the call's return type;
//! 3. the by-reference wildcard takes its value type, made by-ref;
//! 4. a matcher read from a field takes the field type;
//! 5. a matcher read from a property takes the property type;
//! 6. any other matcher member is rejected;
//! 7. any other expression is folded to a constant and takes its type;
//! 8. a plain value takes its runtime type.

use crate::core::ty::Ty;
use crate::core::value::Value;
use crate::matcher::{Expr, MatcherShape};
use crate::resolver::errors::ProtectedError;

/// A raw call argument as supplied by the test author.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Value(Value),
    Expr(Expr),
}

impl Arg {
    /// A null literal. Always rejected by lookups; exists so the rejection
    /// can be tested and reported.
    pub fn null() -> Self {
        Arg::Value(Value::Null)
    }
}

impl From<Value> for Arg {
    fn from(v: Value) -> Self {
        Arg::Value(v)
    }
}

impl From<Expr> for Arg {
    fn from(e: Expr) -> Self {
        Arg::Expr(e)
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Value(Value::Bool(b))
    }
}

impl From<i32> for Arg {
    fn from(n: i32) -> Self {
        Arg::Value(Value::Int(n))
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Arg::Value(Value::Long(n))
    }
}

impl From<f64> for Arg {
    fn from(d: f64) -> Self {
        Arg::Value(Value::Double(d))
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Value(Value::from(s))
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Value(Value::Str(s))
    }
}

/// A classified argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentSpec {
    /// A constant value (plain or folded) with the type it was inferred as.
    Literal { value: Value, ty: Ty },
    /// A matcher placeholder with its implied type.
    Matcher { expr: Expr, ty: Ty },
    /// The by-reference wildcard; `ty` is already by-ref.
    RefMatcher { expr: Expr, ty: Ty },
}

impl ArgumentSpec {
    /// The type used for overload matching.
    pub fn ty(&self) -> &Ty {
        match self {
            ArgumentSpec::Literal { ty, .. }
            | ArgumentSpec::Matcher { ty, .. }
            | ArgumentSpec::RefMatcher { ty, .. } => ty,
        }
    }

    /// The expression bound to a parameter of type `param_ty`.
    ///
    /// Literals become constants typed as the parameter. Matchers are bound
    /// as authored, minus one enclosing lambda.
    pub fn bind(&self, param_ty: &Ty) -> Expr {
        match self {
            ArgumentSpec::Literal { value, .. } => {
                Expr::typed_constant(value.clone(), param_ty.clone())
            }
            ArgumentSpec::Matcher { expr, .. } | ArgumentSpec::RefMatcher { expr, .. } => {
                match expr {
                    Expr::Lambda { body, .. } => (**body).clone(),
                    other => other.clone(),
                }
            }
        }
    }
}

/// Classify one raw argument at position `index`.
pub fn classify(index: usize, arg: &Arg) -> Result<ArgumentSpec, ProtectedError> {
    let spec = match arg {
        Arg::Value(Value::Null) => return Err(ProtectedError::NullArgumentMisuse { index }),
        Arg::Value(value) => ArgumentSpec::Literal {
            ty: value.runtime_ty().unwrap_or_else(Ty::object),
            value: value.clone(),
        },
        Arg::Expr(expr) => classify_expr(index, expr)?,
    };

    tracing::trace!("argument {} classified as `{}`", index, spec.ty());
    Ok(spec)
}

/// Classify a whole argument list, stopping at the first failure.
pub fn classify_all(args: &[Arg]) -> Result<Vec<ArgumentSpec>, ProtectedError> {
    args.iter()
        .enumerate()
        .map(|(index, arg)| classify(index, arg))
        .collect()
}

fn classify_expr(index: usize, expr: &Expr) -> Result<ArgumentSpec, ProtectedError> {
    // An inline predicate is classified by the matcher it wraps.
    let inner = match expr {
        Expr::Lambda { body, .. } if body.as_matcher().is_some() => body.as_ref(),
        other => other,
    };

    if let Some(matcher) = inner.as_matcher() {
        let expr = expr.clone();
        return match &matcher.shape {
            MatcherShape::Call { return_type, .. } => Ok(ArgumentSpec::Matcher {
                expr,
                ty: return_type.clone(),
            }),
            MatcherShape::Field {
                ty, by_ref: true, ..
            } => Ok(ArgumentSpec::RefMatcher {
                expr,
                ty: ty.by_ref(),
            }),
            MatcherShape::Field { ty, .. } | MatcherShape::Property { ty, .. } => {
                Ok(ArgumentSpec::Matcher {
                    expr,
                    ty: ty.clone(),
                })
            }
            MatcherShape::Member { name } => Err(ProtectedError::UnsupportedMatcherMember {
                index,
                member: name.clone(),
            }),
        };
    }

    match expr.fold() {
        Some((Value::Null, _)) => Err(ProtectedError::NullArgumentMisuse { index }),
        Some((value, ty)) => Ok(ArgumentSpec::Literal { value, ty }),
        None => Err(ProtectedError::UnreducibleArgument {
            index,
            expr: expr.to_string(),
        }),
    }
}

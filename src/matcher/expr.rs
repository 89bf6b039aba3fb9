//! Argument expressions.
//!
//! An `Expr` is what ends up bound to a parameter slot of a call descriptor:
//! a typed constant, a matcher placeholder, or a small computation that folds
//! to a constant. Matching an intercepted value against an `Expr` is the only
//! thing the engine ever asks of it.

use std::fmt;

use crate::core::ty::Ty;
use crate::core::value::Value;
use crate::matcher::MatcherExpr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Gt,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
        };
        f.write_str(s)
    }
}

/// An argument expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A constant with its static type (which may be wider than the value's).
    Constant { value: Value, ty: Ty },
    /// A matcher placeholder.
    Matcher(MatcherExpr),
    Convert { operand: Box<Expr>, ty: Ty },
    Unary { op: UnaryOp, operand: Box<Expr> },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// A free variable. Never reducible to a constant.
    Parameter { name: String, ty: Ty },
    /// An inline predicate wrapping a single body.
    Lambda { param: String, body: Box<Expr> },
}

impl Expr {
    /// A constant typed by its runtime value. `Null` is typed as `object`.
    pub fn constant(value: impl Into<Value>) -> Self {
        let value = value.into();
        let ty = value.runtime_ty().unwrap_or_else(Ty::object);
        Expr::Constant { value, ty }
    }

    pub fn typed_constant(value: Value, ty: Ty) -> Self {
        Expr::Constant { value, ty }
    }

    pub fn convert(operand: Expr, ty: Ty) -> Self {
        Expr::Convert {
            operand: Box::new(operand),
            ty,
        }
    }

    pub fn neg(operand: Expr) -> Self {
        Expr::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(operand),
        }
    }

    pub fn not(operand: Expr) -> Self {
        Expr::Unary {
            op: UnaryOp::Not,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn parameter(name: impl Into<String>, ty: Ty) -> Self {
        Expr::Parameter {
            name: name.into(),
            ty,
        }
    }

    pub fn lambda(param: impl Into<String>, body: Expr) -> Self {
        Expr::Lambda {
            param: param.into(),
            body: Box::new(body),
        }
    }

    /// The matcher this expression is, if any.
    pub fn as_matcher(&self) -> Option<&MatcherExpr> {
        match self {
            Expr::Matcher(m) => Some(m),
            _ => None,
        }
    }

    /// Evaluate to a constant, if nothing in the tree depends on a call site.
    pub fn fold(&self) -> Option<(Value, Ty)> {
        match self {
            Expr::Constant { value, ty } => Some((value.clone(), ty.clone())),
            Expr::Convert { operand, ty } => {
                let (value, _) = operand.fold()?;
                let converted = convert_value(value, ty)?;
                Some((converted, ty.clone()))
            }
            Expr::Unary { op, operand } => {
                let (value, ty) = operand.fold()?;
                let folded = match (op, value) {
                    (UnaryOp::Neg, Value::Int(n)) => Value::Int(n.checked_neg()?),
                    (UnaryOp::Neg, Value::Long(n)) => Value::Long(n.checked_neg()?),
                    (UnaryOp::Neg, Value::Double(d)) => Value::Double(-d),
                    (UnaryOp::Not, Value::Bool(b)) => Value::Bool(!b),
                    _ => return None,
                };
                Some((folded, ty))
            }
            Expr::Binary { op, lhs, rhs } => {
                let (l, lty) = lhs.fold()?;
                let (r, _) = rhs.fold()?;
                fold_binary(*op, l, r, lty)
            }
            Expr::Matcher(_) | Expr::Parameter { .. } | Expr::Lambda { .. } => None,
        }
    }

    /// Whether an intercepted argument value satisfies this expression.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Expr::Matcher(m) => m.matcher.matches(value),
            Expr::Lambda { body, .. } => body.matches(value),
            _ => match self.fold() {
                Some((expected, _)) => expected == *value,
                None => false,
            },
        }
    }
}

fn convert_value(value: Value, to: &Ty) -> Option<Value> {
    if to.is_reference() {
        return if value.fits(to) { Some(value) } else { None };
    }
    let converted = match (value, to.name()) {
        (v @ Value::Int(_), "int") => v,
        (Value::Int(n), "long") => Value::Long(i64::from(n)),
        (Value::Int(n), "double") => Value::Double(f64::from(n)),
        (Value::Long(n), "int") => Value::Int(i32::try_from(n).ok()?),
        (v @ Value::Long(_), "long") => v,
        (Value::Long(n), "double") => Value::Double(n as f64),
        (Value::Double(d), "int") => Value::Int(d as i32),
        (Value::Double(d), "long") => Value::Long(d as i64),
        (v @ Value::Double(_), "double") => v,
        (v @ Value::Bool(_), "bool") => v,
        (v, _) if v.fits(to) => v,
        _ => return None,
    };
    Some(converted)
}

fn fold_binary(op: BinaryOp, l: Value, r: Value, lty: Ty) -> Option<(Value, Ty)> {
    use BinaryOp::*;

    let arith = match (&l, &r) {
        (Value::Int(a), Value::Int(b)) => {
            let (a, b) = (*a, *b);
            match op {
                Add => Some(Value::Int(a.checked_add(b)?)),
                Sub => Some(Value::Int(a.checked_sub(b)?)),
                Mul => Some(Value::Int(a.checked_mul(b)?)),
                Div => Some(Value::Int(a.checked_div(b)?)),
                Rem => Some(Value::Int(a.checked_rem(b)?)),
                _ => None,
            }
        }
        (Value::Long(a), Value::Long(b)) => {
            let (a, b) = (*a, *b);
            match op {
                Add => Some(Value::Long(a.checked_add(b)?)),
                Sub => Some(Value::Long(a.checked_sub(b)?)),
                Mul => Some(Value::Long(a.checked_mul(b)?)),
                Div => Some(Value::Long(a.checked_div(b)?)),
                Rem => Some(Value::Long(a.checked_rem(b)?)),
                _ => None,
            }
        }
        (Value::Double(a), Value::Double(b)) => match op {
            Add => Some(Value::Double(a + b)),
            Sub => Some(Value::Double(a - b)),
            Mul => Some(Value::Double(a * b)),
            Div => Some(Value::Double(a / b)),
            Rem => Some(Value::Double(a % b)),
            _ => None,
        },
        (Value::Str(a), Value::Str(b)) if op == Add => Some(Value::Str(format!("{}{}", a, b))),
        (Value::Bool(a), Value::Bool(b)) => match op {
            And => Some(Value::Bool(*a && *b)),
            Or => Some(Value::Bool(*a || *b)),
            _ => None,
        },
        _ => None,
    };
    if let Some(value) = arith {
        return Some((value, lty));
    }

    let compared = match op {
        Eq => Value::Bool(l == r),
        Ne => Value::Bool(l != r),
        Lt => Value::Bool(l.as_f64()? < r.as_f64()?),
        Gt => Value::Bool(l.as_f64()? > r.as_f64()?),
        _ => return None,
    };
    Some((compared, Ty::bool()))
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant { value, .. } => write!(f, "{}", value),
            Expr::Matcher(m) => write!(f, "{}", m),
            Expr::Convert { operand, ty } => write!(f, "({}){}", ty, operand),
            Expr::Unary { op, operand } => match op {
                UnaryOp::Neg => write!(f, "-{}", operand),
                UnaryOp::Not => write!(f, "!{}", operand),
            },
            Expr::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op, rhs),
            Expr::Parameter { name, .. } => f.write_str(name),
            Expr::Lambda { param, body } => write!(f, "{} => {}", param, body),
        }
    }
}

impl From<MatcherExpr> for Expr {
    fn from(m: MatcherExpr) -> Self {
        Expr::Matcher(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::It;

    #[test]
    fn test_fold_arithmetic() {
        let e = Expr::binary(BinaryOp::Add, Expr::constant(2), Expr::constant(3));
        assert_eq!(e.fold(), Some((Value::Int(5), Ty::int())));

        let e = Expr::neg(Expr::constant(4i64));
        assert_eq!(e.fold(), Some((Value::Long(-4), Ty::long())));
    }

    #[test]
    fn test_fold_convert_widens() {
        let e = Expr::convert(Expr::constant(7), Ty::long());
        assert_eq!(e.fold(), Some((Value::Long(7), Ty::long())));

        let e = Expr::convert(Expr::constant("s"), Ty::object());
        assert_eq!(e.fold(), Some((Value::from("s"), Ty::object())));
    }

    #[test]
    fn test_fold_comparison_is_bool() {
        let e = Expr::binary(BinaryOp::Lt, Expr::constant(1), Expr::constant(2));
        assert_eq!(e.fold(), Some((Value::Bool(true), Ty::bool())));
    }

    #[test]
    fn test_unreducible() {
        let e = Expr::binary(
            BinaryOp::Add,
            Expr::parameter("x", Ty::int()),
            Expr::constant(1),
        );
        assert_eq!(e.fold(), None);
        assert_eq!(Expr::binary(BinaryOp::Div, Expr::constant(1), Expr::constant(0)).fold(), None);
    }

    #[test]
    fn test_matches() {
        assert!(Expr::constant(5).matches(&Value::Int(5)));
        assert!(!Expr::constant(5).matches(&Value::Int(6)));
        assert!(It::is_any::<i32>().matches(&Value::Int(6)));
        assert!(Expr::lambda("x", It::is_any::<i32>()).matches(&Value::Int(1)));
    }

    #[test]
    fn test_display() {
        let e = Expr::binary(BinaryOp::Mul, Expr::constant(2), Expr::parameter("n", Ty::int()));
        assert_eq!(e.to_string(), "(2 * n)");
    }
}

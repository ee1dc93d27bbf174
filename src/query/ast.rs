use serde::{Serialize, Deserialize};
use std::fmt;
use crate::core::types::FieldValue;

/// Comparison operators accepted between a field and a literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Contains,  // Case-insensitive substring, text fields only
}

impl CmpOp {
    /// Operators that need an ordered (numeric) field
    pub fn is_ordering(&self) -> bool {
        matches!(self, CmpOp::Lt | CmpOp::Le | CmpOp::Gt | CmpOp::Ge)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Contains => "contains",
        }
    }
}

/// `field op literal`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub field: String,
    pub op: CmpOp,
    pub value: FieldValue,
}

/// Parsed boolean expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Comparison(Comparison),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
}

impl Expr {
    pub fn comparison(field: &str, op: CmpOp, value: FieldValue) -> Self {
        Expr::Comparison(Comparison {
            field: field.to_string(),
            op,
            value,
        })
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or(Box::new(left), Box::new(right))
    }

    pub fn not(operand: Expr) -> Self {
        Expr::Not(Box::new(operand))
    }

    /// All comparisons in left-to-right order
    pub fn comparisons(&self) -> Vec<&Comparison> {
        let mut out = Vec::new();
        self.collect_comparisons(&mut out);
        out
    }

    fn collect_comparisons<'a>(&'a self, out: &mut Vec<&'a Comparison>) {
        match self {
            Expr::Comparison(cmp) => out.push(cmp),
            Expr::And(left, right) | Expr::Or(left, right) => {
                left.collect_comparisons(out);
                right.collect_comparisons(out);
            }
            Expr::Not(operand) => operand.collect_comparisons(out),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Comparison(cmp) => match &cmp.value {
                FieldValue::Text(s) => write!(f, "{} {} {:?}", cmp.field, cmp.op.symbol(), s),
                FieldValue::Number(n) => write!(f, "{} {} {}", cmp.field, cmp.op.symbol(), n),
            },
            Expr::And(left, right) => write!(f, "({} and {})", left, right),
            Expr::Or(left, right) => write!(f, "({} or {})", left, right),
            Expr::Not(operand) => write!(f, "not {}", operand),
        }
    }
}

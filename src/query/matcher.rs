use crate::core::error::{Error, Result};
use crate::core::types::{Event, FieldRef, FieldValue};
use crate::query::ast::{CmpOp, Comparison, Expr};
use crate::schema::schema::{Field, FieldType};

/// A comparison with its field already mapped onto the schema
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    pub field: Field,
    pub op: CmpOp,
    /// Lowercased for `contains`
    pub value: FieldValue,
}

impl Check {
    /// A blank field fails every comparison on it
    pub fn matches(&self, event: &Event) -> bool {
        let Some(actual) = event.get(self.field) else {
            return false;
        };

        match (actual, &self.value) {
            (FieldRef::Text(a), FieldValue::Text(b)) => match self.op {
                CmpOp::Eq => a == b,
                CmpOp::Ne => a != b,
                CmpOp::Contains => a.to_lowercase().contains(b.as_str()),
                _ => false,
            },
            (FieldRef::Number(a), FieldValue::Number(b)) => match self.op {
                CmpOp::Eq => a == *b,
                CmpOp::Ne => a != *b,
                CmpOp::Lt => a < *b,
                CmpOp::Le => a <= *b,
                CmpOp::Gt => a > *b,
                CmpOp::Ge => a >= *b,
                CmpOp::Contains => false,
            },
            // A text value never equals a number
            _ => self.op == CmpOp::Ne,
        }
    }
}

/// An expression resolved against the schema once, ready to run over many events
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledQuery {
    Check(Check),
    And(Box<CompiledQuery>, Box<CompiledQuery>),
    Or(Box<CompiledQuery>, Box<CompiledQuery>),
    Not(Box<CompiledQuery>),
}

impl CompiledQuery {
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            CompiledQuery::Check(check) => check.matches(event),
            CompiledQuery::And(left, right) => left.matches(event) && right.matches(event),
            CompiledQuery::Or(left, right) => left.matches(event) || right.matches(event),
            CompiledQuery::Not(operand) => !operand.matches(event),
        }
    }
}

/// Resolve every comparison in `expr`; fails on the first one the schema rejects
pub fn compile(expr: &Expr) -> Result<CompiledQuery> {
    Ok(match expr {
        Expr::Comparison(cmp) => CompiledQuery::Check(resolve(cmp)?),
        Expr::And(left, right) => CompiledQuery::And(Box::new(compile(left)?), Box::new(compile(right)?)),
        Expr::Or(left, right) => CompiledQuery::Or(Box::new(compile(left)?), Box::new(compile(right)?)),
        Expr::Not(operand) => CompiledQuery::Not(Box::new(compile(operand)?)),
    })
}

/// Check every comparison in `expr` against the schema without touching any record
pub fn validate(expr: &Expr) -> Result<()> {
    for cmp in expr.comparisons() {
        resolve(cmp)?;
    }
    Ok(())
}

/// Evaluate `expr` against one event, resolving comparisons as they are reached.
///
/// A blank field fails every comparison on it, so `not` over it holds.
pub fn evaluate(expr: &Expr, event: &Event) -> Result<bool> {
    match expr {
        Expr::Comparison(cmp) => Ok(resolve(cmp)?.matches(event)),
        Expr::And(left, right) => Ok(evaluate(left, event)? && evaluate(right, event)?),
        Expr::Or(left, right) => Ok(evaluate(left, event)? || evaluate(right, event)?),
        Expr::Not(operand) => Ok(!evaluate(operand, event)?),
    }
}

/// Map the comparison's field name onto the schema and check operator/literal types
fn resolve(cmp: &Comparison) -> Result<Check> {
    let field = Field::from_name(&cmp.field)
        .ok_or_else(|| Error::eval(format!("unknown field '{}'", cmp.field)))?;

    if cmp.op.is_ordering() {
        if field.field_type() != FieldType::Number {
            return Err(Error::eval(format!(
                "operator {} needs a numeric field, '{}' is text",
                cmp.op.symbol(), field
            )));
        }
        if !matches!(cmp.value, FieldValue::Number(_)) {
            return Err(Error::eval(format!(
                "operator {} on '{}' needs a number, got a {}",
                cmp.op.symbol(), field, cmp.value.kind_name()
            )));
        }
    }

    let mut value = cmp.value.clone();
    if cmp.op == CmpOp::Contains {
        if field.field_type() != FieldType::Text {
            return Err(Error::eval(format!("contains needs a text field, '{}' is numeric", field)));
        }
        let FieldValue::Text(needle) = &cmp.value else {
            return Err(Error::eval(format!("contains on '{}' needs a string", field)));
        };
        value = FieldValue::Text(needle.to_lowercase());
    }

    Ok(Check { field, op: cmp.op, value })
}

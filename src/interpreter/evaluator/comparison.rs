use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::CompareOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::i64_as_f64,
};

/// Structural equality between two values.
///
/// `None` equals `None`; booleans compare by value; ints and reals
/// cross-compare numerically; texts compare by content; lists compare
/// element-wise with this same equality. Values of incompatible types are
/// simply not equal — equality never fails.
///
/// # Example
/// ```
/// use snakelet::interpreter::{evaluator::comparison::values_equal, value::core::Value};
///
/// assert!(values_equal(&Value::Int(2), &Value::Real(2.0)));
/// assert!(!values_equal(&Value::Int(0), &Value::Text("0".to_string())));
/// ```
#[must_use]
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::None, Value::None) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Int(a), Value::Real(b)) | (Value::Real(b), Value::Int(a)) => {
            i64_as_f64(*a) == *b
        },
        (Value::Real(a), Value::Real(b)) => a == b,
        (Value::Text(a), Value::Text(b)) => a == b,
        (Value::List(a), Value::List(b)) => {
            let a = a.borrow();
            let b = b.borrow();
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| values_equal(x, y))
        },
        _ => false,
    }
}

/// Applies an ordering operator to two `PartialOrd` values.
fn ordering_holds<T: PartialOrd>(op: CompareOperator, a: &T, b: &T) -> bool {
    match op {
        CompareOperator::Equal => a == b,
        CompareOperator::NotEqual => a != b,
        CompareOperator::Less => a < b,
        CompareOperator::LessEqual => a <= b,
        CompareOperator::Greater => a > b,
        CompareOperator::GreaterEqual => a >= b,
    }
}

/// Ordering between two values.
///
/// Defined on numbers (with int-to-real promotion), texts
/// (lexicographically), and lists (element-wise; at the first unequal
/// index the result is the comparison of those elements, and a proper
/// prefix compares by length). Everything else, including booleans and
/// `None`, raises `TypesNotComparable`.
fn ordered(op: CompareOperator, left: &Value, right: &Value, line: usize) -> EvalResult<bool> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(ordering_holds(op, a, b)),
        (Value::Int(a), Value::Real(b)) => Ok(ordering_holds(op, &i64_as_f64(*a), b)),
        (Value::Real(a), Value::Int(b)) => Ok(ordering_holds(op, a, &i64_as_f64(*b))),
        (Value::Real(a), Value::Real(b)) => Ok(ordering_holds(op, a, b)),
        (Value::Text(a), Value::Text(b)) => Ok(ordering_holds(op, a, b)),
        (Value::List(a), Value::List(b)) => ordered_lists(op, a, b, line),
        _ => Err(RuntimeError::TypesNotComparable { left: left.type_name(),
                                                    right: right.type_name(),
                                                    line }),
    }
}

/// Element-wise list ordering.
fn ordered_lists(op: CompareOperator,
                 left: &Rc<RefCell<Vec<Value>>>,
                 right: &Rc<RefCell<Vec<Value>>>,
                 line: usize)
                 -> EvalResult<bool> {
    let left = left.borrow();
    let right = right.borrow();

    for (a, b) in left.iter().zip(right.iter()) {
        if !values_equal(a, b) {
            return ordered(op, a, b, line);
        }
    }

    Ok(ordering_holds(op, &left.len(), &right.len()))
}

impl Context<'_> {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// Equality and inequality use structural equality and are total;
    /// the four ordering operators are defined only on numbers, texts,
    /// and lists.
    ///
    /// # Example
    /// ```
    /// use snakelet::{
    ///     ast::CompareOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let a = Value::Int(3);
    /// let b = Value::Real(5.0);
    ///
    /// let result = Context::eval_compare(CompareOperator::Less, &a, &b, 1);
    ///
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_compare(op: CompareOperator,
                        left: &Value,
                        right: &Value,
                        line: usize)
                        -> EvalResult<Value> {
        Ok(Value::Bool(match op {
                           CompareOperator::Equal => values_equal(left, right),
                           CompareOperator::NotEqual => !values_equal(left, right),
                           CompareOperator::Less
                           | CompareOperator::LessEqual
                           | CompareOperator::Greater
                           | CompareOperator::GreaterEqual => ordered(op, left, right, line)?,
                       }))
    }
}

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::{f64_to_i64_truncated, i64_as_f64, i64_to_usize_checked},
};

/// Builds the error for an operand pair outside the compatibility table.
fn incompatible(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> RuntimeError {
    RuntimeError::OperandsTypesNotCompatible { left: left.type_name(),
                                               op: op.symbol(),
                                               right: right.type_name(),
                                               line }
}

/// Turns a repetition operand into a count; negative counts repeat zero
/// times.
fn repeat_count(times: i64, line: usize) -> EvalResult<usize> {
    i64_to_usize_checked(times.max(0), RuntimeError::Overflow { line })
}

impl Context<'_> {
    /// Evaluates one step of a binary operator chain.
    ///
    /// The operand types decide the operation:
    ///
    /// - two numbers compute numerically, with an int promoted to real
    ///   when the other side is real;
    /// - `+` concatenates two texts or two lists;
    /// - `*` repeats a text by an int, and a list by an int on either
    ///   side;
    /// - every other pairing is outside the compatibility table and
    ///   raises `OperandsTypesNotCompatible`.
    ///
    /// # Example
    /// ```
    /// use snakelet::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let text = Value::Text("ab".to_string());
    /// let result = Context::eval_binary(BinaryOperator::Mul, &text, &Value::Int(3), 1);
    ///
    /// assert_eq!(result.unwrap(), Value::Text("ababab".to_string()));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        match (op, left, right) {
            (BinaryOperator::Add, Value::Text(a), Value::Text(b)) => {
                Ok(Value::Text(format!("{a}{b}")))
            },
            (BinaryOperator::Add, Value::List(a), Value::List(b)) => {
                let mut items = a.borrow().clone();
                items.extend(b.borrow().iter().cloned());
                Ok(Value::list(items))
            },
            (BinaryOperator::Mul, Value::Text(content), Value::Int(times)) => {
                Ok(Value::Text(content.repeat(repeat_count(*times, line)?)))
            },
            (BinaryOperator::Mul, Value::List(items), Value::Int(times))
            | (BinaryOperator::Mul, Value::Int(times), Value::List(items)) => {
                let count = repeat_count(*times, line)?;
                let items = items.borrow();
                let mut result = Vec::with_capacity(items.len().saturating_mul(count));
                for _ in 0..count {
                    result.extend(items.iter().cloned());
                }
                Ok(Value::list(result))
            },
            _ => Self::eval_numeric(op, left, right, line),
        }
    }

    /// Evaluates a binary operator whose operands must both be numbers.
    ///
    /// Int/Int stays in integer arithmetic; as soon as a real is
    /// involved, the int side is promoted and the result is real.
    fn eval_numeric(op: BinaryOperator,
                    left: &Value,
                    right: &Value,
                    line: usize)
                    -> EvalResult<Value> {
        match (left, right) {
            (Value::Int(a), Value::Int(b)) => Self::eval_int(op, *a, *b, line),
            (Value::Int(a), Value::Real(b)) => Ok(Self::eval_real(op, i64_as_f64(*a), *b)),
            (Value::Real(a), Value::Int(b)) => Ok(Self::eval_real(op, *a, i64_as_f64(*b))),
            (Value::Real(a), Value::Real(b)) => Ok(Self::eval_real(op, *a, *b)),
            _ => Err(incompatible(op, left, right, line)),
        }
    }

    /// Integer arithmetic.
    ///
    /// Division truncates toward zero and rejects a zero divisor.
    /// Exponentiation computes the double-precision power and truncates
    /// it back to an int. Overflow of the 64-bit range is an error, not a
    /// wraparound.
    fn eval_int(op: BinaryOperator, a: i64, b: i64, line: usize) -> EvalResult<Value> {
        let overflow = RuntimeError::Overflow { line };
        match op {
            BinaryOperator::Add => a.checked_add(b).map(Value::Int).ok_or(overflow),
            BinaryOperator::Sub => a.checked_sub(b).map(Value::Int).ok_or(overflow),
            BinaryOperator::Mul => a.checked_mul(b).map(Value::Int).ok_or(overflow),
            BinaryOperator::Div => {
                if b == 0 {
                    return Err(RuntimeError::DivisionByZero { line });
                }
                a.checked_div(b).map(Value::Int).ok_or(overflow)
            },
            BinaryOperator::Pow => {
                let power = i64_as_f64(a).powf(i64_as_f64(b));
                f64_to_i64_truncated(power, overflow).map(Value::Int)
            },
        }
    }

    /// Real arithmetic; total, with IEEE-754 semantics for division by
    /// zero and overflow.
    fn eval_real(op: BinaryOperator, a: f64, b: f64) -> Value {
        Value::Real(match op {
                        BinaryOperator::Add => a + b,
                        BinaryOperator::Sub => a - b,
                        BinaryOperator::Mul => a * b,
                        BinaryOperator::Div => a / b,
                        BinaryOperator::Pow => a.powf(b),
                    })
    }
}

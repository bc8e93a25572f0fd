use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// Builds the list `[0, 1, ..., n-1]` from one int argument.
///
/// A bound of zero or below yields the empty list. Any non-int argument
/// raises `TypeNotExpected`.
pub fn range(_ctx: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    match args {
        [Value::Int(bound)] => Ok(Value::list((0..*bound).map(Value::Int).collect())),
        [other] => Err(RuntimeError::TypeNotExpected { expected: "int",
                                                       found: other.type_name(),
                                                       line }),
        _ => Err(RuntimeError::ParametersCountNotExpected { name:     "range".to_string(),
                                                            given:    args.len(),
                                                            expected: 1,
                                                            line, }),
    }
}

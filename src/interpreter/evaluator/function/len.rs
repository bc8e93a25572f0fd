use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::usize_to_i64_checked,
};

/// Returns the length of a list or a text as an int.
///
/// Text length counts characters, not bytes. Any other argument type
/// raises `TypeNotExpected`.
pub fn len(_ctx: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    match args {
        [Value::List(items)] => {
            let count = items.borrow().len();
            usize_to_i64_checked(count, RuntimeError::Overflow { line }).map(Value::Int)
        },
        [Value::Text(content)] => {
            let count = content.chars().count();
            usize_to_i64_checked(count, RuntimeError::Overflow { line }).map(Value::Int)
        },
        [other] => Err(RuntimeError::TypeNotExpected { expected: "list or string",
                                                       found: other.type_name(),
                                                       line }),
        _ => Err(RuntimeError::ParametersCountNotExpected { name:     "len".to_string(),
                                                            given:    args.len(),
                                                            expected: 1,
                                                            line, }),
    }
}

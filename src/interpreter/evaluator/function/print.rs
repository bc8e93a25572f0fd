use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// Writes every argument to the context's output sink and returns `None`.
///
/// Each argument is followed by a single space and the whole line by a
/// newline. A top-level text argument is written as its raw content,
/// without the surrounding quotes of the canonical form; text nested
/// inside a list keeps its quotes.
pub fn print(ctx: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    for arg in args {
        let written = match arg {
            Value::Text(content) => write!(ctx.out(), "{content} "),
            other => write!(ctx.out(), "{other} "),
        };
        written.map_err(|error| stream_error(&error, line))?;
    }

    writeln!(ctx.out()).map_err(|error| stream_error(&error, line))?;
    Ok(Value::None)
}

/// A broken output stream surfaces as a runtime error.
fn stream_error(error: &std::io::Error, line: usize) -> RuntimeError {
    RuntimeError::UnexpectedError { details: format!("writing to the output stream failed: {error}"),
                                    line }
}

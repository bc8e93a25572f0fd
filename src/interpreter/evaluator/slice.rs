use crate::{
    ast::{Node, SliceKind},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::i64_to_usize_checked,
};

impl Context<'_> {
    /// Evaluates a slice of a list.
    ///
    /// The source expression must produce a list; slicing anything else
    /// raises `NotList`. Bounds are half-open: for a list of length `len`,
    /// an `Index` start must be strictly below `len`, while the range
    /// forms accept bounds up to and including `len`. Violations raise
    /// `OutOfRange`.
    ///
    /// The range forms build a fresh list holding the selected elements;
    /// a reversed range selects nothing.
    pub(crate) fn eval_slice(&mut self,
                             source: &Node,
                             kind: SliceKind,
                             start: i64,
                             end: i64,
                             line: usize)
                             -> EvalResult<Value> {
        let value = self.eval(source)?;
        let items = match &value {
            Value::List(items) => items.borrow(),
            other => {
                return Err(RuntimeError::NotList { found: other.type_name(),
                                                   line });
            },
        };
        let len = items.len();

        let first = i64_to_usize_checked(start, RuntimeError::OutOfRange { index: start,
                                                                           len,
                                                                           line })?;

        match kind {
            SliceKind::Index => {
                items.get(first)
                     .cloned()
                     .ok_or(RuntimeError::OutOfRange { index: start,
                                                       len,
                                                       line })
            },
            SliceKind::FromStart => {
                if first > len {
                    return Err(RuntimeError::OutOfRange { index: start,
                                                          len,
                                                          line });
                }
                Ok(Value::list(items[first..].to_vec()))
            },
            SliceKind::Range => {
                let last = i64_to_usize_checked(end, RuntimeError::OutOfRange { index: end,
                                                                                len,
                                                                                line })?;
                if first > len {
                    return Err(RuntimeError::OutOfRange { index: start,
                                                          len,
                                                          line });
                }
                if last > len {
                    return Err(RuntimeError::OutOfRange { index: end,
                                                          len,
                                                          line });
                }
                if last <= first {
                    return Ok(Value::list(Vec::new()));
                }
                Ok(Value::list(items[first..last].to_vec()))
            },
        }
    }
}

use std::rc::Rc;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Flow},
            function::{len, print, range},
        },
        value::core::Value,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the evaluation context (for its output sink), the
/// already-evaluated argument values, and the call's line number.
pub type BuiltinFn = fn(&mut Context, &[Value], usize) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
#[derive(Clone, Copy)]
pub enum Arity {
    /// The builtin must receive exactly this many arguments.
    Exact(usize),
    /// The builtin accepts any number of arguments.
    Any,
}

impl Arity {
    /// Tests whether the given argument count satisfies this constraint.
    const fn check(self, given: usize) -> bool {
        match self {
            Self::Exact(expected) => given == expected,
            Self::Any => true,
        }
    }

    /// The count reported in an arity mismatch.
    const fn expected(self, given: usize) -> usize {
        match self {
            Self::Exact(expected) => expected,
            Self::Any => given,
        }
    }
}

/// Metadata and handler of one builtin.
pub struct BuiltinDef {
    /// The source-level name.
    pub name:  &'static str,
    /// How many arguments the builtin accepts.
    pub arity: Arity,
    /// The handler.
    pub func:  BuiltinFn,
}

/// The functions registered in every fresh global scope.
pub static BUILTIN_TABLE: &[BuiltinDef] =
    &[BuiltinDef { name:  "print",
                   arity: Arity::Any,
                   func:  print::print, },
      BuiltinDef { name:  "range",
                   arity: Arity::Exact(1),
                   func:  range::range, },
      BuiltinDef { name:  "len",
                   arity: Arity::Exact(1),
                   func:  len::len, }];

/// A user-defined function: its parameter names and its body, shared with
/// the definition node.
pub struct UserFunction {
    /// The function name, kept for diagnostics.
    pub name:   String,
    /// The parameter names, in declaration order.
    pub params: Vec<String>,
    /// The body block.
    pub body:   Rc<Node>,
}

/// A callable as stored in a scope's function map.
///
/// Built-ins and user-defined functions go through the same call
/// protocol; only the final dispatch differs.
#[derive(Clone)]
pub enum Callable {
    /// One of the interpreter-provided functions.
    Builtin(&'static BuiltinDef),
    /// A function defined by the program.
    User(Rc<UserFunction>),
}

impl Context<'_> {
    /// Evaluates a function call.
    ///
    /// The callee is looked up through the scope chain first; arguments
    /// are then evaluated left to right in the caller's frame. A builtin
    /// runs directly against the argument values. A user-defined function
    /// gets a fresh frame pushed onto the caller's chain with the
    /// parameters bound; its body's `return` value becomes the call's
    /// value, and a body that falls off the end yields `None`.
    ///
    /// # Errors
    /// - `FunctionNotDeclared` when the name resolves to nothing.
    /// - `ParametersCountNotExpected` on an arity mismatch.
    /// - Whatever the body or builtin raises.
    pub(crate) fn eval_call(&mut self,
                            name: &str,
                            args: &[Node],
                            line: usize)
                            -> EvalResult<Value> {
        let callable = self.get_function(name).ok_or_else(|| {
                                                  RuntimeError::FunctionNotDeclared {
                name: name.to_string(),
                line,
            }
                                              })?;

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval(arg)?);
        }

        match callable {
            Callable::Builtin(builtin) => {
                if !builtin.arity.check(values.len()) {
                    return Err(RuntimeError::ParametersCountNotExpected {
                        name:     builtin.name.to_string(),
                        given:    values.len(),
                        expected: builtin.arity.expected(values.len()),
                        line,
                    });
                }
                (builtin.func)(self, &values, line)
            },
            Callable::User(function) => {
                if values.len() != function.params.len() {
                    return Err(RuntimeError::ParametersCountNotExpected {
                        name:     function.name.clone(),
                        given:    values.len(),
                        expected: function.params.len(),
                        line,
                    });
                }

                self.push_scope();
                for (param, value) in function.params.iter().zip(values) {
                    self.set_variable(param, value);
                }
                let flow = self.exec_block(&function.body);
                self.pop_scope();

                match flow? {
                    Flow::Return(value) => Ok(value),
                    _ => Ok(Value::None),
                }
            },
        }
    }
}

use std::{collections::HashMap, io::Write, rc::Rc};

use crate::{
    ast::{AssignOperator, BinaryOperator, Literal, Node},
    error::RuntimeError,
    interpreter::{
        evaluator::function::core::{BUILTIN_TABLE, Callable, UserFunction},
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How a statement finished.
///
/// Loops and function bodies unwind through nested blocks by returning
/// one of the control variants; every enclosing construct decides whether
/// to consume or propagate it. Control flow is invisible to user
/// programs: a [`Flow`] is never stored in a variable or passed as an
/// argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// The statement ran to completion and produced a value.
    Value(Value),
    /// A `break` is unwinding to the nearest loop.
    Break,
    /// A `continue` is unwinding to the nearest loop.
    Continue,
    /// A `return` is unwinding to the nearest function call.
    Return(Value),
}

/// One frame of the scope chain.
///
/// A scope maps names to variables and to functions separately; the two
/// namespaces do not shadow each other.
#[derive(Default)]
pub struct Scope {
    variables: HashMap<String, Value>,
    functions: HashMap<String, Callable>,
}

/// Stores the runtime evaluation state.
///
/// The context owns the scope chain and the output sink that `print`
/// writes to. Name lookup walks the chain from the innermost frame
/// outward; binding always writes the innermost frame, shadowing outer
/// names.
///
/// A fresh frame is pushed only for function calls. Conditional and loop
/// bodies run in the frame of their enclosing statement, which is why a
/// loop's iterator variable outlives the loop.
pub struct Context<'out> {
    scopes: Vec<Scope>,
    out:    &'out mut dyn Write,
}

impl<'out> Context<'out> {
    /// Creates a context whose root frame has the built-in functions
    /// registered, writing program output to `out`.
    pub fn new(out: &'out mut dyn Write) -> Self {
        let mut globals = Scope::default();
        for builtin in BUILTIN_TABLE {
            globals.functions
                   .insert(builtin.name.to_string(), Callable::Builtin(builtin));
        }

        Self { scopes: vec![globals],
               out }
    }

    /// Executes a parsed program.
    ///
    /// The root block runs directly in the global frame, so top-level
    /// definitions share a namespace with the built-ins.
    ///
    /// # Errors
    /// Any [`RuntimeError`]; execution stops at the first one.
    pub fn run(&mut self, program: &Node) -> EvalResult<()> {
        self.exec_block(program)?;
        Ok(())
    }

    /// Executes the statements of a code block in order.
    ///
    /// A function definition among the statements is registered without
    /// running its body. The first statement that finishes with a control
    /// flow other than a plain value ends the block early and hands that
    /// flow to the caller; otherwise the block finishes with `None`.
    pub fn exec_block(&mut self, block: &Node) -> EvalResult<Flow> {
        match block {
            Node::CodeBlock(statements) => {
                for statement in statements {
                    match self.exec_statement(statement)? {
                        Flow::Value(..) => {},
                        flow => return Ok(flow),
                    }
                }
                Ok(Flow::Value(Value::None))
            },
            statement => self.exec_statement(statement),
        }
    }

    /// Executes a single statement.
    fn exec_statement(&mut self, node: &Node) -> EvalResult<Flow> {
        match node {
            Node::FunctionDef { name, params, body, line } => {
                let function = UserFunction { name:   name.clone(),
                                              params: params.clone(),
                                              body:   Rc::clone(body), };
                self.declare_function(name, Callable::User(Rc::new(function)), *line)?;
                Ok(Flow::Value(Value::None))
            },
            Node::Assign { op, name, value, line } => self.exec_assign(*op, name, value, *line),
            Node::If { condition, body, .. } => {
                if self.eval(condition)?.is_truthy() {
                    self.exec_block(body)
                } else {
                    Ok(Flow::Value(Value::None))
                }
            },
            Node::While { condition, body, .. } => loop {
                if self.eval(condition)?.is_falsy() {
                    return Ok(Flow::Value(Value::None));
                }
                match self.exec_block(body)? {
                    Flow::Break => return Ok(Flow::Value(Value::None)),
                    Flow::Return(value) => return Ok(Flow::Return(value)),
                    Flow::Value(..) | Flow::Continue => {},
                }
            },
            Node::For { iterator, range, body, line } => {
                self.exec_for(iterator, range, body, *line)
            },
            Node::Break { .. } => Ok(Flow::Break),
            Node::Continue { .. } => Ok(Flow::Continue),
            Node::Return { value, .. } => Ok(Flow::Return(self.eval(value)?)),
            expression => Ok(Flow::Value(self.eval(expression)?)),
        }
    }

    /// Executes a plain or compound assignment.
    ///
    /// Both forms bind the name in the innermost frame. A compound
    /// assignment reads the current value through the whole chain first,
    /// so `x += 1` against an outer `x` computes from the outer value but
    /// creates a local binding.
    fn exec_assign(&mut self,
                   op: AssignOperator,
                   name: &str,
                   value: &Node,
                   line: usize)
                   -> EvalResult<Flow> {
        let result = match op {
            AssignOperator::Assign => self.eval(value)?,
            AssignOperator::AddAssign | AssignOperator::SubAssign => {
                let current = self.get_variable(name).cloned().ok_or_else(|| {
                                  RuntimeError::ReadNotAssignVariable { name: name.to_string(),
                                                                        line }
                              })?;
                let operand = self.eval(value)?;
                let binary = if op == AssignOperator::AddAssign {
                    BinaryOperator::Add
                } else {
                    BinaryOperator::Sub
                };
                Self::eval_binary(binary, &current, &operand, line)?
            },
        };

        self.set_variable(name, result);
        Ok(Flow::Value(Value::None))
    }

    /// Executes a `for` loop over the elements of a list.
    ///
    /// The iterator name is bound in the current frame for every element
    /// and keeps its last value after the loop.
    fn exec_for(&mut self,
                iterator: &str,
                range: &Node,
                body: &Node,
                line: usize)
                -> EvalResult<Flow> {
        let value = self.eval(range)?;
        let items = match &value {
            Value::List(items) => items.borrow().clone(),
            other => {
                return Err(RuntimeError::IterableExpected { found: other.type_name(),
                                                            line });
            },
        };

        for item in items {
            self.set_variable(iterator, item);
            match self.exec_block(body)? {
                Flow::Break => return Ok(Flow::Value(Value::None)),
                Flow::Return(value) => return Ok(Flow::Return(value)),
                Flow::Value(..) | Flow::Continue => {},
            }
        }

        Ok(Flow::Value(Value::None))
    }

    /// Evaluates an expression node to a value.
    pub fn eval(&mut self, node: &Node) -> EvalResult<Value> {
        match node {
            Node::Variable { name, line } => {
                self.get_variable(name).cloned().ok_or_else(|| {
                                                    RuntimeError::ReadNotAssignVariable {
                        name: name.clone(),
                        line: *line,
                    }
                                                })
            },
            Node::Constant { value, .. } => self.eval_literal(value),
            Node::Expression { args, ops, line } => self.eval_expression(args, ops, *line),
            Node::Compare { left, op, right, line } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_compare(*op, &left, &right, *line)
            },
            Node::Slice { source, kind, start, end, line } => {
                self.eval_slice(source, *kind, *start, *end, *line)
            },
            Node::Call { name, args, line } => self.eval_call(name, args, *line),
            statement => {
                Err(RuntimeError::UnexpectedError { details:
                                                        "a statement cannot produce a value"
                                                            .to_string(),
                                                    line:    statement.line_number(), })
            },
        }
    }

    /// Evaluates a literal.
    ///
    /// Scalars return their embedded value; a list literal evaluates its
    /// element expressions in order and builds a fresh list.
    fn eval_literal(&mut self, literal: &Literal) -> EvalResult<Value> {
        Ok(match literal {
            Literal::None => Value::None,
            Literal::Bool(value) => Value::Bool(*value),
            Literal::Int(value) => Value::Int(*value),
            Literal::Real(value) => Value::Real(*value),
            Literal::Text(content) => Value::Text(content.clone()),
            Literal::List(elements) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.eval(element)?);
                }
                Value::list(values)
            },
        })
    }

    /// Folds an n-ary operator chain left to right.
    fn eval_expression(&mut self,
                       args: &[Node],
                       ops: &[BinaryOperator],
                       line: usize)
                       -> EvalResult<Value> {
        let mut arguments = args.iter();
        let Some(first) = arguments.next() else {
            return Err(RuntimeError::UnexpectedError { details:
                                                           "empty expression chain".to_string(),
                                                       line });
        };

        let mut accumulator = self.eval(first)?;
        for (op, arg) in ops.iter().zip(arguments) {
            let value = self.eval(arg)?;
            accumulator = Self::eval_binary(*op, &accumulator, &value, line)?;
        }

        Ok(accumulator)
    }

    /// Looks a variable up through the scope chain, innermost first.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.variables.get(name))
    }

    /// Binds a variable in the innermost frame, shadowing outer names.
    pub fn set_variable(&mut self, name: &str, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.variables.insert(name.to_string(), value);
        }
    }

    /// Looks a function up through the scope chain, innermost first.
    #[must_use]
    pub fn get_function(&self, name: &str) -> Option<Callable> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.functions.get(name))
            .cloned()
    }

    /// Registers a function in the innermost frame.
    ///
    /// # Errors
    /// `FunctionAlreadyDefined` when the frame already holds a function
    /// of that name. Shadowing a function from an outer frame is allowed.
    pub fn declare_function(&mut self,
                            name: &str,
                            callable: Callable,
                            line: usize)
                            -> EvalResult<()> {
        let Some(scope) = self.scopes.last_mut() else {
            return Ok(());
        };
        if scope.functions.contains_key(name) {
            return Err(RuntimeError::FunctionAlreadyDefined { name: name.to_string(),
                                                              line });
        }

        scope.functions.insert(name.to_string(), callable);
        Ok(())
    }

    /// Pushes the fresh frame of a function call.
    pub(crate) fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Drops the innermost frame when a call returns.
    pub(crate) fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// The output sink `print` writes to.
    pub(crate) fn out(&mut self) -> &mut dyn Write {
        &mut *self.out
    }
}

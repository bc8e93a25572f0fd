use snakelet::{
    interpreter::{lexer::Lexer, parser::core::parse_program},
    run_program,
};
use walkdir::WalkDir;

/// Runs a program and returns its captured output, or the error message.
fn run(source: &str) -> Result<String, String> {
    let mut out = Vec::new();
    match run_program(source, &mut out) {
        Ok(()) => Ok(String::from_utf8(out).expect("program output is UTF-8")),
        Err(error) => Err(error.to_string()),
    }
}

fn assert_output(source: &str, expected: &str) {
    match run(source) {
        Ok(actual) => assert_eq!(actual, expected, "program:\n{source}"),
        Err(error) => panic!("program failed:\n{source}\nerror: {error}"),
    }
}

fn assert_error(source: &str, fragment: &str) {
    match run(source) {
        Ok(output) => panic!("program succeeded but was expected to fail:\n{source}\noutput: {output}"),
        Err(message) => {
            assert!(message.contains(fragment),
                    "error message {message:?} does not contain {fragment:?} for:\n{source}");
        },
    }
}

#[test]
fn arithmetic_follows_precedence() {
    assert_output("print(1 + 2 * 3)", "7 \n");
    assert_output("print(2 + 3 * 2 ^ 2)", "14 \n");
    assert_output("print(1 - 2 - 3)", "-4 \n");
    assert_output("print(6 / 2 * 3)", "9 \n");
    assert_output("print(7 / 2)", "3 \n");
    assert_output("print(-7 / 2)", "-3 \n");
}

#[test]
fn exponentiation_folds_left() {
    assert_output("print(2 ^ 2 ^ 3)", "64 \n");
    assert_output("print(2 ^ 10)", "1024 \n");
    assert_output("print(2 ^ -1)", "0 \n");
}

#[test]
fn mixed_numeric_promotion() {
    assert_output("print(1 + 0.5)", "1.5 \n");
    assert_output("print(1.0 * 2)", "2 \n");
    assert_output("print(9. + .5)", "9.5 \n");
    assert_output("print(2 ^ 0.5)", "1.4142135623730951 \n");
    assert_output("print(1.0 / 0)", "inf \n");
}

#[test]
fn integer_literals() {
    assert_output("print(0x10 + 1)", "17 \n");
    assert_output("print(0x1F)", "31 \n");
}

#[test]
fn text_operations() {
    assert_output("print(\"ab\" * 3)", "ababab \n");
    assert_output("print(\"foo\" + \"bar\")", "foobar \n");
    assert_output("print(\"ab\" * -3)", " \n");
    assert_output("print(len(\"abc\"))", "3 \n");
}

#[test]
fn print_strips_quotes_only_at_top_level() {
    assert_output("print(\"hi\")", "hi \n");
    assert_output("print([\"hi\"])", "[\"hi\"] \n");
    assert_output("print(None)", "None \n");
    assert_output("print(True, False, 1, 1.5)", "True False 1 1.5 \n");
    assert_output("print()", "\n");
}

#[test]
fn list_operations() {
    assert_output("print([1, 2] + [3])", "[1, 2, 3] \n");
    assert_output("print([1, 2] * 2)", "[1, 2, 1, 2] \n");
    assert_output("print(2 * [0])", "[0, 0] \n");
    assert_output("print([1, 2,])", "[1, 2] \n");
    assert_output("print([])", "[] \n");
    assert_output("print([[1], [2, 3]])", "[[1], [2, 3]] \n");
}

#[test]
fn slices() {
    assert_output("a = [1, 2, 3]\nprint(a[1:])\nprint(len(a))", "[2, 3] \n3 \n");
    assert_output("a = [1, 2, 3]\nprint(a[0])", "1 \n");
    assert_output("a = [1, 2, 3]\nprint(a[1:3])", "[2, 3] \n");
    assert_output("a = [1, 2, 3]\nprint(a[3:])", "[] \n");
    assert_output("a = [1, 2, 3]\nprint(a[2:1])", "[] \n");
    assert_output("print([1, 2, 3][2])", "3 \n");
    assert_output("print(range(3)[2])", "2 \n");
}

#[test]
fn comparisons() {
    assert_output("print(1 == 1.0)", "True \n");
    assert_output("print(1 != 2)", "True \n");
    assert_output("print(\"a\" < \"b\")", "True \n");
    assert_output("print(2 >= 2)", "True \n");
    assert_output("print(None == None)", "True \n");
    assert_output("print(True == True)", "True \n");
    assert_output("print(1 == \"1\")", "False \n");
    assert_output("print(1 != \"1\")", "True \n");
}

#[test]
fn list_ordering_is_element_wise() {
    assert_output("print([1, 2] < [1, 3])", "True \n");
    assert_output("print([1] < [1, 2])", "True \n");
    assert_output("print([1, 2] == [1, 2])", "True \n");
    assert_output("print([2] > [1, 9, 9])", "True \n");
    assert_output("print([1, 2] <= [1, 2])", "True \n");
}

#[test]
fn truthiness() {
    let source = "if 0:\n  print(\"no\")\nif 0.0:\n  print(\"no\")\nif \"\":\n  print(\"no\")\nif []:\n  print(\"no\")\nif None:\n  print(\"no\")\nif False:\n  print(\"no\")\nif 1:\n  print(\"int\")\nif \"x\":\n  print(\"text\")\nif [0]:\n  print(\"list\")";
    assert_output(source, "int \ntext \nlist \n");
}

#[test]
fn while_loop_with_break() {
    assert_output("i = 0\nwhile True:\n  i += 1\n  if i == 3:\n    break\nprint(i)",
                  "3 \n");
}

#[test]
fn while_loop_with_continue() {
    assert_output("i = 0\nwhile i < 3:\n  i += 1\n  if i == 2:\n    continue\n  print(i)",
                  "1 \n3 \n");
}

#[test]
fn for_loop_over_range() {
    assert_output("for i in range(3):\n  print(i)", "0 \n1 \n2 \n");
}

#[test]
fn for_loop_control_flow() {
    assert_output("for i in [1, 2, 3]:\n  if i == 2:\n    continue\n  print(i)",
                  "1 \n3 \n");
    assert_output("for i in [1, 2, 3]:\n  if i == 2:\n    break\n  print(i)",
                  "1 \n");
    // the iterator variable keeps its last value after the loop
    assert_output("for i in range(3):\n  x = 0\nprint(i)", "2 \n");
}

#[test]
fn return_unwinds_a_loop() {
    let source = "def find(items, target):\n  for item in items:\n    if item == target:\n      return 1\n  return 0\nprint(find([1, 2], 2))\nprint(find([1, 2], 5))";
    assert_output(source, "1 \n0 \n");
}

#[test]
fn recursive_functions() {
    let source =
        "def f(x):\n  if x < 2:\n    return x\n  return f(x - 1) + f(x - 2)\nprint(f(6))";
    assert_output(source, "8 \n");
}

#[test]
fn function_results() {
    assert_output("def add(a, b):\n  return a + b\nprint(add(2, 5))", "7 \n");
    assert_output("def f():\n  x = 1\nprint(f())", "None \n");
    assert_output("def f():\n  return\nprint(f())", "None \n");
    assert_output("def hello():\n  print(\"hi\")\nhello()", "hi \n");
}

#[test]
fn nested_function_definitions() {
    let source = "def outer():\n  def inner():\n    return 7\n  return inner()\nprint(outer())\nprint(outer())";
    assert_output(source, "7 \n7 \n");
}

#[test]
fn inner_functions_die_with_their_frame() {
    let source = "def outer():\n  def inner():\n    return 7\n  return inner()\nouter()\ninner()";
    assert_error(source, "Function 'inner' is not declared");
}

#[test]
fn callee_scope_is_isolated_from_the_caller() {
    let source = "def f():\n  local = 1\n  return local\nf()\nprint(local)";
    assert_error(source, "Variable 'local' was read but never assigned");
}

#[test]
fn assignments_shadow_outer_bindings() {
    assert_output("x = 1\ndef f():\n  x = 2\n  return x\nprint(f())\nprint(x)",
                  "2 \n1 \n");
}

#[test]
fn compound_assignment_reads_outer_but_binds_local() {
    assert_output("x = 1\ndef f():\n  x += 10\n  return x\nprint(f())\nprint(x)",
                  "11 \n1 \n");
}

#[test]
fn free_variables_resolve_through_the_call_chain() {
    // scoping is dynamic: the body of f sees the frames of whoever calls
    // it, so g's local n shadows the global one during g's call
    let source = "def f():\n  return n\ndef g():\n  n = 5\n  return f()\nn = 2\nprint(f())\nprint(g())";
    assert_output(source, "2 \n5 \n");
}

#[test]
fn function_redefinition_in_the_same_scope_fails() {
    assert_error("def f():\n  return 1\ndef f():\n  return 2", "Function 'f' is already defined");
    assert_error("def print(x):\n  return x", "Function 'print' is already defined");
}

#[test]
fn lists_are_shared_between_bindings() {
    assert_output("a = [1, 2]\nb = a\nprint(b)\nprint(a == b)", "[1, 2] \nTrue \n");
}

#[test]
fn concat_and_repeat_length_properties() {
    assert_output("a = [1, 2]\nb = [3]\nprint(len(a + b) == len(a) + len(b))", "True \n");
    assert_output("a = \"xyz\"\nprint(len(a * 4) == 4 * len(a))", "True \n");
    assert_output("print(len(\"ab\" * -3))", "0 \n");
}

#[test]
fn range_len_duality() {
    assert_output("print(len(range(5)))", "5 \n");
    assert_output("print(len(range(0)))", "0 \n");
    assert_output("print(len(range(-3)))", "0 \n");
    assert_output("print(range(4)[0])\nprint(range(4)[3])", "0 \n3 \n");
}

#[test]
fn comments_and_blank_lines() {
    assert_output("# a comment line\nx = 1  # a trailing comment\n\nprint(x)", "1 \n");
}

#[test]
fn tabs_count_as_one_indent_character() {
    assert_output("if 1:\n\tprint(5)", "5 \n");
}

#[test]
fn parse_errors_name_their_position() {
    assert_error("x = 5$", "Error on line 1 column 5: $");
    assert_error("x = 1\n  y = 2", "Error on line 2");
}

#[test]
fn indentation_errors() {
    assert_error("x = 1\n  y = 2", "Indentation does not match");
    assert_error("if 1:\n    x = 1\n  y = 2", "Indentation does not match");
    assert_error("if 1:\nprint(2)", "Expected a new code block");
    assert_error("def f():\nprint(1)", "Expected a new code block");
}

#[test]
fn misplaced_statements_are_refused() {
    assert_error("return 1", "Token type invalid or unexpected");
    assert_error("break", "Token type invalid or unexpected");
    assert_error("continue", "Token type invalid or unexpected");
    assert_error("else", "Token type invalid or unexpected");
    assert_error("def f():\n  break", "Token type invalid or unexpected");
}

#[test]
fn malformed_expressions() {
    assert_error("x = ", "Assign operation needs an expression");
    assert_error("x = \"abc", "Assign operation needs an expression");
    assert_error("x = 12ab3", "Assign operation needs an expression");
    assert_error("print(1 +)", "Expression needs a right side");
    assert_error("if 1\n  print(1)", "Invalid compare expression");
    assert_error("print(1 < 2 < 3)", "function call arguments");
    assert_error("x = [,]", "element of list");
    assert_error("def f():\n  return 1 2", "Unexpected token after 'return'");
}

#[test]
fn malformed_slices_and_loops() {
    assert_error("a = [1]\nprint(a[0:1)", "Expected ']' as end of slice");
    assert_error("a = [1]\nprint(a[x])", "Token type invalid or unexpected");
    assert_error("for i in 5:\n  print(i)", "Invalid for loop");
    assert_error("for in [1]:\n  print(1)", "Invalid for loop");
}

#[test]
fn runtime_errors_carry_their_line() {
    assert_error("x = 1\nprint(y)", "Error on line 2");
    assert_error("print(y)", "Variable 'y' was read but never assigned");
}

#[test]
fn type_errors() {
    assert_error("print(1 + \"a\")", "not compatible with operator '+'");
    assert_error("print(3 * \"a\")", "not compatible with operator '*'");
    assert_error("print(None < 1)", "cannot be ordered");
    assert_error("print(True < False)", "cannot be ordered");
    assert_error("print([1] < \"a\")", "cannot be ordered");
}

#[test]
fn slice_runtime_errors() {
    assert_error("a = [1]\nprint(a[5])", "out of range");
    assert_error("a = [1, 2]\nprint(a[0:9])", "out of range");
    assert_error("a = 5\nprint(a[0])", "Only lists can be sliced");
}

#[test]
fn integer_arithmetic_is_checked() {
    assert_error("print(1 / 0)", "Division by zero");
    assert_error("x = 9223372036854775807\nprint(x + 1)", "Integer overflow");
}

#[test]
fn builtin_argument_validation() {
    assert_error("print(range(\"x\"))", "Expected a value of type int");
    assert_error("print(len(5))", "Expected a value of type list or string");
    assert_error("print(range(1, 2))", "'range' expects 1 parameters, but 2 were given");
    assert_error("print(len())", "'len' expects 1 parameters, but 0 were given");
}

#[test]
fn user_function_arity_is_checked() {
    assert_error("def f(a):\n  return a\nf(1, 2)", "'f' expects 1 parameters, but 2 were given");
    assert_error("nope()", "Function 'nope' is not declared");
}

#[test]
fn for_loop_requires_a_list() {
    assert_error("x = 5\nfor i in x:\n  print(i)", "expects a list to iterate on");
}

#[test]
fn lexer_is_total_and_eof_is_idempotent() {
    use snakelet::interpreter::lexer::Token;

    let mut lexer = Lexer::new("x = 1");
    loop {
        let (token, _) = lexer.next_token();
        if token == Token::Eof {
            break;
        }
    }
    assert_eq!(lexer.next_token().0, Token::Eof);
    assert_eq!(lexer.next_token().0, Token::Eof);
}

#[test]
fn token_positions_are_monotonic() {
    let tokens = Lexer::tokenize("x = 1\ny = 2\n\nif x:\n  y += x\n");
    let mut previous = (1, 0);

    for (_, position) in &tokens {
        let current = (position.line, position.column);
        assert!(current >= previous, "position went backwards: {previous:?} -> {current:?}");
        previous = current;
    }
}

#[test]
fn parsing_is_deterministic() {
    let source = "def f(x):\n  if x < 2:\n    return x\n  return f(x - 1) + f(x - 2)\nprint(f(6))";
    let tokens = Lexer::tokenize(source);

    let first = parse_program(&mut tokens.iter().peekable()).expect("parse");
    let second = parse_program(&mut tokens.iter().peekable()).expect("parse");

    assert_eq!(first, second);
}

#[test]
fn demo_scripts_run() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "snek"))
    {
        let path = entry.path();
        let source =
            std::fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read {path:?}: {e}"));

        if let Err(error) = run(&source) {
            panic!("demo script {path:?} failed:\n{error}");
        }
        count += 1;
    }

    assert!(count > 0, "no demo scripts found in demos/");
}

//! End-to-end tests: complete programs through the whole pipeline, checked
//! against their expected output.

use roverscript::{
    interpreter::RuntimeError,
    rover::{Direction, Rotation, RoverHost},
    run_program, ProgramError,
};

/// Host stub recording actions; getters return fixed values.
#[derive(Default, Debug)]
struct TestHost {
    calls: Vec<String>,
    x: i64,
    y: i64,
}

impl RoverHost for TestHost {
    fn orientation(&self) -> i64 {
        0
    }

    fn x_pos(&self) -> i64 {
        self.x
    }

    fn y_pos(&self) -> i64 {
        self.y
    }

    fn gold(&self) -> i64 {
        1
    }

    fn silver(&self) -> i64 {
        1
    }

    fn copper(&self) -> i64 {
        1
    }

    fn iron(&self) -> i64 {
        1
    }

    fn power(&self) -> i64 {
        100
    }

    fn sonar(&mut self) -> i64 {
        self.calls.push("sonar".into());
        0
    }

    fn max_move(&self, _direction: Direction) -> i64 {
        4
    }

    fn can_move(&self, _direction: Direction) -> bool {
        false
    }

    fn scan(&mut self) {
        self.calls.push("scan".into());
    }

    fn drill(&mut self) {
        self.calls.push("drill".into());
    }

    fn shockwave(&mut self) {
        self.calls.push("shockwave".into());
    }

    fn build(&mut self) {
        self.calls.push("build".into());
    }

    fn push(&mut self) {
        self.calls.push("push".into());
    }

    fn recharge(&mut self) {
        self.calls.push("recharge".into());
    }

    fn backflip(&mut self) {
        self.calls.push("backflip".into());
    }

    fn print_inventory(&self) {}

    fn print_map(&self) {}

    fn print_pos(&self) {}

    fn print_orientation(&self) {}

    fn change_map(&mut self, path: &str) {
        self.calls.push(format!("change_map {path}"));
    }

    fn move_rover(&mut self, direction: Direction, steps: i64) {
        self.calls.push(format!("move {direction} {steps}"));
        let (dx, dy) = direction.delta();
        self.x += dx * steps;
        self.y += dy * steps;
    }

    fn turn(&mut self, rotation: Rotation) {
        self.calls.push(format!("turn {rotation}"));
    }
}

fn run(source: &str) -> Result<(String, TestHost), ProgramError> {
    let mut host = TestHost::default();
    let mut output = Vec::new();

    run_program(source, &mut host, &mut output)?;

    Ok((String::from_utf8(output).unwrap(), host))
}

fn expect_output(source: &str, expected: &str) {
    let (output, _) = run(source).expect("program failed");

    assert_eq!(output, expected);
}

#[test]
fn run_arithmetic_promotion() {
    expect_output(
        "{ int i ; double d ; i = 3 ; d = 2.0 ; print i + d ; print i / 2 ; }",
        "5.0\n1\n",
    );
}

#[test]
fn run_short_circuit_and_control_flow() {
    expect_output(
        "{ int x ; x = 0 ; if ( false && ( 1 / 0 == 0 ) ) x = 1 ; else x = 2 ; print x ; }",
        "2\n",
    );
}

#[test]
fn run_while_loop_with_array() {
    expect_output(
        "{ int a [ 3 ] ; int i ; i = 0 ; while ( i < 3 ) { a [ i ] = i * i ; i = i + 1 ; } print a [ 0 ] ; print a [ 1 ] ; print a [ 2 ] ; }",
        "0\n1\n4\n",
    );
}

#[test]
fn run_shadowing_across_nested_blocks() {
    expect_output(
        "{ int x ; x = 1 ; { int x ; x = 2 ; print x ; } print x ; }",
        "2\n1\n",
    );
}

#[test]
fn run_redefinition_is_a_compile_error() {
    let result = run("{ int x ; int x ; }");

    assert!(
        matches!(&result, Err(ProgramError::Type(_))),
        "expected a type error, got {result:?}"
    );
}

#[test]
fn run_rover_action_via_host() {
    let (output, host) = run("{ rover . move up 3 ; print rover . x_pos ; }").unwrap();

    assert_eq!(host.calls, vec!["move up 3"]);
    assert_eq!(output, format!("{}\n", host.x));
}

#[test]
fn run_multidimensional_array_program() {
    expect_output(
        "{ int grid [ 2 ] [ 3 ] ; int i ; int j ; i = 0 ; while ( i < 2 ) { j = 0 ; while ( j < 3 ) { grid [ i ] [ j ] = i * 3 + j ; j = j + 1 ; } i = i + 1 ; } print grid [ 1 ] [ 2 ] ; print grid [ 0 ] [ 0 ] ; }",
        "5\n0\n",
    );
}

#[test]
fn run_getters_in_expressions() {
    expect_output(
        "{ int reach ; reach = rover . max_move down ; print reach * 2 ; print rover . can_move left ; print rover . power ; }",
        "8\nfalse\n100\n",
    );
}

#[test]
fn run_comments_are_ignored() {
    expect_output(
        "{ int x ; // trailing comment\n x = 2 ; /* block\ncomment */ print x ; }",
        "2\n",
    );
}

#[test]
fn run_division_by_zero_is_a_runtime_error() {
    let result = run("{ int x ; x = 1 / 0 ; }");

    assert_eq!(
        result.map(|(output, _)| output),
        Err(ProgramError::Runtime(RuntimeError::DivisionByZero))
    );
}

#[test]
fn run_lex_error_surfaces() {
    assert!(matches!(
        run("{ int x ; x = § ; }"),
        Err(ProgramError::Lex(_))
    ));
}

#[test]
fn run_parse_error_surfaces() {
    assert!(matches!(
        run("{ int x ; x = ; }"),
        Err(ProgramError::Parse(_))
    ));
}

#[test]
fn run_failed_program_leaves_no_output_behind() {
    let result = run("{ print 1 ; print 1 / 0 ; }");

    // the first print may have been flushed, but the run itself fails
    assert!(matches!(result, Err(ProgramError::Runtime(_))));
}

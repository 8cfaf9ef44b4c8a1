//! # Interpreter
//!
//! Tree-walking evaluator. It runs a type-checked AST against a value scope
//! stack, writes `print` output to the supplied sink and dispatches rover
//! actions and getters through the [`RoverHost`] trait.
//!
//! The typechecker has already ruled out type confusion, so the evaluator
//! treats a value of the wrong shape as an internal bug rather than a user
//! error; only genuinely dynamic failures (division by zero, bad indices)
//! surface as [`RuntimeError`].

mod error;
mod scope;
mod value;

pub use self::error::*;
pub use self::scope::*;
pub use self::value::*;

use std::io::Write;

use crate::parser::ast::{
    Assignment, BinaryExpression, BinaryOperator, Block, Declaration, Expression, IfStatement,
    Loc, PrintStatement, Program, RoverAction, RoverGetter, Statement, UnaryExpression,
    UnaryOperator, WhileLoop,
};
use crate::rover::RoverHost;

type EvalResult<T> = Result<T, RuntimeError>;

/// Struct for evaluating a type-checked program.
pub struct Interpreter<'a, H, W> {
    host: &'a mut H,
    output: &'a mut W,
    scope: Scope,
}

impl<'a, H, W> Interpreter<'a, H, W>
where
    H: RoverHost,
    W: Write,
{
    pub fn new(host: &'a mut H, output: &'a mut W) -> Self {
        Self {
            host,
            output,
            scope: Scope::default(),
        }
    }

    /// Run the program to completion or to its first runtime error.
    pub fn run(&mut self, program: &Program) -> EvalResult<()> {
        self.run_block(&program.block)
    }

    /// Frames are popped on every exit path, mirroring the typechecker.
    fn run_block(&mut self, block: &Block) -> EvalResult<()> {
        self.scope.push();
        let result = self.run_block_contents(block);
        self.scope.pop();

        result
    }

    fn run_block_contents(&mut self, block: &Block) -> EvalResult<()> {
        for declaration in &block.declarations {
            self.run_declaration(declaration);
        }
        for statement in &block.statements {
            self.run_statement(statement)?;
        }

        Ok(())
    }

    /// Bind the declared name to its zero-initialized value.
    fn run_declaration(&mut self, declaration: &Declaration) {
        self.scope.declare(
            &declaration.name,
            Value::for_declaration(declaration.base, &declaration.dimensions),
        );
    }

    fn run_statement(&mut self, statement: &Statement) -> EvalResult<()> {
        match statement {
            Statement::Empty => Ok(()),
            Statement::Block(block) => self.run_block(block),
            Statement::Assignment(assignment) => self.run_assignment(assignment),
            Statement::If(IfStatement {
                condition,
                then_branch,
                else_branch,
            }) => {
                if self.eval_condition(condition)? {
                    self.run_statement(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.run_statement(else_branch)
                } else {
                    Ok(())
                }
            }
            Statement::While(WhileLoop { condition, body }) => {
                while self.eval_condition(condition)? {
                    self.run_statement(body)?;
                }

                Ok(())
            }
            Statement::Print(PrintStatement { value }) => {
                let value = self.eval_expression(value)?;
                writeln!(self.output, "{value}")
                    .map_err(|e| RuntimeError::Output(e.to_string()))
            }
            Statement::Rover(action) => self.run_action(action),
        }
    }

    fn run_assignment(&mut self, assignment: &Assignment) -> EvalResult<()> {
        let value = self.eval_expression(&assignment.value)?;

        let mut indices = vec![];
        for index in &assignment.target.indices {
            indices.push(self.eval_index(index)?);
        }

        self.scope
            .assign_cell(&assignment.target.name, &indices, value)
    }

    fn run_action(&mut self, action: &RoverAction) -> EvalResult<()> {
        match action {
            RoverAction::Scan => self.host.scan(),
            RoverAction::Drill => self.host.drill(),
            RoverAction::Shockwave => self.host.shockwave(),
            RoverAction::Build => self.host.build(),
            RoverAction::Sonar => {
                self.host.sonar();
            }
            RoverAction::Push => self.host.push(),
            RoverAction::Recharge => self.host.recharge(),
            RoverAction::Backflip => self.host.backflip(),
            RoverAction::PrintInventory => self.host.print_inventory(),
            RoverAction::PrintMap => self.host.print_map(),
            RoverAction::PrintPos => self.host.print_pos(),
            RoverAction::PrintOrientation => self.host.print_orientation(),
            RoverAction::ChangeMap(path) => {
                let Value::Str(path) = self.eval_expression(path)? else {
                    unreachable!("change_map path was not a string");
                };
                self.host.change_map(&path);
            }
            RoverAction::Move { direction, steps } => {
                let steps = self.eval_index(steps)?;
                self.host.move_rover(*direction, steps);
            }
            RoverAction::Turn(rotation) => self.host.turn(*rotation),
        }

        Ok(())
    }

    fn eval_condition(&mut self, condition: &Expression) -> EvalResult<bool> {
        let Value::Bool(value) = self.eval_expression(condition)? else {
            unreachable!("condition was not a boolean");
        };

        Ok(value)
    }

    /// Evaluate a subscript or step-count expression down to its integer.
    fn eval_index(&mut self, expression: &Expression) -> EvalResult<i64> {
        let Value::Int(value) = self.eval_expression(expression)? else {
            unreachable!("index expression was not an int");
        };

        Ok(value)
    }

    fn eval_expression(&mut self, expression: &Expression) -> EvalResult<Value> {
        match expression {
            Expression::Num(value) => Ok(Value::Int(*value)),
            Expression::Real(value) => Ok(Value::Real(*value)),
            Expression::Str(value) => Ok(Value::Str(value.clone())),
            Expression::Bool(value) => Ok(Value::Bool(*value)),
            Expression::Loc(loc) => self.eval_loc(loc),
            Expression::Unary(unary) => self.eval_unary(unary),
            Expression::Binary(binary) => self.eval_binary(binary),
            Expression::Getter(getter) => Ok(self.eval_getter(getter)),
        }
    }

    fn eval_loc(&mut self, loc: &Loc) -> EvalResult<Value> {
        let mut indices = vec![];
        for index in &loc.indices {
            indices.push(self.eval_index(index)?);
        }

        let Some(mut current) = self.scope.resolve(&loc.name) else {
            unreachable!("reference to unresolved name '{}'", loc.name);
        };

        for index in indices {
            let Value::Array(items) = current else {
                unreachable!("too many subscripts on '{}'", loc.name);
            };

            if index < 0 {
                return Err(RuntimeError::NegativeIndex {
                    name: loc.name.clone(),
                    index,
                });
            }
            let Some(item) = items.get(index as usize) else {
                return Err(RuntimeError::IndexOutOfRange {
                    name: loc.name.clone(),
                    index,
                    size: items.len(),
                });
            };
            current = item;
        }

        Ok(current.clone())
    }

    fn eval_unary(&mut self, unary: &UnaryExpression) -> EvalResult<Value> {
        let operand = self.eval_expression(&unary.operand)?;

        let value = match (unary.operator, operand) {
            (UnaryOperator::Not, Value::Bool(value)) => Value::Bool(!value),
            (UnaryOperator::Minus, Value::Int(value)) => Value::Int(-value),
            (UnaryOperator::Minus, Value::Real(value)) => Value::Real(-value),
            _ => unreachable!("unary operator applied to an ill-typed operand"),
        };

        Ok(value)
    }

    fn eval_binary(&mut self, binary: &BinaryExpression) -> EvalResult<Value> {
        // || and && short-circuit: the right operand only runs if the left
        // one leaves the result open
        match binary.operator {
            BinaryOperator::Or => {
                if self.eval_condition(&binary.lhs)? {
                    return Ok(Value::Bool(true));
                }
                return Ok(Value::Bool(self.eval_condition(&binary.rhs)?));
            }
            BinaryOperator::And => {
                if !self.eval_condition(&binary.lhs)? {
                    return Ok(Value::Bool(false));
                }
                return Ok(Value::Bool(self.eval_condition(&binary.rhs)?));
            }
            _ => {}
        }

        let lhs = self.eval_expression(&binary.lhs)?;
        let rhs = self.eval_expression(&binary.rhs)?;

        match binary.operator {
            BinaryOperator::Equal => Ok(Value::Bool(Self::values_equal(&lhs, &rhs))),
            BinaryOperator::NotEqual => Ok(Value::Bool(!Self::values_equal(&lhs, &rhs))),
            BinaryOperator::LessEqual
            | BinaryOperator::GreaterEqual
            | BinaryOperator::LessThan
            | BinaryOperator::GreaterThan => Self::compare(binary.operator, lhs, rhs),
            BinaryOperator::Plus
            | BinaryOperator::Minus
            | BinaryOperator::Times
            | BinaryOperator::Divide => Self::arithmetic(binary.operator, lhs, rhs),
            BinaryOperator::Or | BinaryOperator::And => unreachable!("handled above"),
        }
    }

    /// Equality after numeric promotion; everything else is plain value
    /// identity (strings compare by codepoints).
    fn values_equal(lhs: &Value, rhs: &Value) -> bool {
        match (lhs, rhs) {
            (Value::Int(int), Value::Real(real)) | (Value::Real(real), Value::Int(int)) => {
                *int as f64 == *real
            }
            _ => lhs == rhs,
        }
    }

    fn compare(operator: BinaryOperator, lhs: Value, rhs: Value) -> EvalResult<Value> {
        let result = match (lhs, rhs) {
            (Value::Int(lhs), Value::Int(rhs)) => match operator {
                BinaryOperator::LessEqual => lhs <= rhs,
                BinaryOperator::GreaterEqual => lhs >= rhs,
                BinaryOperator::LessThan => lhs < rhs,
                _ => lhs > rhs,
            },
            (lhs, rhs) => {
                let (lhs, rhs) = (Self::as_real(&lhs), Self::as_real(&rhs));
                match operator {
                    BinaryOperator::LessEqual => lhs <= rhs,
                    BinaryOperator::GreaterEqual => lhs >= rhs,
                    BinaryOperator::LessThan => lhs < rhs,
                    _ => lhs > rhs,
                }
            }
        };

        Ok(Value::Bool(result))
    }

    /// Arithmetic stays in `int` when both operands are ints (with truncating
    /// division) and is carried out in `double` otherwise.
    fn arithmetic(operator: BinaryOperator, lhs: Value, rhs: Value) -> EvalResult<Value> {
        if let (Value::Int(lhs), Value::Int(rhs)) = (&lhs, &rhs) {
            let value = match operator {
                BinaryOperator::Plus => lhs + rhs,
                BinaryOperator::Minus => lhs - rhs,
                BinaryOperator::Times => lhs * rhs,
                _ => {
                    if *rhs == 0 {
                        return Err(RuntimeError::DivisionByZero);
                    }
                    lhs / rhs
                }
            };

            return Ok(Value::Int(value));
        }

        let (lhs, rhs) = (Self::as_real(&lhs), Self::as_real(&rhs));
        let value = match operator {
            BinaryOperator::Plus => lhs + rhs,
            BinaryOperator::Minus => lhs - rhs,
            BinaryOperator::Times => lhs * rhs,
            _ => {
                if rhs == 0.0 {
                    return Err(RuntimeError::DivisionByZero);
                }
                lhs / rhs
            }
        };

        Ok(Value::Real(value))
    }

    fn as_real(value: &Value) -> f64 {
        match value {
            Value::Int(value) => *value as f64,
            Value::Real(value) => *value,
            _ => unreachable!("numeric operator applied to a non-numeric value"),
        }
    }

    fn eval_getter(&mut self, getter: &RoverGetter) -> Value {
        match getter {
            RoverGetter::Orientation => Value::Int(self.host.orientation()),
            RoverGetter::XPos => Value::Int(self.host.x_pos()),
            RoverGetter::YPos => Value::Int(self.host.y_pos()),
            RoverGetter::Gold => Value::Int(self.host.gold()),
            RoverGetter::Silver => Value::Int(self.host.silver()),
            RoverGetter::Copper => Value::Int(self.host.copper()),
            RoverGetter::Iron => Value::Int(self.host.iron()),
            RoverGetter::Power => Value::Int(self.host.power()),
            RoverGetter::Sonar => Value::Int(self.host.sonar()),
            RoverGetter::MaxMove(direction) => Value::Int(self.host.max_move(*direction)),
            RoverGetter::CanMove(direction) => Value::Bool(self.host.can_move(*direction)),
        }
    }
}

//! # Typechecker
//!
//! Single traversal over the AST. Every expression node yields a
//! [`TypeDescriptor`]; statements and declarations yield nothing but may
//! fail. Scoping mirrors the evaluator: a block pushes a frame on entry and
//! pops it on exit, on success and failure alike.
//!
//! The type lattice is small: `int` widens to `double` in mixed arithmetic
//! and comparisons, logical operators demand `bool`, equality accepts two
//! operands of equal base or a numeric pair, and relational operators demand
//! numerics. Assignment allows equal bases or the `double ← int` widening,
//! never the demotion.

mod error;
mod scope;
mod types;

pub use self::error::*;
pub use self::scope::*;
pub use self::types::*;

use crate::parser::ast::{
    Assignment, BinaryExpression, BinaryOperator, Block, Declaration, Expression, IfStatement,
    Loc, PrintStatement, Program, RoverAction, RoverGetter, Statement, UnaryExpression,
    UnaryOperator, WhileLoop,
};

/// Result of type checking a node within the AST.
type TResult<T> = Result<T, TypeError>;

/// Struct for type checking a parsed program.
pub struct Typechecker;

impl Typechecker {
    /// Check a whole program against an empty scope stack.
    pub fn check(program: &Program) -> TResult<()> {
        let mut scope = TypeScope::default();

        Self::check_block(&mut scope, &program.block)
    }

    /// Frames are popped on every exit path, so the stack depth after a block
    /// always equals the depth before it.
    fn check_block(scope: &mut TypeScope, block: &Block) -> TResult<()> {
        scope.push();
        let result = Self::check_block_contents(scope, block);
        scope.pop();

        result
    }

    fn check_block_contents(scope: &mut TypeScope, block: &Block) -> TResult<()> {
        for declaration in &block.declarations {
            Self::check_declaration(scope, declaration)?;
        }
        for statement in &block.statements {
            Self::check_statement(scope, statement)?;
        }

        Ok(())
    }

    fn check_declaration(scope: &mut TypeScope, declaration: &Declaration) -> TResult<()> {
        scope.declare(
            &declaration.name,
            DeclaredType {
                base: declaration.base,
                shape: declaration.dimensions.clone(),
            },
        )
    }

    fn check_statement(scope: &mut TypeScope, statement: &Statement) -> TResult<()> {
        match statement {
            Statement::Empty => Ok(()),
            Statement::Block(block) => Self::check_block(scope, block),
            Statement::Assignment(assignment) => Self::check_assignment(scope, assignment),
            Statement::If(IfStatement {
                condition,
                then_branch,
                else_branch,
            }) => {
                Self::check_condition(scope, condition)?;
                Self::check_statement(scope, then_branch)?;
                if let Some(else_branch) = else_branch {
                    Self::check_statement(scope, else_branch)?;
                }

                Ok(())
            }
            Statement::While(WhileLoop { condition, body }) => {
                Self::check_condition(scope, condition)?;
                Self::check_statement(scope, body)
            }
            Statement::Print(PrintStatement { value }) => {
                // expression checking already rejects array values
                Self::check_expression(scope, value)?;

                Ok(())
            }
            Statement::Rover(action) => Self::check_action(scope, action),
        }
    }

    fn check_condition(scope: &TypeScope, condition: &Expression) -> TResult<()> {
        let descriptor = Self::check_expression(scope, condition)?;
        if descriptor != TypeDescriptor::scalar(Base::Bool) {
            return Err(TypeError::Mismatch(format!(
                "condition must be a boolean, not '{descriptor}'"
            )));
        }

        Ok(())
    }

    fn check_assignment(scope: &mut TypeScope, assignment: &Assignment) -> TResult<()> {
        let target = Self::check_loc(scope, &assignment.target)?;
        if !target.is_scalar() {
            return Err(TypeError::Mismatch(format!(
                "cannot assign to '{}': it still has type '{target}'",
                assignment.target.name
            )));
        }

        let value = Self::check_expression(scope, &assignment.value)?;
        let widening = target.base == Base::Double && value.base == Base::Int;
        if target.base != value.base && !widening {
            return Err(TypeError::Mismatch(format!(
                "cannot assign a value of type '{}' to '{}' of type '{}'",
                value.base, assignment.target.name, target.base
            )));
        }

        Ok(())
    }

    fn check_action(scope: &mut TypeScope, action: &RoverAction) -> TResult<()> {
        match action {
            RoverAction::Move { steps, .. } => {
                let descriptor = Self::check_expression(scope, steps)?;
                if descriptor != TypeDescriptor::scalar(Base::Int) {
                    return Err(TypeError::Mismatch(format!(
                        "move takes an int step count, not '{descriptor}'"
                    )));
                }

                Ok(())
            }
            RoverAction::ChangeMap(path) => {
                let descriptor = Self::check_expression(scope, path)?;
                if descriptor != TypeDescriptor::scalar(Base::Str) {
                    return Err(TypeError::Mismatch(format!(
                        "change_map takes a string path, not '{descriptor}'"
                    )));
                }

                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn check_expression(scope: &TypeScope, expression: &Expression) -> TResult<TypeDescriptor> {
        match expression {
            Expression::Num(_) => Ok(TypeDescriptor::scalar(Base::Int)),
            Expression::Real(_) => Ok(TypeDescriptor::scalar(Base::Double)),
            Expression::Str(_) => Ok(TypeDescriptor::scalar(Base::Str)),
            Expression::Bool(_) => Ok(TypeDescriptor::scalar(Base::Bool)),
            Expression::Loc(loc) => {
                let descriptor = Self::check_loc(scope, loc)?;
                if !descriptor.is_scalar() {
                    return Err(TypeError::Mismatch(format!(
                        "'{}' has type '{descriptor}' but a scalar is required",
                        loc.name
                    )));
                }

                Ok(descriptor)
            }
            Expression::Unary(UnaryExpression { operator, operand }) => {
                let descriptor = Self::check_expression(scope, operand)?;
                let accepted = match operator {
                    UnaryOperator::Not => descriptor == TypeDescriptor::scalar(Base::Bool),
                    UnaryOperator::Minus => descriptor.is_numeric(),
                };
                if !accepted {
                    return Err(TypeError::Mismatch(format!(
                        "operator '{operator}' cannot be applied to '{descriptor}'"
                    )));
                }

                Ok(descriptor)
            }
            Expression::Binary(binary) => Self::check_binary(scope, binary),
            Expression::Getter(getter) => Ok(match getter {
                RoverGetter::CanMove(_) => TypeDescriptor::scalar(Base::Bool),
                _ => TypeDescriptor::scalar(Base::Int),
            }),
        }
    }

    fn check_binary(scope: &TypeScope, binary: &BinaryExpression) -> TResult<TypeDescriptor> {
        let lhs = Self::check_expression(scope, &binary.lhs)?;
        let rhs = Self::check_expression(scope, &binary.rhs)?;
        let operator = binary.operator;

        let mismatch = || {
            TypeError::Mismatch(format!(
                "operator '{operator}' cannot be applied to '{lhs}' and '{rhs}'"
            ))
        };

        match operator {
            BinaryOperator::Or | BinaryOperator::And => {
                let boolean = TypeDescriptor::scalar(Base::Bool);
                if lhs != boolean || rhs != boolean {
                    return Err(mismatch());
                }

                Ok(boolean)
            }
            BinaryOperator::Equal | BinaryOperator::NotEqual => {
                let numeric_pair = lhs.is_numeric() && rhs.is_numeric();
                if lhs.base != rhs.base && !numeric_pair {
                    return Err(mismatch());
                }

                Ok(TypeDescriptor::scalar(Base::Bool))
            }
            BinaryOperator::LessEqual
            | BinaryOperator::GreaterEqual
            | BinaryOperator::LessThan
            | BinaryOperator::GreaterThan => {
                if !lhs.is_numeric() || !rhs.is_numeric() {
                    return Err(mismatch());
                }

                Ok(TypeDescriptor::scalar(Base::Bool))
            }
            BinaryOperator::Plus
            | BinaryOperator::Minus
            | BinaryOperator::Times
            | BinaryOperator::Divide => {
                if !lhs.is_numeric() || !rhs.is_numeric() {
                    return Err(mismatch());
                }

                if lhs.base == Base::Int && rhs.base == Base::Int {
                    Ok(TypeDescriptor::scalar(Base::Int))
                } else {
                    Ok(TypeDescriptor::scalar(Base::Double))
                }
            }
        }
    }

    /// Resolve a location. With `k` subscripts on a declared rank `r`, the
    /// result keeps the declared base and has `r - k` dimensions left; more
    /// subscripts than dimensions is an error.
    fn check_loc(scope: &TypeScope, loc: &Loc) -> TResult<TypeDescriptor> {
        let declared = scope.resolve(&loc.name)?.clone();

        for index in &loc.indices {
            let descriptor = Self::check_expression(scope, index)?;
            if descriptor != TypeDescriptor::scalar(Base::Int) {
                return Err(TypeError::Mismatch(format!(
                    "array index must be of type int, not '{descriptor}'"
                )));
            }
        }

        if loc.indices.len() > declared.rank() {
            return Err(TypeError::InvalidSubscript {
                name: loc.name.clone(),
                declared: declared.rank(),
                given: loc.indices.len(),
            });
        }

        Ok(TypeDescriptor {
            base: declared.base,
            dims: declared.rank() - loc.indices.len(),
        })
    }
}

use std::collections::HashMap;

use super::{error::RuntimeError, value::Value};

/// Stack of value scopes used while running a program, parallel to the
/// typechecker's scope stack.
#[derive(Default, Debug)]
pub struct Scope {
    frames: Vec<HashMap<String, Value>>,
}

impl Scope {
    /// Push a new scope frame.
    pub fn push(&mut self) {
        self.frames.push(HashMap::new());
    }

    /// Pop the innermost scope frame.
    pub fn pop(&mut self) {
        self.frames.pop();
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Bind a name in the innermost frame, shadowing any outer binding.
    pub fn declare(&mut self, name: &str, value: Value) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.to_owned(), value);
        }
    }

    /// Look a name up, innermost scope first.
    pub fn resolve(&self, name: &str) -> Option<&Value> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    fn resolve_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.frames
            .iter_mut()
            .rev()
            .find_map(|frame| frame.get_mut(name))
    }

    /// Write into the cell addressed by `indices`, descending one array level
    /// per index. The stored value is updated in place; the incoming value is
    /// adapted to the cell's base type (truncation into int cells, widening
    /// into double cells).
    pub fn assign_cell(
        &mut self,
        name: &str,
        indices: &[i64],
        value: Value,
    ) -> Result<(), RuntimeError> {
        let Some(mut slot) = self.resolve_mut(name) else {
            unreachable!("assignment to unresolved name '{name}'");
        };

        for &index in indices {
            let Value::Array(items) = slot else {
                unreachable!("too many subscripts on '{name}'");
            };

            if index < 0 {
                return Err(RuntimeError::NegativeIndex {
                    name: name.to_owned(),
                    index,
                });
            }

            let size = items.len();
            let Some(cell) = items.get_mut(index as usize) else {
                return Err(RuntimeError::IndexOutOfRange {
                    name: name.to_owned(),
                    index,
                    size,
                });
            };
            slot = cell;
        }

        let converted = value.adapted_to(&*slot);
        *slot = converted;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Base;

    #[test]
    fn test_assign_scalar() {
        let mut scope = Scope::default();
        scope.push();
        scope.declare("x", Value::zero(Base::Int));

        scope.assign_cell("x", &[], Value::Int(42)).unwrap();

        assert_eq!(scope.resolve("x"), Some(&Value::Int(42)));
    }

    #[test]
    fn test_assign_nested_cell_mutates_stored_array() {
        let mut scope = Scope::default();
        scope.push();
        scope.declare("a", Value::for_declaration(Base::Int, &[2, 2]));

        scope.assign_cell("a", &[1, 0], Value::Int(7)).unwrap();

        let expected = Value::Array(vec![
            Value::Array(vec![Value::Int(0), Value::Int(0)]),
            Value::Array(vec![Value::Int(7), Value::Int(0)]),
        ]);
        assert_eq!(scope.resolve("a"), Some(&expected));
    }

    #[test]
    fn test_assign_truncates_into_int_cell() {
        let mut scope = Scope::default();
        scope.push();
        scope.declare("x", Value::zero(Base::Int));

        scope.assign_cell("x", &[], Value::Real(3.9)).unwrap();

        assert_eq!(scope.resolve("x"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_assign_widens_into_double_cell() {
        let mut scope = Scope::default();
        scope.push();
        scope.declare("d", Value::zero(Base::Double));

        scope.assign_cell("d", &[], Value::Int(3)).unwrap();

        assert_eq!(scope.resolve("d"), Some(&Value::Real(3.0)));
    }

    #[test]
    fn test_assign_out_of_range() {
        let mut scope = Scope::default();
        scope.push();
        scope.declare("a", Value::for_declaration(Base::Int, &[2]));

        assert_eq!(
            scope.assign_cell("a", &[2], Value::Int(1)),
            Err(RuntimeError::IndexOutOfRange {
                name: "a".into(),
                index: 2,
                size: 2,
            })
        );
        assert_eq!(
            scope.assign_cell("a", &[-1], Value::Int(1)),
            Err(RuntimeError::NegativeIndex {
                name: "a".into(),
                index: -1,
            })
        );
    }

    #[test]
    fn test_shadowed_binding_is_updated() {
        let mut scope = Scope::default();
        scope.push();
        scope.declare("x", Value::Int(1));
        scope.push();
        scope.declare("x", Value::Int(2));

        scope.assign_cell("x", &[], Value::Int(3)).unwrap();
        assert_eq!(scope.resolve("x"), Some(&Value::Int(3)));

        scope.pop();
        assert_eq!(scope.resolve("x"), Some(&Value::Int(1)));
    }
}

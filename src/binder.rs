//! The parameter binder compiler.
//!
//! A [`Binder`] is compiled once per (type, query text) pair and reused for
//! every subsequent execution under that key: the placeholder scan and the
//! property lookup happen at compilation, never again per call.

use tracing::debug;

use crate::driver::Command;
use crate::entity::{property_index, Entity};
use crate::scan::placeholders;
use crate::value::Value;
use crate::{Error, Result};

struct BindStep<T> {
    name: String,
    get: fn(&T) -> Value,
}

/// A compiled function that writes an object's property values into a
/// command's named parameters.
///
/// Immutable after compilation and safe to invoke concurrently; each call
/// operates solely on the command and object it is handed.
pub struct Binder<T> {
    steps: Vec<BindStep<T>>,
}

impl<T: Entity> Binder<T> {
    /// Compiles a binder for `T` against `sql`.
    ///
    /// Every placeholder in the query text must match a property of `T`
    /// case-insensitively; a single miss aborts compilation with
    /// [`Error::MissingProperty`] and produces no partial binder.
    pub fn compile(sql: &str) -> Result<Self> {
        let names = placeholders(sql)?;
        let index = property_index::<T>();

        let mut steps = Vec::with_capacity(names.len());
        for name in names {
            let Some(property) = index.get(&name) else {
                return Err(Error::MissingProperty {
                    entity: std::any::type_name::<T>(),
                    placeholder: name,
                });
            };

            debug!(
                "  mapping property [{}].[{}] to parameter [{}]",
                std::any::type_name::<T>(),
                property.name,
                name
            );
            steps.push(BindStep {
                name,
                get: property.get,
            });
        }

        Ok(Self { steps })
    }

    /// Sets exactly one parameter per placeholder, named by its lower-cased
    /// placeholder text and carrying the property's current value (`Null`
    /// when the property holds `None`). Performs no execution.
    pub fn apply(&self, command: &mut dyn Command, source: &T) -> Result<()> {
        for step in &self.steps {
            command.add_parameter(&step.name, (step.get)(source))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::RowReader;
    use crate::entity;

    entity! {
        struct Person {
            name: String,
            age: i32,
        }
    }

    #[derive(Default)]
    struct RecordingCommand {
        parameters: Vec<(String, Value)>,
    }

    impl Command for RecordingCommand {
        fn set_text(&mut self, _sql: &str) {}

        fn add_parameter(&mut self, name: &str, value: Value) -> Result<()> {
            self.parameters.push((name.to_owned(), value));
            Ok(())
        }

        fn execute(&mut self) -> Result<u64> {
            Ok(0)
        }

        fn query(&mut self) -> Result<Box<dyn RowReader + '_>> {
            unimplemented!("not used by binder tests")
        }
    }

    #[test]
    fn test_binder_sets_one_parameter_per_placeholder() {
        let binder = Binder::<Person>::compile(
            "SELECT * FROM people WHERE name = @name AND age = @age",
        )
        .unwrap();

        let person = Person {
            name: "Ann".into(),
            age: 30,
        };
        let mut command = RecordingCommand::default();
        binder.apply(&mut command, &person).unwrap();

        assert_eq!(
            command.parameters,
            vec![
                ("name".to_owned(), Value::String("Ann".into())),
                ("age".to_owned(), Value::I32(30)),
            ]
        );
    }

    #[test]
    fn test_placeholder_matching_is_case_insensitive() {
        let binder =
            Binder::<Person>::compile("UPDATE people SET age = @AGE WHERE name = @Name")
                .unwrap();

        let person = Person {
            name: "Ann".into(),
            age: 31,
        };
        let mut command = RecordingCommand::default();
        binder.apply(&mut command, &person).unwrap();

        // Parameter names are the lower-cased placeholder text.
        assert_eq!(command.parameters[0].0, "age");
        assert_eq!(command.parameters[1].0, "name");
    }

    #[test]
    fn test_repeated_placeholder_bound_once() {
        let binder = Binder::<Person>::compile(
            "SELECT * FROM people WHERE name = @name OR alias = @name",
        )
        .unwrap();

        let mut command = RecordingCommand::default();
        binder.apply(&mut command, &Person::default()).unwrap();
        assert_eq!(command.parameters.len(), 1);
    }

    #[test]
    fn test_missing_property_fails_compilation() {
        let result = Binder::<Person>::compile("SELECT * FROM people WHERE x = @missing");
        match result.err() {
            Some(Error::MissingProperty { placeholder, .. }) => {
                assert_eq!(placeholder, "missing");
            }
            other => panic!("expected MissingProperty, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_property_names_the_type() {
        let err = Binder::<Person>::compile("DELETE FROM t WHERE a = @name AND b = @nope")
            .err()
            .unwrap();
        assert!(err.to_string().contains("Person"));
        assert!(err.to_string().contains("nope"));
    }

    entity! {
        struct Note {
            body: Option<String>,
        }
    }

    #[test]
    fn test_none_property_binds_null() {
        let binder = Binder::<Note>::compile("INSERT INTO notes (body) VALUES (@body)")
            .unwrap();

        let mut command = RecordingCommand::default();
        binder.apply(&mut command, &Note { body: None }).unwrap();
        assert_eq!(command.parameters, vec![("body".to_owned(), Value::Null)]);
    }
}

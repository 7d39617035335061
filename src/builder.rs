//! The row builder compiler.
//!
//! A [`Builder`] is compiled once per (type, query text) pair against the
//! column layout of the first result set seen under that key, and reused to
//! materialize every subsequent row. The layout is frozen at compilation: if
//! a textually identical query later returns a different column set, the
//! cached builder keeps its original shape (see the cache module docs).

use tracing::debug;

use crate::driver::RowReader;
use crate::entity::{property_index, Entity};
use crate::value::Value;
use crate::{Error, Result};

struct BuildStep<T> {
    ordinal: usize,
    column: String,
    property: &'static str,
    set: fn(&mut T, Value) -> std::result::Result<(), Value>,
}

/// A compiled function that materializes a new instance of the target type
/// from a result row.
///
/// Immutable after compilation and safe to invoke concurrently. A failed
/// conversion aborts only the row being materialized; the builder remains
/// valid for every following row.
pub struct Builder<T> {
    steps: Vec<BuildStep<T>>,
}

impl<T: Entity> Builder<T> {
    /// Compiles a builder for `T` against the ordered column layout of a
    /// result set.
    ///
    /// Columns with no case-insensitive property match are skipped;
    /// properties with no matching column are left at their default.
    pub fn compile(columns: &[String]) -> Self {
        let index = property_index::<T>();

        let mut steps = Vec::new();
        for (ordinal, column) in columns.iter().enumerate() {
            let name = column.to_lowercase();
            let Some(property) = index.get(&name) else {
                continue;
            };

            debug!(
                "  mapping column [{}] to [{}].[{}]",
                name,
                std::any::type_name::<T>(),
                property.name
            );
            steps.push(BuildStep {
                ordinal,
                column: name,
                property: property.name,
                set: property.set,
            });
        }

        Self { steps }
    }

    /// Materializes one row. The caller must already have advanced the
    /// reader to a valid row.
    ///
    /// Database NULLs become `Value::Null`: `None` for `Option` properties,
    /// [`Error::Conversion`] for anything else.
    pub fn apply(&self, reader: &dyn RowReader) -> Result<T> {
        let mut obj = T::default();
        for step in &self.steps {
            let value = if reader.is_null(step.ordinal) {
                Value::Null
            } else {
                reader.value(step.ordinal)
            };

            (step.set)(&mut obj, value).map_err(|rejected| Error::Conversion {
                column: step.column.clone(),
                property: step.property.to_owned(),
                value: rejected,
            })?;
        }
        Ok(obj)
    }
}

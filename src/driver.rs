//! Boundary traits for the underlying database connectivity.
//!
//! The mapping core never talks to a database directly; it drives these
//! traits and leaves connection management, transactions, and the wire
//! protocol to the implementation. Driver failures are wrapped with
//! [`Error::database`](crate::Error::database) and propagate untranslated.

use crate::value::Value;
use crate::Result;

/// A source of executable commands.
pub trait Connection {
    fn create_command(&mut self) -> Result<Box<dyn Command + '_>>;
}

/// A single executable statement with named parameters.
pub trait Command {
    /// Sets the query text to execute.
    fn set_text(&mut self, sql: &str);

    /// Registers one named parameter carrying `value`.
    fn add_parameter(&mut self, name: &str, value: Value) -> Result<()>;

    /// Executes without producing rows, returning the affected-row count.
    fn execute(&mut self) -> Result<u64>;

    /// Executes and returns a reader positioned before the first row.
    fn query(&mut self) -> Result<Box<dyn RowReader + '_>>;
}

/// Sequential access to the rows and columns of a result set.
pub trait RowReader {
    /// Advances to the next row; `false` once the result set is exhausted.
    fn next_row(&mut self) -> Result<bool>;

    fn field_count(&self) -> usize;

    fn column_name(&self, ordinal: usize) -> &str;

    /// Whether the current row holds a database NULL at `ordinal`.
    fn is_null(&self, ordinal: usize) -> bool;

    /// The current row's raw value at `ordinal`.
    fn value(&self, ordinal: usize) -> Value;
}

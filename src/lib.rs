//! # simple-sql
//!
//! A data-mapping layer that binds application objects to parameterized
//! query execution and rebuilds application objects from result rows,
//! without hand-written binding code per query or per type.
//!
//! ## Features
//!
//! - **Named Placeholders**: Use `@param_name` in query text; placeholders
//!   are matched case-insensitively against the bind type's properties
//! - **Compiled Accessors**: The placeholder scan and property matching run
//!   once per (type, query) pair; the resulting binder/builder is memoized
//!   and reused for every later execution
//! - **Driver Agnostic**: The core drives the [`Connection`] / [`Command`] /
//!   [`RowReader`] traits and never touches a database itself
//! - **Thread Safe**: Compiled accessors are immutable and freely shared;
//!   the caches handle concurrent first use with exactly one compilation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use simple_sql::{entity, execute_object_non_query, execute_object_for_list};
//!
//! entity! {
//!     pub struct Person {
//!         pub name: String,
//!         pub age: i32,
//!     }
//! }
//!
//! # fn example(conn: &mut dyn simple_sql::Connection) -> simple_sql::Result<()> {
//! let ann = Person { name: "Ann".into(), age: 30 };
//!
//! execute_object_non_query(
//!     conn,
//!     "INSERT INTO people (name, age) VALUES (@name, @age)",
//!     &ann,
//! )?;
//!
//! let adults: Vec<Person> = execute_object_for_list(
//!     conn,
//!     "SELECT name, age FROM people WHERE age >= @age",
//!     &Person { name: String::new(), age: 18 },
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! ## How It Works
//!
//! 1. **Scan**: the query text is scanned for `@identifier` placeholders
//!    (distinct, lower-cased, first-occurrence order)
//! 2. **Match**: placeholder and column names are matched case-insensitively
//!    against the type's property index; an unmatched placeholder fails
//!    compilation, an unmatched column is skipped
//! 3. **Compile**: the matches are assembled into a [`Binder`] (object →
//!    command parameters) or [`Builder`] (result row → new object)
//! 4. **Memoize**: compiled accessors are cached process-wide by
//!    (type, query text) and never recompiled or evicted
//!
//! ## Limitations
//!
//! - Query text is never parsed as SQL; an `@identifier` inside a string
//!   literal or comment is still treated as a placeholder
//! - Only flat scalar properties are mapped; no nested object graphs
//! - A row builder's shape is frozen by the first result layout seen for its
//!   (type, query) pair; a later layout change under the same text is not
//!   detected
//! - No transaction or connection-pool management
//!
//! ## License
//!
//! Licensed under either of Apache License, Version 2.0 or MIT license at
//! your option.

pub mod binder;
pub mod builder;
pub mod cache;
pub mod driver;
pub mod entity;
pub mod error;
pub mod exec;
pub mod scan;
pub mod value;

pub use binder::Binder;
pub use builder::Builder;
pub use cache::{binder_for, builder_for};
pub use driver::{Command, Connection, RowReader};
pub use entity::{property_index, Entity, Property};
pub use error::{BoxDynError, Error, Result};
pub use exec::{
    execute_for_list, execute_for_one, execute_for_scalar, execute_non_query,
    execute_object_for_list, execute_object_for_one, execute_object_for_scalar,
    execute_object_non_query, execute_params_for_list, execute_params_for_one,
    execute_params_for_scalar, execute_params_non_query,
};
pub use value::{FromValue, Value};

/// Convenience re-exports for common use cases
pub mod prelude {
    pub use crate::driver::{Command, Connection, RowReader};
    pub use crate::entity::{Entity, Property};
    pub use crate::error::{Error, Result};
    pub use crate::exec::*;
    pub use crate::value::{FromValue, Value};
}

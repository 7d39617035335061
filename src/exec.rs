//! Thin execution wrappers driving the mapping core.
//!
//! Each query shape comes in three forms: plain (no parameters),
//! object-bound (`*_object_*`, placeholders filled from an [`Entity`]'s
//! properties through the memoized binder), and positional (`*_params_*`,
//! values registered under stringified 1-based ordinal names, bypassing the
//! mapping core entirely).
//!
//! Result shapes: `non_query` for statements without rows, `for_scalar` for
//! the first row's first column, `for_one` and `for_list` for entity rows
//! materialized through the memoized row builder.

use tracing::debug;

use crate::cache::{binder_for, builder_for};
use crate::driver::{Command, Connection, RowReader};
use crate::entity::Entity;
use crate::value::{FromValue, Value};
use crate::{Error, Result};

/// Executes a statement without parameters or rows.
pub fn execute_non_query(conn: &mut dyn Connection, sql: &str) -> Result<u64> {
    debug!("execute_non_query with query: {sql}");
    command_for(conn, sql)?.execute()
}

/// Executes a statement, filling its placeholders from `source`'s properties.
pub fn execute_object_non_query<T: Entity>(
    conn: &mut dyn Connection,
    sql: &str,
    source: &T,
) -> Result<u64> {
    debug!("execute_object_non_query with query: {sql}");
    command_from_object(conn, sql, source)?.execute()
}

/// Executes a statement with positional parameters.
pub fn execute_params_non_query(
    conn: &mut dyn Connection,
    sql: &str,
    params: &[Value],
) -> Result<u64> {
    debug!("execute_params_non_query with query: {sql}");
    command_from_params(conn, sql, params)?.execute()
}

/// Fetches the first row's first column, converted to `S`. `None` when the
/// result set is empty.
pub fn execute_for_scalar<S: FromValue>(
    conn: &mut dyn Connection,
    sql: &str,
) -> Result<Option<S>> {
    debug!("execute_for_scalar with query: {sql}");
    read_scalar(command_for(conn, sql)?.as_mut())
}

/// Scalar fetch with placeholders filled from `source`'s properties.
pub fn execute_object_for_scalar<T: Entity, S: FromValue>(
    conn: &mut dyn Connection,
    sql: &str,
    source: &T,
) -> Result<Option<S>> {
    debug!("execute_object_for_scalar with query: {sql}");
    read_scalar(command_from_object(conn, sql, source)?.as_mut())
}

/// Scalar fetch with positional parameters.
pub fn execute_params_for_scalar<S: FromValue>(
    conn: &mut dyn Connection,
    sql: &str,
    params: &[Value],
) -> Result<Option<S>> {
    debug!("execute_params_for_scalar with query: {sql}");
    read_scalar(command_from_params(conn, sql, params)?.as_mut())
}

/// Materializes the first result row as a `T`. `None` when the result set is
/// empty.
pub fn execute_for_one<T: Entity>(
    conn: &mut dyn Connection,
    sql: &str,
) -> Result<Option<T>> {
    debug!("execute_for_one with query: {sql}");
    read_one(command_for(conn, sql)?.as_mut(), sql)
}

/// Single-row fetch with placeholders filled from `source`'s properties.
pub fn execute_object_for_one<T: Entity, B: Entity>(
    conn: &mut dyn Connection,
    sql: &str,
    source: &B,
) -> Result<Option<T>> {
    debug!("execute_object_for_one with query: {sql}");
    read_one(command_from_object(conn, sql, source)?.as_mut(), sql)
}

/// Single-row fetch with positional parameters.
pub fn execute_params_for_one<T: Entity>(
    conn: &mut dyn Connection,
    sql: &str,
    params: &[Value],
) -> Result<Option<T>> {
    debug!("execute_params_for_one with query: {sql}");
    read_one(command_from_params(conn, sql, params)?.as_mut(), sql)
}

/// Materializes every result row as a `T`.
pub fn execute_for_list<T: Entity>(conn: &mut dyn Connection, sql: &str) -> Result<Vec<T>> {
    debug!("execute_for_list with query: {sql}");
    read_list(command_for(conn, sql)?.as_mut(), sql)
}

/// List fetch with placeholders filled from `source`'s properties.
pub fn execute_object_for_list<T: Entity, B: Entity>(
    conn: &mut dyn Connection,
    sql: &str,
    source: &B,
) -> Result<Vec<T>> {
    debug!("execute_object_for_list with query: {sql}");
    read_list(command_from_object(conn, sql, source)?.as_mut(), sql)
}

/// List fetch with positional parameters.
pub fn execute_params_for_list<T: Entity>(
    conn: &mut dyn Connection,
    sql: &str,
    params: &[Value],
) -> Result<Vec<T>> {
    debug!("execute_params_for_list with query: {sql}");
    read_list(command_from_params(conn, sql, params)?.as_mut(), sql)
}

//------- command construction -------------------------------------------

fn command_for<'c>(
    conn: &'c mut dyn Connection,
    sql: &str,
) -> Result<Box<dyn Command + 'c>> {
    let mut command = conn.create_command()?;
    command.set_text(sql);
    Ok(command)
}

fn command_from_object<'c, T: Entity>(
    conn: &'c mut dyn Connection,
    sql: &str,
    source: &T,
) -> Result<Box<dyn Command + 'c>> {
    // Compile (or fetch) the binder before the command exists, so a
    // missing-property failure never touches a half-built command.
    let binder = binder_for::<T>(sql)?;
    let mut command = command_for(conn, sql)?;
    binder.apply(command.as_mut(), source)?;
    Ok(command)
}

fn command_from_params<'c>(
    conn: &'c mut dyn Connection,
    sql: &str,
    params: &[Value],
) -> Result<Box<dyn Command + 'c>> {
    let mut command = command_for(conn, sql)?;
    for (i, value) in params.iter().enumerate() {
        // 1-based ordinal names, matching the positional convention.
        let name = (i + 1).to_string();
        debug!("  [{name}] = [{value:?}]");
        command.add_parameter(&name, value.clone())?;
    }
    Ok(command)
}

//------- result assembly ------------------------------------------------

fn layout(reader: &dyn RowReader) -> Vec<String> {
    (0..reader.field_count())
        .map(|i| reader.column_name(i).to_owned())
        .collect()
}

fn read_scalar<S: FromValue>(command: &mut dyn Command) -> Result<Option<S>> {
    let mut reader = command.query()?;
    if !reader.next_row()? {
        return Ok(None);
    }

    let column = reader.column_name(0).to_owned();
    let value = if reader.is_null(0) {
        Value::Null
    } else {
        reader.value(0)
    };
    // Scalar fetches have no property; label the diagnostic with the bare
    // target type instead (no module path).
    let target = std::any::type_name::<S>();
    let target = target.rsplit("::").next().unwrap_or(target);
    S::from_value(value)
        .map(Some)
        .map_err(|rejected| Error::Conversion {
            column,
            property: target.to_owned(),
            value: rejected,
        })
}

fn read_one<T: Entity>(command: &mut dyn Command, sql: &str) -> Result<Option<T>> {
    let mut reader = command.query()?;
    let builder = builder_for::<T>(sql, &layout(reader.as_ref()))?;
    if !reader.next_row()? {
        return Ok(None);
    }
    builder.apply(reader.as_ref()).map(Some)
}

fn read_list<T: Entity>(command: &mut dyn Command, sql: &str) -> Result<Vec<T>> {
    let mut reader = command.query()?;
    let builder = builder_for::<T>(sql, &layout(reader.as_ref()))?;

    let mut items = Vec::new();
    while reader.next_row()? {
        items.push(builder.apply(reader.as_ref())?);
    }
    debug!("read [{}] rows", items.len());
    Ok(items)
}

//! Basic example demonstrating object binding and row materialization
//! against a small in-memory driver.
//!
//! Run with: cargo run --example basic
//!
//! Set RUST_LOG=debug to see the compilation and execution trace.

use simple_sql::prelude::*;
use simple_sql::entity;

entity! {
    pub struct Person {
        pub name: String,
        pub age: i32,
        pub nickname: Option<String>,
    }
}

/// A minimal in-memory driver: every query is answered with the same canned
/// result set, and executed commands are printed. A real driver would
/// implement the same three traits over an actual database connection.
struct DemoConnection {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Connection for DemoConnection {
    fn create_command(&mut self) -> Result<Box<dyn Command + '_>> {
        Ok(Box::new(DemoCommand {
            conn: self,
            sql: String::new(),
            parameters: Vec::new(),
        }))
    }
}

struct DemoCommand<'c> {
    conn: &'c mut DemoConnection,
    sql: String,
    parameters: Vec<(String, Value)>,
}

impl Command for DemoCommand<'_> {
    fn set_text(&mut self, sql: &str) {
        self.sql = sql.to_owned();
    }

    fn add_parameter(&mut self, name: &str, value: Value) -> Result<()> {
        self.parameters.push((name.to_owned(), value));
        Ok(())
    }

    fn execute(&mut self) -> Result<u64> {
        println!("  executing: {}", self.sql);
        for (name, value) in &self.parameters {
            println!("    @{name} = {value:?}");
        }
        Ok(1)
    }

    fn query(&mut self) -> Result<Box<dyn RowReader + '_>> {
        println!("  querying: {}", self.sql);
        for (name, value) in &self.parameters {
            println!("    @{name} = {value:?}");
        }
        Ok(Box::new(DemoReader {
            columns: self.conn.columns.clone(),
            rows: self.conn.rows.clone(),
            position: 0,
        }))
    }
}

struct DemoReader {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    position: usize,
}

impl RowReader for DemoReader {
    fn next_row(&mut self) -> Result<bool> {
        if self.position < self.rows.len() {
            self.position += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn field_count(&self) -> usize {
        self.columns.len()
    }

    fn column_name(&self, ordinal: usize) -> &str {
        &self.columns[ordinal]
    }

    fn is_null(&self, ordinal: usize) -> bool {
        self.rows[self.position - 1][ordinal].is_null()
    }

    fn value(&self, ordinal: usize) -> Value {
        self.rows[self.position - 1][ordinal].clone()
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut conn = DemoConnection {
        columns: vec!["name".into(), "age".into(), "nickname".into()],
        rows: vec![
            vec![Value::from("Ann"), Value::from(30), Value::Null],
            vec![Value::from("Bob"), Value::from(41), Value::from("Bobby")],
        ],
    };

    // Example 1: insert with object binding
    println!("--- Example 1: Inserting a person ---");
    let ann = Person {
        name: "Ann".into(),
        age: 30,
        nickname: None,
    };
    execute_object_non_query(
        &mut conn,
        "INSERT INTO people (name, age, nickname) VALUES (@name, @age, @nickname)",
        &ann,
    )?;

    // Example 2: fetch a list; the second run reuses the compiled accessors
    println!("\n--- Example 2: Fetching people (twice) ---");
    for pass in 1..=2 {
        let people: Vec<Person> = execute_object_for_list(
            &mut conn,
            "SELECT name, age, nickname FROM people WHERE age >= @age",
            &Person {
                name: String::new(),
                age: 18,
                nickname: None,
            },
        )?;
        println!("pass {pass}: {} people", people.len());
        for person in &people {
            println!("  - {} (age={}, nickname={:?})", person.name, person.age, person.nickname);
        }
    }

    // Example 3: positional parameters and a scalar result
    println!("\n--- Example 3: Scalar with positional parameters ---");
    let name: Option<String> = execute_params_for_scalar(
        &mut conn,
        "SELECT name FROM people WHERE age = @1",
        &[Value::from(30)],
    )?;
    println!("first match: {name:?}");

    println!("\nExample completed successfully!");
    Ok(())
}

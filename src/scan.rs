use regex::Regex;

/// Extracts the distinct named placeholders from a query text.
///
/// Placeholders are `@` followed by one or more word characters. Names are
/// lower-cased and de-duplicated by first occurrence, preserving the order
/// in which they first appear. The query text is never validated as SQL;
/// an `@identifier` inside a string literal or comment still matches.
///
/// # Examples
///
/// ```
/// use simple_sql::scan::placeholders;
///
/// let names = placeholders("SELECT * FROM people WHERE name = @Name OR id = @id")?;
/// assert_eq!(names, vec!["name", "id"]);
/// # Ok::<(), simple_sql::Error>(())
/// ```
pub fn placeholders(sql: &str) -> crate::Result<Vec<String>> {
    let regex = Regex::new(r"@(\w+)")?;
    let mut names: Vec<String> = Vec::new();
    for captures in regex.captures_iter(sql) {
        let name = captures[1].to_lowercase();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_placeholder() {
        let names = placeholders("SELECT * FROM users WHERE id = @id").unwrap();
        assert_eq!(names, vec!["id"]);
    }

    #[test]
    fn test_multiple_placeholders_in_order() {
        let names =
            placeholders("SELECT * FROM users WHERE id = @id AND name = @name").unwrap();
        assert_eq!(names, vec!["id", "name"]);
    }

    #[test]
    fn test_repeated_placeholder_deduplicated() {
        let names =
            placeholders("SELECT * FROM users WHERE id = @id OR parent = @id").unwrap();
        assert_eq!(names, vec!["id"]);
    }

    #[test]
    fn test_names_are_lower_cased() {
        let names = placeholders("UPDATE users SET name = @Name WHERE id = @ID").unwrap();
        assert_eq!(names, vec!["name", "id"]);
    }

    #[test]
    fn test_no_placeholders() {
        let names = placeholders("SELECT * FROM users").unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn test_underscores_and_digits() {
        let names = placeholders("SELECT * FROM t WHERE user_id = @user_id2").unwrap();
        assert_eq!(names, vec!["user_id2"]);
    }

    #[test]
    fn test_placeholder_inside_literal_still_matches() {
        // Known limitation: the scanner does not understand SQL literals.
        let names = placeholders("SELECT '@not_a_param' FROM t WHERE id = @id").unwrap();
        assert_eq!(names, vec!["not_a_param", "id"]);
    }
}

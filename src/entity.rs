//! Target type descriptors and the case-insensitive property index.

use std::collections::HashMap;

use crate::value::Value;

/// A named accessor pair for one flat property of an entity type.
///
/// `get` reads the property's current value, boxing it into a [`Value`];
/// `set` assigns a [`Value`] to the property, handing the value back on a
/// failed conversion.
pub struct Property<T> {
    pub name: &'static str,
    pub get: fn(&T) -> Value,
    pub set: fn(&mut T, Value) -> std::result::Result<(), Value>,
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Property<T> {}

/// A type whose flat scalar properties can be bound to query parameters and
/// populated from result columns.
///
/// Implementations are usually generated with the [`entity!`](crate::entity!)
/// macro; hand-written impls only need to list one [`Property`] per field.
/// `Default` provides the freshly allocated instance row builders populate.
pub trait Entity: Default + Send + Sync + 'static {
    fn properties() -> Vec<Property<Self>>;
}

/// Builds the case-insensitive name-to-accessor table for `T`.
///
/// Names are lower-cased once here, never per lookup. The index makes no
/// judgement about unmatched names; the compiler consulting it decides
/// whether a miss is fatal (parameter binding) or ignorable (row building).
pub fn property_index<T: Entity>() -> HashMap<String, Property<T>> {
    T::properties()
        .into_iter()
        .map(|p| (p.name.to_lowercase(), p))
        .collect()
}

/// Defines a struct and derives its [`Entity`] implementation.
///
/// Every field must convert into and out of [`Value`]; use `Option<_>` for
/// columns that may hold NULL.
///
/// # Examples
///
/// ```
/// use simple_sql::entity;
///
/// entity! {
///     pub struct Person {
///         pub name: String,
///         pub age: i32,
///     }
/// }
/// ```
#[macro_export]
macro_rules! entity {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($fvis:vis $field:ident : $ty:ty),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, PartialEq)]
        $vis struct $name {
            $($fvis $field: $ty),*
        }

        impl $crate::Entity for $name {
            fn properties() -> Vec<$crate::Property<Self>> {
                vec![
                    $(
                        $crate::Property {
                            name: stringify!($field),
                            get: |obj: &Self| $crate::Value::from(obj.$field.clone()),
                            set: |obj: &mut Self, value: $crate::Value| {
                                obj.$field = <$ty as $crate::FromValue>::from_value(value)?;
                                Ok(())
                            },
                        }
                    ),*
                ]
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    entity! {
        struct Person {
            name: String,
            age: i32,
            nickname: Option<String>,
        }
    }

    #[test]
    fn test_properties_cover_all_fields() {
        let names: Vec<_> = Person::properties().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["name", "age", "nickname"]);
    }

    #[test]
    fn test_index_keys_are_lower_cased() {
        let index = property_index::<Person>();
        assert!(index.contains_key("name"));
        assert!(index.contains_key("nickname"));
        assert!(!index.contains_key("Name"));
    }

    #[test]
    fn test_get_boxes_current_value() {
        let person = Person {
            name: "Ann".into(),
            age: 30,
            nickname: None,
        };
        let index = property_index::<Person>();
        assert_eq!((index["name"].get)(&person), Value::String("Ann".into()));
        assert_eq!((index["age"].get)(&person), Value::I32(30));
        assert_eq!((index["nickname"].get)(&person), Value::Null);
    }

    #[test]
    fn test_set_assigns_converted_value() {
        let mut person = Person::default();
        let index = property_index::<Person>();
        (index["age"].set)(&mut person, Value::I64(30)).unwrap();
        assert_eq!(person.age, 30);
    }

    #[test]
    fn test_set_rejects_mismatched_value() {
        let mut person = Person::default();
        let index = property_index::<Person>();
        let rejected = (index["age"].set)(&mut person, Value::String("old".into()));
        assert_eq!(rejected, Err(Value::String("old".into())));
    }
}

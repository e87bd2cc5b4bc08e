// src/loader/convert.rs

//! Conversion of one document member into a `Recipe`
//!
//! Field extraction is lenient: a missing or `null` field is absent, and a
//! numeric field that does not parse (or parses to a non-finite value) is
//! absent too. Only a structurally wrong member, such as a value that is not
//! an object or a text field holding an object, fails the whole record.

use crate::db::models::Recipe;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::trace;

/// Why a single member could not become a recipe
#[derive(Error, Debug)]
pub enum RecordError {
    /// The member value is not a JSON object
    #[error("record is not an object (found {0})")]
    NotAnObject(&'static str),

    /// A text field holds an array or object
    #[error("field '{field}' cannot be read as text (found {found})")]
    UnexpectedType {
        field: &'static str,
        found: &'static str,
    },

    /// The nutrients blob could not be serialized back to text
    #[error("failed to serialize nutrients: {0}")]
    Nutrients(#[from] serde_json::Error),
}

/// Build a recipe from one member value of the document
pub fn recipe_from_value(value: &Value) -> Result<Recipe, RecordError> {
    let obj = value
        .as_object()
        .ok_or_else(|| RecordError::NotAnObject(json_type(value)))?;

    Ok(Recipe {
        id: None,
        cuisine: text_field(obj, "cuisine")?,
        title: text_field(obj, "title")?,
        rating: real_field(obj, "rating"),
        prep_time: integer_field(obj, "prep_time"),
        cook_time: integer_field(obj, "cook_time"),
        total_time: integer_field(obj, "total_time"),
        description: text_field(obj, "description")?,
        nutrients: nutrients_field(obj)?,
        serves: text_field(obj, "serves")?,
    })
}

fn present<'a>(obj: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    obj.get(field).filter(|v| !v.is_null())
}

/// Strings as-is; numbers and booleans rendered as text
fn text_field(obj: &Map<String, Value>, field: &'static str) -> Result<Option<String>, RecordError> {
    match present(obj, field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(RecordError::UnexpectedType {
            field,
            found: json_type(other),
        }),
    }
}

/// A finite real from a JSON number or numeric string
fn real_field(obj: &Map<String, Value>, field: &str) -> Option<f64> {
    let parsed = match present(obj, field)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Some(v),
        Some(v) => {
            trace!("Field '{}' is non-finite ({}), treating as absent", field, v);
            None
        }
        None => {
            trace!("Field '{}' is not a number, treating as absent", field);
            None
        }
    }
}

/// An `i32` from an integral JSON number, a fractional number (truncated) or
/// a decimal string
fn integer_field(obj: &Map<String, Value>, field: &str) -> Option<i32> {
    let parsed = match present(obj, field)? {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i32::try_from(i).ok(),
            None => n
                .as_f64()
                .map(f64::trunc)
                .filter(|f| *f >= i32::MIN as f64 && *f <= i32::MAX as f64)
                .map(|f| f as i32),
        },
        Value::String(s) => s.parse::<i32>().ok(),
        _ => None,
    };

    if parsed.is_none() {
        trace!("Field '{}' is not an integer, treating as absent", field);
    }
    parsed
}

/// The nutrients object serialized to compact JSON text
fn nutrients_field(obj: &Map<String, Value>) -> Result<Option<String>, RecordError> {
    present(obj, "nutrients")
        .map(serde_json::to_string)
        .transpose()
        .map_err(RecordError::from)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_record() {
        let value = json!({
            "cuisine": "Southern Recipes",
            "title": "Sweet Potato Pie",
            "rating": 4.8,
            "prep_time": 15,
            "cook_time": 100,
            "total_time": 115,
            "description": "Shared from a Southern recipe.",
            "nutrients": {"calories": "389 kcal", "fatContent": "21 g"},
            "serves": "8 servings",
            "URL": "ignored"
        });

        let recipe = recipe_from_value(&value).unwrap();
        assert_eq!(recipe.id, None);
        assert_eq!(recipe.cuisine.as_deref(), Some("Southern Recipes"));
        assert_eq!(recipe.title.as_deref(), Some("Sweet Potato Pie"));
        assert_eq!(recipe.rating, Some(4.8));
        assert_eq!(recipe.prep_time, Some(15));
        assert_eq!(recipe.cook_time, Some(100));
        assert_eq!(recipe.total_time, Some(115));
        assert_eq!(recipe.serves.as_deref(), Some("8 servings"));

        let nutrients: Value = serde_json::from_str(recipe.nutrients.as_deref().unwrap()).unwrap();
        assert_eq!(nutrients, json!({"calories": "389 kcal", "fatContent": "21 g"}));
    }

    #[test]
    fn test_empty_object_is_all_absent() {
        let recipe = recipe_from_value(&json!({})).unwrap();
        assert_eq!(recipe, Recipe::new());
    }

    #[test]
    fn test_nulls_are_absent() {
        let recipe = recipe_from_value(&json!({
            "title": null,
            "rating": null,
            "total_time": null,
            "nutrients": null
        }))
        .unwrap();
        assert_eq!(recipe, Recipe::new());
    }

    #[test]
    fn test_nan_string_rating_is_absent() {
        let recipe = recipe_from_value(&json!({"title": "X", "rating": "NaN"})).unwrap();
        assert_eq!(recipe.title.as_deref(), Some("X"));
        assert_eq!(recipe.rating, None);

        let recipe = recipe_from_value(&json!({"rating": "-Infinity"})).unwrap();
        assert_eq!(recipe.rating, None);
    }

    #[test]
    fn test_numeric_strings_are_parsed() {
        let recipe = recipe_from_value(&json!({
            "rating": " 4.25 ",
            "prep_time": "20",
            "cook_time": "abc",
            "total_time": "12.5"
        }))
        .unwrap();
        assert_eq!(recipe.rating, Some(4.25));
        assert_eq!(recipe.prep_time, Some(20));
        assert_eq!(recipe.cook_time, None);
        assert_eq!(recipe.total_time, None);
    }

    #[test]
    fn test_fractional_and_out_of_range_integers() {
        let recipe = recipe_from_value(&json!({
            "prep_time": 12.9,
            "cook_time": 9_999_999_999i64,
            "total_time": -3
        }))
        .unwrap();
        assert_eq!(recipe.prep_time, Some(12));
        assert_eq!(recipe.cook_time, None);
        assert_eq!(recipe.total_time, Some(-3));
    }

    #[test]
    fn test_scalars_render_as_text() {
        let recipe = recipe_from_value(&json!({"serves": 4, "cuisine": true})).unwrap();
        assert_eq!(recipe.serves.as_deref(), Some("4"));
        assert_eq!(recipe.cuisine.as_deref(), Some("true"));
    }

    #[test]
    fn test_structured_text_field_fails_record() {
        let err = recipe_from_value(&json!({"title": {"en": "Soup"}})).unwrap_err();
        assert!(matches!(
            err,
            RecordError::UnexpectedType { field: "title", found: "object" }
        ));
    }

    #[test]
    fn test_non_object_member_fails_record() {
        let err = recipe_from_value(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, RecordError::NotAnObject("array")));
    }

    #[test]
    fn test_wrong_type_numeric_field_is_absent() {
        let recipe = recipe_from_value(&json!({"rating": [5], "total_time": {"h": 1}})).unwrap();
        assert_eq!(recipe.rating, None);
        assert_eq!(recipe.total_time, None);
    }
}

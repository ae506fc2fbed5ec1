use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::ApiError;

const COURSE_FIELDS: [&str; 2] = ["name", "description"];

/// Validated body of `POST /create`
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub name: String,
    pub description: String,
}

impl NewCourse {
    /// Requires exactly `name` and `description`, both strings.
    ///
    /// Checks run in order: object shape, missing fields, field types,
    /// unexpected fields. The first failing check is reported.
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let data = as_object(body)?;

        let missing: Vec<&str> = COURSE_FIELDS
            .iter()
            .copied()
            .filter(|field| !data.contains_key(*field))
            .collect();
        if !missing.is_empty() {
            return Err(field_error("Missing fields", &missing, "This field is required"));
        }

        let name = string_field(data, "name")?.unwrap_or_default();
        let description = string_field(data, "description")?.unwrap_or_default();

        let extra: Vec<&str> = data
            .keys()
            .map(String::as_str)
            .filter(|key| !COURSE_FIELDS.contains(key))
            .collect();
        if !extra.is_empty() {
            return Err(field_error("Unexpected fields", &extra, "Unexpected field"));
        }

        Ok(Self { name, description })
    }
}

/// Validated body of `PUT /update/:id`; absent fields stay unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoursePatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CoursePatch {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let data = as_object(body)?;
        Ok(Self {
            name: string_field(data, "name")?,
            description: string_field(data, "description")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ApiError> {
    body.as_object()
        .ok_or_else(|| ApiError::invalid_json("Invalid JSON format"))
}

fn string_field(data: &Map<String, Value>, field: &str) -> Result<Option<String>, ApiError> {
    match data.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => {
            let mut field_errors = BTreeMap::new();
            field_errors.insert(field.to_string(), "Must be a string".to_string());
            Err(ApiError::validation_error(
                format!("{} must be a string", capitalize(field)),
                Some(field_errors),
            ))
        }
    }
}

fn field_error(prefix: &str, fields: &[&str], reason: &str) -> ApiError {
    let message = format!("{}: {}", prefix, fields.join(", "));
    let field_errors: BTreeMap<String, String> = fields
        .iter()
        .map(|f| (f.to_string(), reason.to_string()))
        .collect();
    ApiError::validation_error(message, Some(field_errors))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_names(err: &ApiError) -> Vec<String> {
        match err {
            ApiError::ValidationError {
                field_errors: Some(f),
                ..
            } => f.keys().cloned().collect(),
            _ => vec![],
        }
    }

    #[test]
    fn accepts_exact_payload() {
        let course = NewCourse::from_json(&json!({"name": "Algo", "description": "Intro"})).unwrap();
        assert_eq!(
            course,
            NewCourse {
                name: "Algo".into(),
                description: "Intro".into()
            }
        );
    }

    #[test]
    fn rejects_non_object_body() {
        for body in [json!([1, 2]), json!("name"), json!(null), json!(3)] {
            let err = NewCourse::from_json(&body).unwrap_err();
            assert_eq!(err.message(), "Invalid JSON format");
        }
    }

    #[test]
    fn lists_exactly_the_missing_fields() {
        let err = NewCourse::from_json(&json!({})).unwrap_err();
        assert_eq!(err.message(), "Missing fields: name, description");
        assert_eq!(field_names(&err), vec!["description", "name"]);

        let err = NewCourse::from_json(&json!({"name": "Algo"})).unwrap_err();
        assert_eq!(err.message(), "Missing fields: description");
        assert_eq!(field_names(&err), vec!["description"]);

        let err = NewCourse::from_json(&json!({"description": "Intro", "extra": 1})).unwrap_err();
        assert_eq!(err.message(), "Missing fields: name");
    }

    #[test]
    fn lists_exactly_the_extra_fields() {
        let err = NewCourse::from_json(&json!({
            "name": "Algo",
            "description": "Intro",
            "credits": 5,
            "instructor_id": 3
        }))
        .unwrap_err();
        assert_eq!(err.message(), "Unexpected fields: credits, instructor_id");
        assert_eq!(field_names(&err), vec!["credits", "instructor_id"]);
    }

    #[test]
    fn extra_fields_follow_payload_order() {
        let body: Value = serde_json::from_str(
            r#"{"zeta": 1, "name": "Algo", "description": "Intro", "alpha": 2}"#,
        )
        .unwrap();
        let err = NewCourse::from_json(&body).unwrap_err();
        assert_eq!(err.message(), "Unexpected fields: zeta, alpha");
    }

    #[test]
    fn rejects_non_string_fields() {
        let err = NewCourse::from_json(&json!({"name": 1, "description": "Intro"})).unwrap_err();
        assert_eq!(err.message(), "Name must be a string");
        assert_eq!(field_names(&err), vec!["name"]);

        let err = NewCourse::from_json(&json!({"name": "Algo", "description": null})).unwrap_err();
        assert_eq!(err.message(), "Description must be a string");
    }

    #[test]
    fn patch_keeps_absent_fields_empty() {
        let patch = CoursePatch::from_json(&json!({"name": "New", "ignored": true})).unwrap();
        assert_eq!(patch.name.as_deref(), Some("New"));
        assert_eq!(patch.description, None);
        assert!(!patch.is_empty());

        assert!(CoursePatch::from_json(&json!({})).unwrap().is_empty());
    }

    #[test]
    fn patch_rejects_wrong_types() {
        let err = CoursePatch::from_json(&json!({"description": ["x"]})).unwrap_err();
        assert_eq!(err.message(), "Description must be a string");

        let err = CoursePatch::from_json(&json!("New")).unwrap_err();
        assert_eq!(err.message(), "Invalid JSON format");
    }
}

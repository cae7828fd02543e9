//! Schema check for create payloads.
//!
//! Walks the raw JSON so the first failure can be reported with its full
//! path, e.g. `"modules[0].lessons[1].content[0].type" must be one of [text, video, audio]`.

use serde_json::{Map, Value};

use crate::course::ContentType;
use crate::errors::ModelError;

const COURSE_KEYS: [&str; 3] = ["title", "description", "modules"];

pub fn validate_course_input(value: &Value) -> Result<(), ModelError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ModelError::validation("\"value\" must be of type object"))?;

    required_string(obj, "title", "title", false)?;
    required_string(obj, "description", "description", true)?;
    let modules = required_array(obj, "modules", "modules")?;
    for (i, module) in modules.iter().enumerate() {
        validate_module(module, &format!("modules[{i}]"))?;
    }

    if let Some(key) = obj.keys().find(|k| !COURSE_KEYS.contains(&k.as_str())) {
        return Err(ModelError::validation(format!("\"{key}\" is not allowed")));
    }
    Ok(())
}

/// Schema check for update payloads: every field is optional, but a field
/// that is present must satisfy the same rules as on create. Unknown keys are
/// ignored.
pub fn validate_course_patch(value: &Value) -> Result<(), ModelError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ModelError::validation("\"value\" must be of type object"))?;

    if !matches!(obj.get("title"), None | Some(Value::Null)) {
        required_string(obj, "title", "title", false)?;
    }
    if !matches!(obj.get("description"), None | Some(Value::Null)) {
        required_string(obj, "description", "description", true)?;
    }
    if !matches!(obj.get("modules"), None | Some(Value::Null)) {
        let modules = required_array(obj, "modules", "modules")?;
        for (i, module) in modules.iter().enumerate() {
            validate_module(module, &format!("modules[{i}]"))?;
        }
    }
    Ok(())
}

fn validate_module(value: &Value, path: &str) -> Result<(), ModelError> {
    let obj = as_object(value, path)?;
    required_string(obj, "title", &format!("{path}.title"), false)?;
    let lessons = required_array(obj, "lessons", &format!("{path}.lessons"))?;
    for (i, lesson) in lessons.iter().enumerate() {
        validate_lesson(lesson, &format!("{path}.lessons[{i}]"))?;
    }
    Ok(())
}

fn validate_lesson(value: &Value, path: &str) -> Result<(), ModelError> {
    let obj = as_object(value, path)?;
    required_string(obj, "title", &format!("{path}.title"), false)?;
    match obj.get("description") {
        None | Some(Value::Null) => {}
        Some(Value::String(_)) => {}
        Some(_) => return Err(type_error(&format!("{path}.description"), "string")),
    }
    let topics = required_array(obj, "topics", &format!("{path}.topics"))?;
    for (i, topic) in topics.iter().enumerate() {
        if !topic.is_string() {
            return Err(type_error(&format!("{path}.topics[{i}]"), "string"));
        }
    }
    let content = required_array(obj, "content", &format!("{path}.content"))?;
    for (i, item) in content.iter().enumerate() {
        validate_content(item, &format!("{path}.content[{i}]"))?;
    }
    Ok(())
}

fn validate_content(value: &Value, path: &str) -> Result<(), ModelError> {
    let obj = as_object(value, path)?;
    let kind_path = format!("{path}.type");
    let kind = required_string(obj, "type", &kind_path, false)?;
    if ContentType::parse(kind).is_none() {
        let allowed: Vec<&str> = ContentType::ALL.iter().map(|t| t.as_str()).collect();
        return Err(ModelError::validation(format!(
            "\"{kind_path}\" must be one of [{}]",
            allowed.join(", ")
        )));
    }
    required_string(obj, "data", &format!("{path}.data"), true)?;
    Ok(())
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ModelError> {
    value.as_object().ok_or_else(|| type_error(path, "object"))
}

fn required_string<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
    allow_empty: bool,
) -> Result<&'a str, ModelError> {
    match obj.get(key) {
        None | Some(Value::Null) => Err(ModelError::validation(format!("\"{path}\" is required"))),
        Some(Value::String(s)) => {
            if !allow_empty && s.trim().is_empty() {
                return Err(ModelError::validation(format!("\"{path}\" is not allowed to be empty")));
            }
            Ok(s.as_str())
        }
        Some(_) => Err(type_error(path, "string")),
    }
}

fn required_array<'a>(obj: &'a Map<String, Value>, key: &str, path: &str) -> Result<&'a Vec<Value>, ModelError> {
    match obj.get(key) {
        None | Some(Value::Null) => Err(ModelError::validation(format!("\"{path}\" is required"))),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(type_error(path, "array")),
    }
}

fn type_error(path: &str, ty: &str) -> ModelError {
    ModelError::validation(format!("\"{path}\" must be of type {ty}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(v: Value) -> String {
        match validate_course_input(&v) {
            Err(ModelError::Validation(msg)) => msg,
            Ok(()) => panic!("expected validation failure for {v}"),
        }
    }

    #[test]
    fn accepts_full_course() {
        let v = json!({
            "title": "Introduction to Programming",
            "description": "A beginner-friendly course",
            "modules": [{
                "title": "Getting Started",
                "lessons": [{
                    "title": "Lesson 1: Basics",
                    "description": "An overview",
                    "topics": ["Variables"],
                    "content": [{"type": "video", "data": "https://example.com/video.mp4"}]
                }]
            }]
        });
        assert!(validate_course_input(&v).is_ok());
    }

    #[test]
    fn reports_missing_and_empty_fields() {
        assert_eq!(message(json!({"description": "d", "modules": []})), "\"title\" is required");
        assert_eq!(
            message(json!({"title": "  ", "description": "d", "modules": []})),
            "\"title\" is not allowed to be empty"
        );
        assert_eq!(message(json!({"title": "t", "description": "d"})), "\"modules\" is required");
    }

    #[test]
    fn rejects_id_and_unknown_keys() {
        assert_eq!(
            message(json!({"id": 3, "title": "t", "description": "d", "modules": []})),
            "\"id\" is not allowed"
        );
    }

    #[test]
    fn reports_nested_paths() {
        let v = json!({
            "title": "t",
            "description": "d",
            "modules": [{
                "title": "m",
                "lessons": [{
                    "title": "l",
                    "topics": ["a", 1],
                    "content": []
                }]
            }]
        });
        assert_eq!(message(v), "\"modules[0].lessons[0].topics[1]\" must be of type string");

        let v = json!({
            "title": "t",
            "description": "d",
            "modules": [{
                "title": "m",
                "lessons": [{
                    "title": "l",
                    "topics": [],
                    "content": [{"type": "pdf", "data": "x"}]
                }]
            }]
        });
        assert_eq!(
            message(v),
            "\"modules[0].lessons[0].content[0].type\" must be one of [text, video, audio]"
        );
    }

    #[test]
    fn rejects_non_object_payload() {
        assert_eq!(message(json!("course")), "\"value\" must be of type object");
        assert_eq!(
            message(json!({"title": "t", "description": "d", "modules": {}})),
            "\"modules\" must be of type array"
        );
    }

    fn patch_message(v: Value) -> String {
        match validate_course_patch(&v) {
            Err(ModelError::Validation(msg)) => msg,
            Ok(()) => panic!("expected validation failure for {v}"),
        }
    }

    #[test]
    fn patch_accepts_partial_fields_and_ignores_unknown_keys() {
        assert!(validate_course_patch(&json!({})).is_ok());
        assert!(validate_course_patch(&json!({"id": 7, "description": ""})).is_ok());
        assert!(validate_course_patch(&json!({"title": null})).is_ok());
    }

    #[test]
    fn patch_checks_nested_modules_like_create() {
        assert_eq!(patch_message(json!({"title": "  "})), "\"title\" is not allowed to be empty");
        assert_eq!(
            patch_message(json!({"modules": [{"title": ""}]})),
            "\"modules[0].title\" is not allowed to be empty"
        );
        assert_eq!(
            patch_message(json!({"modules": [{"title": "Intro"}]})),
            "\"modules[0].lessons\" is required"
        );
        assert_eq!(
            patch_message(json!({"modules": [{"title": "Intro", "lessons": [{"title": "L1", "content": []}]}]})),
            "\"modules[0].lessons[0].topics\" is required"
        );
    }
}

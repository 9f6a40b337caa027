//! Multipart form encoding for file-bearing payloads.
//!
//! Payloads are flattened with bracket notation (`tags[0]`, `images[1][alt]`)
//! which the backend's form parser turns back into nested arrays.

use reqwest::{
    Method,
    multipart::{Form, Part},
};
use serde::Serialize;
use serde_json::Value;

use crate::{error::ApiError, models::ImageUpload};

/// Field used to tunnel PUT/PATCH over a multipart POST.
pub const METHOD_OVERRIDE_FIELD: &str = "_method";

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    File {
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub value: FieldValue,
}

impl FormField {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: FieldValue::Text(value.into()),
        }
    }

    /// Text content of the field, `None` for file parts.
    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            FieldValue::Text(text) => Some(text),
            FieldValue::File { .. } => None,
        }
    }
}

/// form_fields
///
/// Flattens `payload` and `images` into form fields for a request that
/// semantically uses `method`. Anything other than POST gets an `_method`
/// field so the request can be sent as POST.
///
/// # Errors
/// `payload` must serialize to a JSON object.
pub fn form_fields<P: Serialize>(
    payload: &P,
    images: &[ImageUpload],
    method: &Method,
) -> Result<Vec<FormField>, ApiError> {
    let Value::Object(map) = serde_json::to_value(payload)? else {
        return Err(ApiError::Multipart(
            "payload must be a JSON object".to_string(),
        ));
    };

    let mut fields = Vec::new();
    for (key, value) in map {
        flatten(&key, value, &mut fields);
    }

    for (i, image) in images.iter().enumerate() {
        fields.push(FormField {
            name: format!("images[{i}][file]"),
            value: FieldValue::File {
                file_name: image.file_name.clone(),
                content_type: image.content_type.clone(),
                bytes: image.bytes.clone(),
            },
        });
        if let Some(alt) = &image.alt {
            fields.push(FormField::text(format!("images[{i}][alt]"), alt.clone()));
        }
        fields.push(FormField::text(
            format!("images[{i}][is_primary]"),
            bool_field(image.is_primary),
        ));
        fields.push(FormField::text(
            format!("images[{i}][sort_order]"),
            image.sort_order.to_string(),
        ));
    }

    if *method != Method::POST {
        fields.push(FormField::text(METHOD_OVERRIDE_FIELD, method.as_str()));
    }
    Ok(fields)
}

fn bool_field(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

fn flatten(name: &str, value: Value, out: &mut Vec<FormField>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push(FormField::text(name, bool_field(b))),
        Value::Number(n) => out.push(FormField::text(name, n.to_string())),
        Value::String(s) => out.push(FormField::text(name, s)),
        Value::Array(items) => {
            for (i, item) in items.into_iter().enumerate() {
                flatten(&format!("{name}[{i}]"), item, out);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                flatten(&format!("{name}[{key}]"), item, out);
            }
        }
    }
}

/// Converts flattened fields into a `reqwest` multipart form.
///
/// # Errors
/// Fails on a file part whose content type is not a valid MIME type.
pub fn into_form(fields: Vec<FormField>) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for field in fields {
        form = match field.value {
            FieldValue::Text(text) => form.text(field.name, text),
            FieldValue::File {
                file_name,
                content_type,
                bytes,
            } => {
                let part = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&content_type)
                    .map_err(|e| ApiError::Multipart(e.to_string()))?;
                form.part(field.name, part)
            }
        };
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn names(fields: &[FormField]) -> Vec<&str> {
        fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn nested_values_use_bracket_notation() {
        let payload = json!({
            "name": "Tas Anyaman",
            "price": 125000,
            "track_quantity": true,
            "sku": null,
            "tag_ids": [3, 7],
        });
        let fields = form_fields(&payload, &[], &Method::POST).unwrap();

        assert_eq!(
            names(&fields),
            vec!["name", "price", "tag_ids[0]", "tag_ids[1]", "track_quantity"]
        );
        let track = fields.iter().find(|f| f.name == "track_quantity").unwrap();
        assert_eq!(track.as_text(), Some("1"));
    }

    #[test]
    fn images_become_indexed_fields() {
        let images = vec![
            ImageUpload {
                file_name: "front.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
                bytes: vec![0xFF, 0xD8],
                alt: Some("Tampak depan".to_string()),
                is_primary: true,
                sort_order: 0,
            },
            ImageUpload {
                file_name: "side.png".to_string(),
                content_type: "image/png".to_string(),
                bytes: vec![0x89],
                alt: None,
                is_primary: false,
                sort_order: 1,
            },
        ];
        let fields = form_fields(&json!({}), &images, &Method::POST).unwrap();

        assert_eq!(
            names(&fields),
            vec![
                "images[0][file]",
                "images[0][alt]",
                "images[0][is_primary]",
                "images[0][sort_order]",
                "images[1][file]",
                "images[1][is_primary]",
                "images[1][sort_order]",
            ]
        );
        assert!(matches!(
            &fields[0].value,
            FieldValue::File { file_name, .. } if file_name == "front.jpg"
        ));
    }

    #[test]
    fn non_post_method_is_tunneled() {
        let fields = form_fields(&json!({"name": "x"}), &[], &Method::PUT).unwrap();
        let last = fields.last().unwrap();
        assert_eq!(last.name, METHOD_OVERRIDE_FIELD);
        assert_eq!(last.as_text(), Some("PUT"));

        let post = form_fields(&json!({"name": "x"}), &[], &Method::POST).unwrap();
        assert!(post.iter().all(|f| f.name != METHOD_OVERRIDE_FIELD));
    }

    #[test]
    fn scalar_payload_is_rejected() {
        assert!(form_fields(&json!("nope"), &[], &Method::POST).is_err());
    }

    #[test]
    fn invalid_mime_fails_form_building() {
        let field = FormField {
            name: "images[0][file]".to_string(),
            value: FieldValue::File {
                file_name: "a".to_string(),
                content_type: "not a mime".to_string(),
                bytes: vec![],
            },
        };
        assert!(into_form(vec![field]).is_err());
    }
}

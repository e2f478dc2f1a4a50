use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::path::Path;
use validator::ValidationErrors;

/// Longest extension kept on a generated storage name
const MAX_EXTENSION_LEN: usize = 10;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates file size against maximum limit
pub fn validate_file_size(size: usize, max_size: usize) -> Result<(), ValidationError> {
    if size > max_size {
        return Err(ValidationError {
            code: "FILE_TOO_LARGE",
            message: format!(
                "File size exceeds the limit of {} bytes ({} MB)",
                max_size,
                max_size / 1024 / 1024
            ),
        });
    }
    Ok(())
}

/// Only `image/*` uploads are accepted
pub fn validate_image_type(content_type: &str) -> Result<(), ValidationError> {
    let is_image = content_type
        .trim()
        .parse::<mime::Mime>()
        .map(|m| m.type_().as_str().eq_ignore_ascii_case("image"))
        .unwrap_or(false);

    if is_image {
        Ok(())
    } else {
        Err(ValidationError {
            code: "INVALID_FILE_TYPE",
            message: "Only image files can be uploaded".to_string(),
        })
    }
}

/// Parses a calendar date in `YYYY-MM-DD` form
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| ValidationError {
        code: "INVALID_DATE",
        message: format!("Invalid date '{}', expected YYYY-MM-DD", value),
    })
}

/// Client-supplied filename without any directory part
pub fn original_basename(filename: &str) -> String {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or("").trim();

    // Limit length safely for UTF-8
    if name.len() > 255 {
        let mut end = 255;
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        name[..end].to_string()
    } else {
        name.to_string()
    }
}

/// Lowercased extension of `filename`, kept only if it is short and ASCII alphanumeric
pub fn safe_extension(filename: &str) -> Option<String> {
    let ext = Path::new(filename).extension()?.to_str()?;
    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// One message per failing field, sorted so responses are stable
pub fn field_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    messages.sort();
    messages
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
/// Use with `#[serde(default, deserialize_with = "double_option")]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

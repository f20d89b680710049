use std::collections::HashMap;

use axum::extract::Multipart;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    media::PhotoUpload,
};

/// A parsed multipart admin form: text fields by name, plus any uploaded
/// files. File parts with an empty filename (no file chosen) are ignored.
#[derive(Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, PhotoUpload>,
}

impl MultipartForm {
    pub async fn parse(mut multipart: Multipart) -> Result<Self> {
        let mut form = MultipartForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?
        {
            let name = match field.name() {
                Some(name) => name.to_string(),
                None => continue,
            };

            match field.file_name().map(|f| f.to_string()) {
                Some(filename) if !filename.is_empty() => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Read error: {}", e)))?;
                    if !bytes.is_empty() {
                        form.files.insert(name, PhotoUpload::new(filename, bytes.to_vec()));
                    }
                }
                _ => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Read error: {}", e)))?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    /// Empty strings collapse to None.
    pub fn optional_text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn required_text(&self, name: &str) -> Result<String> {
        self.optional_text(name)
            .ok_or_else(|| AppError::Validation(format!("{} is required", name)))
    }

    /// Checkboxes submit a value only when ticked.
    pub fn checkbox(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn integer(&self, name: &str, default: i64) -> Result<i64> {
        match self.optional_text(name) {
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::Validation(format!("{} must be a number", name))),
            None => Ok(default),
        }
    }

    pub fn optional_integer(&self, name: &str) -> Result<Option<i64>> {
        self.optional_text(name)
            .map(|raw| {
                raw.parse()
                    .map_err(|_| AppError::Validation(format!("{} must be a number", name)))
            })
            .transpose()
    }

    pub fn optional_date(&self, name: &str) -> Result<Option<NaiveDate>> {
        self.optional_text(name)
            .map(|raw| {
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|_| AppError::Validation(format!("{} must be a date (YYYY-MM-DD)", name)))
            })
            .transpose()
    }

    pub fn optional_uuid(&self, name: &str) -> Result<Option<Uuid>> {
        self.optional_text(name)
            .map(|raw| {
                Uuid::parse_str(&raw)
                    .map_err(|_| AppError::Validation(format!("{} is not a valid id", name)))
            })
            .transpose()
    }

    pub fn file(&self, name: &str) -> Option<PhotoUpload> {
        self.files.get(name).cloned()
    }

    pub fn required_file(&self, name: &str) -> Result<PhotoUpload> {
        self.file(name)
            .ok_or_else(|| AppError::Validation(format!("{} is required", name)))
    }
}

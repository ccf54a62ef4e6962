//! Turns user-entered text into solver-ready sheet and piece dimensions.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::types::Dimensions;

/// Raw form fields. Margins may be left empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackingRequest {
    #[serde(deserialize_with = "deserialize_text")]
    pub sheet_length: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub sheet_width: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub piece_length: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub piece_width: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub margin_length: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub margin_width: String,
}

/// Accepts either a JSON string or a JSON number for a form field.
fn deserialize_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field {
        Text(String),
        Number(f64),
    }

    Ok(match Field::deserialize(deserializer)? {
        Field::Text(s) => s,
        Field::Number(n) => n.to_string(),
    })
}

/// Normalized inputs: sheet and margin-inflated piece, both longer side first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub sheet: Dimensions,
    pub piece: Dimensions,
}

impl Job {
    pub fn new(sheet: Dimensions, piece: Dimensions, margin_length: f64, margin_width: f64) -> Self {
        let inflated = Dimensions::new(
            piece.length + 2.0 * margin_length,
            piece.width + 2.0 * margin_width,
        );
        Self {
            sheet: sheet.canonical(),
            piece: inflated.canonical(),
        }
    }
}

impl PackingRequest {
    pub fn new(sheet: (&str, &str), piece: (&str, &str)) -> Self {
        Self {
            sheet_length: sheet.0.to_string(),
            sheet_width: sheet.1.to_string(),
            piece_length: piece.0.to_string(),
            piece_width: piece.1.to_string(),
            ..Default::default()
        }
    }

    pub fn with_margins(mut self, length: &str, width: &str) -> Self {
        self.margin_length = length.to_string();
        self.margin_width = width.to_string();
        self
    }

    pub fn prepare(&self) -> Result<Job> {
        let sheet = Dimensions::new(
            parse_dimension("sheet length", &self.sheet_length)?,
            parse_dimension("sheet width", &self.sheet_width)?,
        );
        let piece = Dimensions::new(
            parse_dimension("piece length", &self.piece_length)?,
            parse_dimension("piece width", &self.piece_width)?,
        );
        let margin_length = parse_margin("margin length", &self.margin_length)?;
        let margin_width = parse_margin("margin width", &self.margin_width)?;
        Ok(Job::new(sheet, piece, margin_length, margin_width))
    }
}

fn parse_number(field: &'static str, text: &str) -> Result<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::InvalidInput {
            field,
            reason: "value is required".to_string(),
        });
    }
    let value = text.parse::<f64>().map_err(|_| Error::InvalidInput {
        field,
        reason: format!("'{}' is not a number", text),
    })?;
    if !value.is_finite() {
        return Err(Error::InvalidInput {
            field,
            reason: format!("'{}' is not a finite number", text),
        });
    }
    Ok(value)
}

fn parse_dimension(field: &'static str, text: &str) -> Result<f64> {
    let value = parse_number(field, text)?;
    if value <= 0.0 {
        return Err(Error::InvalidInput {
            field,
            reason: format!("{} must be positive", value),
        });
    }
    Ok(value)
}

fn parse_margin(field: &'static str, text: &str) -> Result<f64> {
    if text.trim().is_empty() {
        return Ok(0.0);
    }
    let value = parse_number(field, text)?;
    if value < 0.0 {
        return Err(Error::InvalidInput {
            field,
            reason: format!("{} must not be negative", value),
        });
    }
    Ok(value)
}

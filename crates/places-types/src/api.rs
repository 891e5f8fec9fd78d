use serde::{Deserialize, Serialize};

use crate::models::{Coordinates, ValidationError};

// -- Users --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    pub name: String,
    #[serde(default)]
    pub address: Option<AddressRequest>,
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub id: String,
}

// -- Addresses --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddressRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateAddressRequest {
    pub name: String,
}

// -- Perimeter search --

/// Raw `?latitude=&longitude=&distance=` query; `distance` is in kilometers.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PerimeterQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub distance: f64,
}

/// A validated search circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perimeter {
    pub center: Coordinates,
    pub radius_km: f64,
}

impl PerimeterQuery {
    pub fn validate(self) -> Result<Perimeter, ValidationError> {
        let center = Coordinates::new(self.longitude, self.latitude)?;
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(ValidationError::Distance(self.distance));
        }
        Ok(Perimeter {
            center,
            radius_km: self.distance,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// -- Normalization --

/// Trims and title-cases a person's name. A single word is rejected.
pub fn normalize_full_name(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty("Name"));
    }
    if !trimmed.contains(char::is_whitespace) {
        return Err(ValidationError::FullName);
    }
    Ok(title_case(trimmed))
}

pub fn normalize_place_name(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty("Address name"));
    }
    Ok(trimmed.to_string())
}

/// Uppercases the first letter of every alphabetic run and lowercases the rest,
/// so "o'neil" becomes "O'Neil".
fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

//! "Add new cat" form state.

use shared::{domain::MAX_NAME_CHARS, protocol::NewCat};

use crate::dashboard::{Dashboard, Outcome};

/// Raw text of the four creation inputs.
///
/// Numbers stay text until submission. Validation is left to the service:
/// unparseable input becomes NaN and is rejected remotely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreationForm {
    name: String,
    years_of_experience: String,
    breed: String,
    salary: String,
}

impl CreationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.chars().take(MAX_NAME_CHARS).collect();
    }

    pub fn set_years_of_experience(&mut self, years: impl Into<String>) {
        self.years_of_experience = years.into();
    }

    pub fn set_breed(&mut self, breed: impl Into<String>) {
        self.breed = breed.into();
    }

    pub fn set_salary(&mut self, salary: impl Into<String>) {
        self.salary = salary.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn years_of_experience(&self) -> &str {
        &self.years_of_experience
    }

    pub fn breed(&self) -> &str {
        &self.breed
    }

    pub fn salary(&self) -> &str {
        &self.salary
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn payload(&self) -> NewCat {
        NewCat {
            name: self.name.trim().to_string(),
            years_of_experience: coerce_number(&self.years_of_experience),
            breed: self.breed.trim().to_string(),
            salary: coerce_number(&self.salary),
        }
    }

    /// Hands the payload to the dashboard, then clears every field whether or
    /// not the service accepted it.
    pub async fn submit(&mut self, dashboard: &Dashboard) -> Outcome {
        let outcome = dashboard.create(self.payload()).await;
        self.reset();
        outcome
    }
}

/// Lenient text-to-number conversion used by every numeric input.
///
/// Blank input is zero. Decimal literals, signed `Infinity` and unsigned
/// `0x`/`0o`/`0b` integers parse; everything else is NaN.
pub fn coerce_number(raw: &str) -> f64 {
    let text = raw.trim();
    if text.is_empty() {
        return 0.0;
    }
    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(value) = parse_radix_literal(text) {
        return value;
    }
    // `str::parse` also takes "inf" and "nan", which are not numbers here.
    let decimal_only = text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !decimal_only {
        return f64::NAN;
    }
    text.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix_literal(text: &str) -> Option<f64> {
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(f64::NAN);
    }
    Some(
        u64::from_str_radix(digits, radix)
            .map(|value| value as f64)
            .unwrap_or(f64::NAN),
    )
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;

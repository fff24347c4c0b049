use serde::{Deserialize, Serialize};

/// Body of `POST /cats/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCat {
    pub name: String,
    #[serde(with = "loose_number")]
    pub years_of_experience: f64,
    pub breed: String,
    #[serde(with = "loose_number")]
    pub salary: f64,
}

/// Body of `PATCH /cats/{id}/salary`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryUpdate {
    #[serde(with = "loose_number")]
    pub salary: f64,
}

/// Coerced numbers go out the way a browser JSON encoder writes them: whole
/// values as integers, NaN and infinities as `null`. The service rejects the
/// latter, which is how bad input gets reported.
pub mod loose_number {
    use serde::{Deserialize, Deserializer, Serializer};

    const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if !value.is_finite() {
            serializer.serialize_none()
        } else if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
            serializer.serialize_i64(*value as i64)
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

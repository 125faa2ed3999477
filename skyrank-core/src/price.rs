use serde::{Deserialize, Deserializer};

/// Raw amount as seen in supplier payloads
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawAmount {
    fn into_amount(self) -> f64 {
        match self {
            RawAmount::Number(n) => finite_or_zero(n),
            RawAmount::Text(s) => parse_amount(&s),
            RawAmount::Other(v) => {
                tracing::debug!(raw = %v, "non-numeric amount, treating as 0");
                0.0
            }
        }
    }
}

/// Lenient amount parsing. Anything that is not a finite number becomes 0.0.
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim().parse::<f64>().map(finite_or_zero).unwrap_or(0.0)
}

fn finite_or_zero(n: f64) -> f64 {
    if n.is_finite() { n } else { 0.0 }
}

/// Serde helper accepting `123.45`, `"123.45"` or garbage (-> 0.0)
pub fn normalize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawAmount::deserialize(deserializer)?.into_amount())
}

pub fn normalize_optional_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawAmount>::deserialize(deserializer)?.map(RawAmount::into_amount))
}

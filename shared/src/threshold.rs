use std::fmt;

/// Text sent for `h` when the blob endpoint receives a blank threshold.
pub const DEFAULT_THRESHOLD: &str = "0.03";

pub const MIN_THRESHOLD: f64 = 0.0;
pub const MAX_THRESHOLD: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThresholdError {
    #[error("threshold is missing")]
    Missing,
    #[error("threshold {0:?} is not a number")]
    NotANumber(String),
    #[error("threshold {0} is outside [0, 1]")]
    OutOfRange(f64),
}

/// What to do when the `h` field is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdPolicy {
    Reject,
    UseDefault,
}

/// A validated suppression threshold.
///
/// Keeps the trimmed text the user typed so the wire value is exactly what
/// was entered (`"0.030"` stays `"0.030"`).
#[derive(Debug, Clone, PartialEq)]
pub struct Threshold {
    raw: String,
}

impl Threshold {
    pub fn parse(input: &str) -> Result<Self, ThresholdError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(ThresholdError::Missing);
        }

        let value: f64 = raw
            .parse()
            .map_err(|_| ThresholdError::NotANumber(raw.to_string()))?;
        if !value.is_finite() {
            return Err(ThresholdError::NotANumber(raw.to_string()));
        }
        if !(MIN_THRESHOLD..=MAX_THRESHOLD).contains(&value) {
            return Err(ThresholdError::OutOfRange(value));
        }

        Ok(Self {
            raw: raw.to_string(),
        })
    }

    /// Resolves an optional form field under the given policy.
    pub fn resolve(input: Option<&str>, policy: ThresholdPolicy) -> Result<Self, ThresholdError> {
        let blank = input.map(|s| s.trim().is_empty()).unwrap_or(true);
        match (blank, policy) {
            (true, ThresholdPolicy::UseDefault) => Ok(Self::default()),
            (true, ThresholdPolicy::Reject) => Err(ThresholdError::Missing),
            (false, _) => Self::parse(input.unwrap_or_default()),
        }
    }

    /// The exact text sent as the `h` form field.
    pub fn as_field(&self) -> &str {
        &self.raw
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self {
            raw: DEFAULT_THRESHOLD.to_string(),
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

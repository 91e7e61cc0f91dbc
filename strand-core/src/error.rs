use thiserror::Error;

/// Tuning values an appendage refuses to be built with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be > 0 (got {value})")] NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be >= 0 (got {value})")] Negative { field: &'static str, value: f32 },
    #[error("{field} must be within {min}..={max} (got {value})")] OutOfRange { field: &'static str, value: f32, min: f32, max: f32 },
    #[error("{field} must be finite (got {value})")] NotFinite { field: &'static str, value: f32 },
}

pub(crate) fn finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() { Ok(value) } else { Err(ConfigError::NotFinite { field, value }) }
}

pub(crate) fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if finite(field, value)? > 0.0 { Ok(()) } else { Err(ConfigError::NotPositive { field, value }) }
}

pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if finite(field, value)? >= 0.0 { Ok(()) } else { Err(ConfigError::Negative { field, value }) }
}

pub(crate) fn in_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if (min..=max).contains(&finite(field, value)?) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, min, max })
    }
}

use crate::models::input::InputError;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TOP_P: f32 = 1.0;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Sampling parameters shared read-only by every call in a chain run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    pub temperature: f32,
    pub top_p: f32,
    /// Output token cap applied to each call individually.
    pub max_tokens: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl SamplingConfig {
    /// Range checks: temperature in [0, 2], top_p in [0, 1], max_tokens > 0.
    /// NaN fails both float checks.
    pub fn validate(&self) -> Result<(), InputError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(InputError::OutOfRange {
                name: "temperature",
                range: "[0, 2]",
                value: self.temperature.to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(InputError::OutOfRange {
                name: "top_p",
                range: "[0, 1]",
                value: self.top_p.to_string(),
            });
        }
        if self.max_tokens == 0 {
            return Err(InputError::OutOfRange {
                name: "max_tokens",
                range: "> 0",
                value: self.max_tokens.to_string(),
            });
        }
        Ok(())
    }
}

/// Errors raised by fallible constructors. The running simulation never
/// returns an error — physically meaningful terminations are `Outcome`
/// values, not errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SimError {
    #[error("invalid rocket/mission configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl SimError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        SimError::InvalidConfig { reason: reason.into() }
    }
}

pub type SimResult<T> = Result<T, SimError>;

//! Error types for the altimeter core.
//!
//! Host adapters report failures through [`SamplerError`]. Everything the core
//! rejects surfaces as an [`AltimeterError`]; the application context turns
//! these into log entries instead of propagating them to the host.

use core::fmt;

use thiserror::Error;

/// Sampler Adapter operation that failed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SamplerOp {
    Create,
    Start,
    Stop,
}

impl SamplerOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for SamplerOp {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The host refused a sampler operation.
#[derive(Error, Clone, Copy, PartialEq, Eq, Debug)]
#[error("sampler refused to {op}")]
pub struct SamplerError {
    pub op: SamplerOp,
}

impl SamplerError {
    pub const fn new(op: SamplerOp) -> Self { Self { op } }
}

/// Errors raised by the altitude pipeline.
#[derive(Error, Clone, Copy, PartialEq, Debug)]
pub enum AltimeterError {
    /// Pressure was zero, negative or not finite.
    #[error("invalid pressure reading: {0} Pa")]
    InvalidPressure(f64),

    /// A reading event carried neither a batch nor a scalar value.
    #[error("reading carried no pressure value")]
    NoReading,

    #[error(transparent)]
    Sampler(#[from] SamplerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampler_error_message() {
        let err = SamplerError::new(SamplerOp::Start);
        assert_eq!(err.to_string(), "sampler refused to start");
    }

    #[test]
    fn test_sampler_error_converts() {
        let err: AltimeterError = SamplerError::new(SamplerOp::Stop).into();
        assert_eq!(err, AltimeterError::Sampler(SamplerError::new(SamplerOp::Stop)));
        assert_eq!(err.to_string(), "sampler refused to stop");
    }
}

use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::activity::ActivityFeedError;
use crate::workflows::consultations::ConsultationServiceError;
use std::fmt;

/// Top-level failure for the binaries: startup, serving, and CLI workflows.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Consultation(ConsultationServiceError),
    Activity(ActivityFeedError),
    Usage(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Consultation(err) => write!(f, "consultation error: {}", err),
            AppError::Activity(err) => write!(f, "activity error: {}", err),
            AppError::Usage(message) => write!(f, "invalid arguments: {}", message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Consultation(err) => Some(err),
            AppError::Activity(err) => Some(err),
            AppError::Usage(_) => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ConsultationServiceError> for AppError {
    fn from(value: ConsultationServiceError) -> Self {
        Self::Consultation(value)
    }
}

impl From<ActivityFeedError> for AppError {
    fn from(value: ActivityFeedError) -> Self {
        Self::Activity(value)
    }
}

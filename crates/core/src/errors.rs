use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::plan::PlanId;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("diagnosis input must contain at least one person")]
    EmptyHousehold,
    #[error("family line count {0} is outside 1..=5")]
    InvalidFamilyLines(u8),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog contains duplicate plan id `{0}`")]
    DuplicatePlan(PlanId),
    #[error("catalog contains no plans")]
    Empty,
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error("invalid input document: {0}")]
    Input(String),
}

impl ApplicationError {
    /// Stable machine-readable class for operator-facing payloads.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(_) | Self::Input(_) => "input_validation",
            Self::Catalog(_) => "catalog",
            Self::Configuration(_) => "config_validation",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Configuration(_) => 2,
            Self::Domain(_) | Self::Input(_) => 3,
            Self::Catalog(_) => 4,
        }
    }
}

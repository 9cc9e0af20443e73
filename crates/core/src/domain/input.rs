use serde::{Deserialize, Serialize};

use crate::domain::profile::UserProfile;
use crate::domain::settings::CommonSettings;
use crate::errors::DomainError;

pub const MAX_FAMILY_LINES: u8 = 5;

/// A household of one or more persons sharing one set of common settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisInput {
    pub persons: Vec<UserProfile>,
    #[serde(default)]
    pub common: CommonSettings,
}

impl DiagnosisInput {
    pub fn single(person: UserProfile, common: CommonSettings) -> Self {
        Self { persons: vec![person], common }
    }

    pub fn household(persons: Vec<UserProfile>, common: CommonSettings) -> Self {
        Self { persons, common }
    }

    pub fn is_household(&self) -> bool {
        self.persons.len() > 1
    }

    /// Boundary check for input documents. The diagnosis itself tolerates any input.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.persons.is_empty() {
            return Err(DomainError::EmptyHousehold);
        }
        if !(1..=MAX_FAMILY_LINES).contains(&self.common.family_lines) {
            return Err(DomainError::InvalidFamilyLines(self.common.family_lines));
        }
        Ok(())
    }
}

pub mod catalog;
pub mod config;
pub mod diagnosis;
pub mod domain;
pub mod errors;

#[cfg(test)]
mod fixtures;

pub use catalog::{Catalog, CatalogMeta};
pub use diagnosis::{calculate_diagnosis, DiagnosisEngine, DiagnosisRuntime};
pub use domain::input::DiagnosisInput;
pub use domain::plan::{Carrier, CarrierId, Plan, PlanId};
pub use domain::profile::UserProfile;
pub use domain::result::{DiagnosisResult, FamilyPattern, PersonResult, PlanScore, SavingTip};
pub use domain::settings::CommonSettings;
pub use errors::{ApplicationError, CatalogError, DomainError};

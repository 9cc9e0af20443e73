use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::CatalogConfig;
use crate::domain::plan::{Carrier, CarrierId, Plan, PlanId};
use crate::errors::CatalogError;

const BUNDLED_CATALOG: &str = include_str!("../data/plans.json");

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMeta {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Read-only plan catalog shared by every diagnosis run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    meta: CatalogMeta,
    #[serde(default)]
    carriers: Vec<Carrier>,
    plans: Vec<Plan>,
}

impl Catalog {
    pub fn new(plans: Vec<Plan>) -> Self {
        Self { meta: CatalogMeta::default(), carriers: Vec::new(), plans }
    }

    pub fn with_carriers(mut self, carriers: Vec<Carrier>) -> Self {
        self.carriers = carriers;
        self
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(raw)?;
        catalog.check()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        Self::from_json_str(&raw)
    }

    /// The sample catalog compiled into the crate.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json_str(BUNDLED_CATALOG)
    }

    /// The catalog named by configuration, or the bundled one when no path is set.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        match &config.path {
            Some(path) => Self::load(path),
            None => Self::bundled(),
        }
    }

    pub fn meta(&self) -> &CatalogMeta {
        &self.meta
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn carriers(&self) -> &[Carrier] {
        &self.carriers
    }

    pub fn find(&self, plan_id: &PlanId) -> Option<&Plan> {
        self.plans.iter().find(|plan| &plan.id == plan_id)
    }

    pub fn carrier(&self, carrier_id: &CarrierId) -> Option<&Carrier> {
        self.carriers.iter().find(|carrier| &carrier.id == carrier_id)
    }

    pub fn carrier_name(&self, carrier_id: &CarrierId) -> Option<&str> {
        self.carrier(carrier_id).map(|carrier| carrier.name.as_str())
    }

    fn check(&self) -> Result<(), CatalogError> {
        if self.plans.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(self.plans.len());
        for plan in &self.plans {
            if !seen.insert(&plan.id) {
                return Err(CatalogError::DuplicatePlan(plan.id.clone()));
            }
        }

        Ok(())
    }
}

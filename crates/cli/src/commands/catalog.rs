use planfit_core::config::AppConfig;
use planfit_core::Catalog;
use serde_json::json;

use crate::commands::CommandResult;

const COMMAND: &str = "catalog";

pub fn run(config: &AppConfig) -> CommandResult {
    let catalog = match Catalog::from_config(&config.catalog) {
        Ok(catalog) => catalog,
        Err(error) => return CommandResult::from_error(COMMAND, &error.into()),
    };

    let source = config
        .catalog
        .path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "bundled".to_string());

    let plans: Vec<_> = catalog
        .plans()
        .iter()
        .map(|plan| {
            json!({
                "id": plan.id,
                "carrier_id": plan.carrier_id,
                "carrier_name": catalog.carrier_name(&plan.carrier_id),
                "name": plan.name,
                "monthly_price": plan.monthly_price,
                "data_capacity_gb": plan.data_capacity_gb,
                "data_capacity_type": plan.data_capacity_type,
            })
        })
        .collect();

    let data = json!({
        "source": source,
        "version": catalog.meta().version,
        "updated_at": catalog.meta().updated_at,
        "carriers": catalog.carriers().len(),
        "plans": plans,
    });

    CommandResult::with_data(
        COMMAND,
        format!("{} plan(s) from {} carrier(s)", catalog.plans().len(), catalog.carriers().len()),
        Some(data),
        false,
    )
}

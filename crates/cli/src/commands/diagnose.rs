use std::fs;
use std::path::Path;

use anyhow::Context;
use planfit_core::config::AppConfig;
use planfit_core::{
    ApplicationError, Catalog, DiagnosisEngine, DiagnosisInput, DiagnosisRuntime, DomainError,
};

use crate::commands::CommandResult;

const COMMAND: &str = "diagnose";

pub fn run(config: &AppConfig, input_path: &Path, pretty: bool) -> CommandResult {
    match diagnose(config, input_path, pretty) {
        Ok(result) => result,
        Err(error) => CommandResult::from_error(COMMAND, &error),
    }
}

fn diagnose(
    config: &AppConfig,
    input_path: &Path,
    pretty: bool,
) -> Result<CommandResult, ApplicationError> {
    let input = read_input(input_path)
        .map_err(|error| ApplicationError::Input(format!("{error:#}")))?;
    input.validate()?;

    let catalog = Catalog::from_config(&config.catalog)?;
    let result = DiagnosisEngine::from_config(&config.diagnosis).diagnose(&catalog, &input);

    let message = match result.person_results.as_slice() {
        [single] => format!("ranked {} plan(s)", single.ranked_plans.len()),
        persons => format!("diagnosed household of {}", persons.len()),
    };
    let data = serde_json::to_value(&result).map_err(|error| {
        DomainError::InvariantViolation(format!("diagnosis result is not encodable: {error}"))
    })?;

    Ok(CommandResult::with_data(COMMAND, message, Some(data), pretty))
}

fn read_input(path: &Path) -> anyhow::Result<DiagnosisInput> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("could not read input `{}`", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("could not parse input `{}`", path.display()))
}

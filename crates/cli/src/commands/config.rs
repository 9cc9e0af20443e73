use std::fs;
use std::path::Path;

use planfit_core::config::{read_env, resolve_config_path, AppConfig, ConfigOverrides};
use toml::Value;

use crate::commands::CommandResult;

struct Field<'a> {
    key_path: &'a str,
    env_keys: &'a [&'a str],
    overridden: bool,
    value: String,
}

pub fn run(
    config: &AppConfig,
    explicit_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> CommandResult {
    let config_file_path = resolve_config_path(explicit_path);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let fields = [
        Field {
            key_path: "diagnosis.top_n",
            env_keys: &["PLANFIT_DIAGNOSIS_TOP_N"],
            overridden: overrides.top_n.is_some(),
            value: config.diagnosis.top_n.to_string(),
        },
        Field {
            key_path: "diagnosis.family_top_k",
            env_keys: &["PLANFIT_DIAGNOSIS_FAMILY_TOP_K"],
            overridden: false,
            value: config.diagnosis.family_top_k.to_string(),
        },
        Field {
            key_path: "catalog.path",
            env_keys: &["PLANFIT_CATALOG_PATH"],
            overridden: overrides.catalog_path.is_some(),
            value: config
                .catalog
                .path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "<bundled>".to_string()),
        },
        Field {
            key_path: "logging.level",
            env_keys: &["PLANFIT_LOGGING_LEVEL", "PLANFIT_LOG_LEVEL"],
            overridden: overrides.log_level.is_some(),
            value: config.logging.level.clone(),
        },
        Field {
            key_path: "logging.format",
            env_keys: &["PLANFIT_LOGGING_FORMAT", "PLANFIT_LOG_FORMAT"],
            overridden: overrides.log_format.is_some(),
            value: format!("{:?}", config.logging.format).to_lowercase(),
        },
    ];

    let mut lines = vec![
        "effective config (source precedence: cli > env > file > default):".to_string(),
    ];
    for field in &fields {
        let source = if field.overridden {
            "cli".to_string()
        } else {
            field_source(
                field.key_path,
                field.env_keys,
                config_file_doc.as_ref(),
                config_file_path.as_deref(),
            )
        };
        lines.push(render_line(field.key_path, &field.value, source));
    }

    CommandResult::success("config", lines.join("\n"))
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| read_env(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

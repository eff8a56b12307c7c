use std::{fs, io, path::Path, str::FromStr};

use anyhow::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_filter: String,
    pub windows: usize,
    pub clicks: u32,
    pub user_name: String,
    pub output: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            windows: 2,
            clicks: 1,
            user_name: "world".into(),
            output: OutputFormat::Text,
        }
    }
}

const ENV_OVERRIDES: [(&str, &str); 5] = [
    ("FORMHOST__LOG_FILTER", "log_filter"),
    ("FORMHOST__WINDOWS", "windows"),
    ("FORMHOST__CLICKS", "clicks"),
    ("FORMHOST__USER_NAME", "user_name"),
    ("FORMHOST__OUTPUT", "output"),
];

/// Defaults, then the TOML file at `path` (if present), then `FORMHOST__*` env vars.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    load_settings_with(path, |key| std::env::var(key).ok())
}

pub fn load_settings_with(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let table = toml::from_str::<toml::Table>(&raw)
                .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
            for (key, value) in &table {
                let value = match value {
                    toml::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                apply(&mut settings, key, &value);
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    }

    for (var, key) in ENV_OVERRIDES {
        if let Some(value) = env(var) {
            apply(&mut settings, key, &value);
        }
    }

    Ok(settings)
}

// Values that fail to parse leave the previous setting in place.
fn apply(settings: &mut Settings, key: &str, value: &str) {
    match key {
        "log_filter" => settings.log_filter = value.to_string(),
        "windows" => {
            if let Ok(parsed) = value.trim().parse() {
                settings.windows = parsed;
            }
        }
        "clicks" => {
            if let Ok(parsed) = value.trim().parse() {
                settings.clicks = parsed;
            }
        }
        "user_name" => settings.user_name = value.to_string(),
        "output" => {
            if let Ok(parsed) = value.parse() {
                settings.output = parsed;
            }
        }
        _ => {}
    }
}

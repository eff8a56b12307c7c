mod config;
mod forms;
mod host;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{OutputFormat, Settings};

#[derive(Parser, Debug)]
#[command(about = "Opens simulated windows whose forms are wired up by the run-time binder")]
struct Args {
    #[arg(long, default_value = "formhost.toml")]
    config: PathBuf,
    #[arg(long)]
    windows: Option<usize>,
    #[arg(long)]
    clicks: Option<u32>,
    #[arg(long)]
    user_name: Option<String>,
    #[arg(long, value_enum)]
    output: Option<OutputFormat>,
    #[arg(long)]
    log_filter: Option<String>,
}

impl Args {
    fn apply(self, settings: &mut Settings) {
        if let Some(v) = self.windows {
            settings.windows = v;
        }
        if let Some(v) = self.clicks {
            settings.clicks = v;
        }
        if let Some(v) = self.user_name {
            settings.user_name = v;
        }
        if let Some(v) = self.output {
            settings.output = v;
        }
        if let Some(v) = self.log_filter {
            settings.log_filter = v;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = config::load_settings(&args.config)?;
    args.apply(&mut settings);

    let (filter, rejected) = match EnvFilter::try_new(&settings.log_filter) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new("info"), Some(err)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    if let Some(err) = rejected {
        tracing::warn!(
            log_filter = %settings.log_filter,
            "invalid log filter ({err}); falling back to 'info'"
        );
    }
    tracing::debug!(?settings, "settings loaded");

    let report = host::run(&settings)?;
    match settings.output {
        OutputFormat::Text => print!("{}", host::render_text(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn cli_flags_override_file_and_env() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "windows = 3\noutput = \"text\"\nuser_name = \"file\"").expect("write");

        let mut settings = config::load_settings_with(file.path(), |key| match key {
            "FORMHOST__WINDOWS" => Some("4".to_string()),
            "FORMHOST__CLICKS" => Some("6".to_string()),
            _ => None,
        })
        .expect("settings");
        assert_eq!(settings.windows, 4);

        let args = Args::try_parse_from(["formhost", "--windows", "5", "--output", "json"])
            .expect("args");
        args.apply(&mut settings);

        assert_eq!(settings.windows, 5);
        assert_eq!(settings.output, OutputFormat::Json);
        assert_eq!(settings.clicks, 6);
        assert_eq!(settings.user_name, "file");
    }

    #[test]
    fn absent_flags_leave_settings_untouched() {
        let mut settings = Settings {
            windows: 7,
            log_filter: "binder=debug".into(),
            ..Settings::default()
        };
        let expected = settings.clone();

        Args::try_parse_from(["formhost"])
            .expect("args")
            .apply(&mut settings);
        assert_eq!(settings, expected);
    }

    #[test]
    fn rejects_unknown_output_format() {
        assert!(Args::try_parse_from(["formhost", "--output", "yaml"]).is_err());
    }
}

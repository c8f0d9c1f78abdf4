pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::loader::DEFAULT_HEADER_PREFIX;
#[cfg(feature = "cli")]
use crate::core::template::DEFAULT_TIMESTAMP_FORMAT;
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "race-cards")]
#[command(about = "Render race results from a CSV export into an HTML page")]
pub struct CliConfig {
    /// CSV export with the race results
    #[arg(long, default_value = "results.csv")]
    pub input: String,

    /// HTML template containing {{NAME}}, {{CARDS}} and {{GENERATED_AT}}
    #[arg(long, default_value = "template.html")]
    pub template: String,

    #[arg(long, default_value = "cards.html")]
    pub output: String,

    /// Name shown on the page
    #[arg(long)]
    pub name: String,

    /// Literal prefix identifying the header row
    #[arg(long, default_value = DEFAULT_HEADER_PREFIX)]
    pub header_prefix: String,

    /// strftime format for {{GENERATED_AT}}
    #[arg(long, default_value = DEFAULT_TIMESTAMP_FORMAT)]
    pub timestamp_format: String,

    /// Also write the parsed records as JSON to this path
    #[arg(long)]
    pub records_json: Option<String>,

    /// Directory relative paths are resolved against
    #[arg(long, default_value = ".")]
    pub base_dir: String,

    #[arg(long, help = "Load and render without writing any file")]
    pub dry_run: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn template_path(&self) -> &str {
        &self.template
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn subject_name(&self) -> &str {
        &self.name
    }

    fn header_prefix(&self) -> &str {
        &self.header_prefix
    }

    fn timestamp_format(&self) -> &str {
        &self.timestamp_format
    }

    fn records_json_path(&self) -> Option<&str> {
        self.records_json.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_path("template", &self.template)?;
        validation::validate_path("output", &self.output)?;
        validation::validate_path("base_dir", &self.base_dir)?;
        validation::validate_non_empty_string("name", &self.name)?;
        validation::validate_non_empty_string("header_prefix", &self.header_prefix)?;
        validation::validate_timestamp_format("timestamp_format", &self.timestamp_format)?;
        validation::validate_distinct_paths(
            "output",
            &self.output,
            &[self.input.as_str(), self.template.as_str()],
        )?;

        if let Some(records_json) = &self.records_json {
            validation::validate_path("records_json", records_json)?;
            validation::validate_distinct_paths(
                "records_json",
                records_json,
                &[self.input.as_str(), self.template.as_str(), self.output.as_str()],
            )?;
        }
        Ok(())
    }
}

use crate::core::cards::{CardStyle, DEFAULT_IMAGE_DIR, DEFAULT_LINK_LABEL, DEFAULT_MISSING_VALUE};
use crate::core::loader::DEFAULT_HEADER_PREFIX;
use crate::core::template::DEFAULT_TIMESTAMP_FORMAT;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub site: SiteConfig,
    pub input: InputConfig,
    pub template: TemplateConfig,
    pub output: OutputConfig,
    pub render: Option<RenderConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
    pub header_prefix: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub path: String,
    pub timestamp_format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub records_json: Option<String>,
    pub base_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    pub missing_value: Option<String>,
    pub image_dir: Option<String>,
    pub link_label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var regex"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SiteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RESULTS_DIR})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("site.name", &self.site.name)?;
        validation::validate_path("input.path", &self.input.path)?;
        validation::validate_path("template.path", &self.template.path)?;
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_non_empty_string("input.header_prefix", self.header_prefix())?;
        validation::validate_timestamp_format("template.timestamp_format", self.timestamp_format())?;
        validation::validate_distinct_paths(
            "output.path",
            &self.output.path,
            &[self.input.path.as_str(), self.template.path.as_str()],
        )?;

        if let Some(base_dir) = &self.output.base_dir {
            validation::validate_path("output.base_dir", base_dir)?;
        }

        if let Some(records_json) = &self.output.records_json {
            validation::validate_path("output.records_json", records_json)?;
            validation::validate_distinct_paths(
                "output.records_json",
                records_json,
                &[
                    self.input.path.as_str(),
                    self.template.path.as_str(),
                    self.output.path.as_str(),
                ],
            )?;
        }

        Ok(())
    }

    /// 取得卡片樣式，未設定的欄位使用預設值
    pub fn card_style(&self) -> CardStyle {
        let render = self.render.clone().unwrap_or_default();
        CardStyle {
            missing_value: render
                .missing_value
                .unwrap_or_else(|| DEFAULT_MISSING_VALUE.to_string()),
            image_dir: render
                .image_dir
                .unwrap_or_else(|| DEFAULT_IMAGE_DIR.to_string()),
            link_label: render
                .link_label
                .unwrap_or_else(|| DEFAULT_LINK_LABEL.to_string()),
        }
    }

    /// 取得儲存根目錄
    pub fn base_dir(&self) -> &str {
        self.output.base_dir.as_deref().unwrap_or(".")
    }

    /// 取得監控設定
    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.input.path
    }

    fn template_path(&self) -> &str {
        &self.template.path
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn subject_name(&self) -> &str {
        &self.site.name
    }

    fn header_prefix(&self) -> &str {
        self.input
            .header_prefix
            .as_deref()
            .unwrap_or(DEFAULT_HEADER_PREFIX)
    }

    fn timestamp_format(&self) -> &str {
        self.template
            .timestamp_format
            .as_deref()
            .unwrap_or(DEFAULT_TIMESTAMP_FORMAT)
    }

    fn records_json_path(&self) -> Option<&str> {
        self.output.records_json.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

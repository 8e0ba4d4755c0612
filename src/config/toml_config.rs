use crate::core::query::SortMode;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PortalError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TomlConfig {
    pub portal: PortalSection,
    pub data: DataSection,
    pub report: ReportSection,
    pub export: ExportSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalSection {
    pub name: String,
    pub description: String,
}

impl Default for PortalSection {
    fn default() -> Self {
        Self {
            name: "haji-portal".to_string(),
            description: "Ekosistem Haji monitoring portal".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSection {
    /// JSON snapshot holding the session's record lists.
    pub path: String,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            path: "./data/portal.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    /// Sort applied when the CLI does not pass one explicitly.
    pub default_sort: String,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            default_sort: "newest".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSection {
    pub output_dir: String,
    pub filename_prefix: String,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            output_dir: "./exports".to_string(),
            filename_prefix: "laporan".to_string(),
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PortalError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PortalError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {e}"),
        })
    }

    /// Replace `${VAR_NAME}` placeholders with environment values; unknown
    /// variables are left in place so validation can flag them.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{var_name}}}"))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("data.path", &self.data.path)?;
        validation::validate_file_extension("data.path", &self.data.path, &["json"])?;
        validation::validate_sort_mode("report.default_sort", &self.report.default_sort)?;
        validation::validate_non_empty_string("export.output_dir", &self.export.output_dir)?;
        validation::validate_non_empty_string(
            "export.filename_prefix",
            &self.export.filename_prefix,
        )?;
        Ok(())
    }

    /// CLI flags win over the file.
    pub fn apply_overrides(&mut self, data_path: Option<&str>, export_dir: Option<&str>) {
        if let Some(path) = data_path {
            self.data.path = path.to_string();
        }
        if let Some(dir) = export_dir {
            self.export.output_dir = dir.to_string();
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn data_path(&self) -> &str {
        &self.data.path
    }

    fn export_dir(&self) -> &str {
        &self.export.output_dir
    }

    fn filename_prefix(&self) -> &str {
        &self.export.filename_prefix
    }

    fn default_sort(&self) -> SortMode {
        // Validated at startup; fall back to newest for unvalidated configs.
        self.report.default_sort.parse().unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

use crate::config::AmalgamateConfig;
use crate::core::SelfIncludePolicy;
use crate::utils::error::{AmalgamateError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// `singleheader.toml` 的檔案格式，每個欄位都可省略
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub naming: NamingConfig,
    #[serde(default)]
    pub template: TemplateConfig,
    #[serde(default)]
    pub checks: ChecksConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    pub root: Option<PathBuf>,
    pub source_dir: Option<PathBuf>,
    pub license: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamingConfig {
    pub interface_extension: Option<String>,
    pub implementation_extension: Option<String>,
    pub guard_suffix: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateConfig {
    pub separator: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChecksConfig {
    pub self_include: Option<SelfIncludePolicy>,
    pub sort_modules: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| AmalgamateError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${PROJECT_ROOT})，未設定的變數保留原文
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| AmalgamateError::config(format!("env pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    /// 把檔案中有寫的欄位套到 `config` 上
    pub fn apply_to(&self, config: &mut AmalgamateConfig) {
        if let Some(root) = &self.paths.root {
            config.root_dir = root.clone();
        }
        if let Some(source_dir) = &self.paths.source_dir {
            config.source_dir = source_dir.clone();
        }
        if let Some(license) = &self.paths.license {
            config.license_path = license.clone();
        }
        if let Some(output_dir) = &self.paths.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(ext) = &self.naming.interface_extension {
            config.interface_extension = ext.clone();
        }
        if let Some(ext) = &self.naming.implementation_extension {
            config.implementation_extension = ext.clone();
        }
        if let Some(suffix) = &self.naming.guard_suffix {
            config.guard_suffix = suffix.clone();
        }
        if let Some(separator) = &self.template.separator {
            config.separator = separator.clone();
        }
        if let Some(policy) = self.checks.self_include {
            config.self_include = policy;
        }
        if let Some(sort) = self.checks.sort_modules {
            config.sort_modules = sort;
        }
    }

    pub fn into_config(self) -> AmalgamateConfig {
        let mut config = AmalgamateConfig::default();
        self.apply_to(&mut config);
        config
    }
}

#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::assembler::DEFAULT_SEPARATOR;
use crate::core::{ConfigProvider, RunMode, SelfIncludePolicy};
use crate::utils::error::{AmalgamateError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 執行設定。預設值就是原本固定的目錄慣例：
/// 從 `./src` 讀 `*.h`/`*.c`，授權條款在 `./LICENSE`，輸出到 `./<name>.h`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmalgamateConfig {
    /// 其他相對路徑的基準目錄（由 `LocalStorage` 解析）
    pub root_dir: PathBuf,
    pub source_dir: PathBuf,
    pub license_path: PathBuf,
    pub output_dir: PathBuf,
    pub interface_extension: String,
    pub implementation_extension: String,
    pub guard_suffix: String,
    pub separator: String,
    pub self_include: SelfIncludePolicy,
    pub sort_modules: bool,
    pub mode: RunMode,
}

impl Default for AmalgamateConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            source_dir: PathBuf::from("src"),
            license_path: PathBuf::from("LICENSE"),
            output_dir: PathBuf::from("."),
            interface_extension: "h".to_string(),
            implementation_extension: "c".to_string(),
            guard_suffix: "_IMPLEMENTATION".to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
            self_include: SelfIncludePolicy::default(),
            sort_modules: true,
            mode: RunMode::default(),
        }
    }
}

impl AmalgamateConfig {
    pub fn with_root(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            ..Self::default()
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }
}

impl ConfigProvider for AmalgamateConfig {
    fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    fn license_path(&self) -> &Path {
        &self.license_path
    }

    fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn interface_extension(&self) -> &str {
        &self.interface_extension
    }

    fn implementation_extension(&self) -> &str {
        &self.implementation_extension
    }

    fn guard_suffix(&self) -> &str {
        &self.guard_suffix
    }

    fn separator(&self) -> &str {
        &self.separator
    }

    fn self_include(&self) -> SelfIncludePolicy {
        self.self_include
    }

    fn sort_modules(&self) -> bool {
        self.sort_modules
    }

    fn mode(&self) -> RunMode {
        self.mode
    }
}

impl Validate for AmalgamateConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("root_dir", &self.root_dir)?;
        validation::validate_path("source_dir", &self.source_dir)?;
        validation::validate_path("license_path", &self.license_path)?;
        validation::validate_path("output_dir", &self.output_dir)?;

        validation::validate_extension("interface_extension", &self.interface_extension)?;
        validation::validate_extension(
            "implementation_extension",
            &self.implementation_extension,
        )?;
        if self.interface_extension == self.implementation_extension {
            return Err(AmalgamateError::InvalidConfigValueError {
                field: "implementation_extension".to_string(),
                value: self.implementation_extension.clone(),
                reason: "Must differ from the interface extension".to_string(),
            });
        }

        validation::validate_identifier_suffix("guard_suffix", &self.guard_suffix)?;

        // 輸出檔與介面檔同副檔名，放在同一目錄會直接覆蓋來源
        validation::validate_distinct_dirs(
            "output_dir",
            &self.root_dir,
            &self.source_dir,
            &self.output_dir,
        )?;

        Ok(())
    }
}

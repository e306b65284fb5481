use crate::utils::error::{AmalgamateError, ErrorCategory, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Discovery 找到的一組檔案路徑（尚未讀取內容）
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ModuleSource {
    pub name: String,
    pub interface_path: PathBuf,
    pub implementation_path: PathBuf,
}

/// 已載入、可組裝的模組。檔案內容一律當作不透明的位元組處理，不要求 UTF-8
#[derive(Debug, Clone)]
pub struct Module {
    pub name: String,
    pub interface_text: Vec<u8>,
    /// 實作檔第一行之後的所有行（不含換行字元）
    pub implementation_lines: Vec<Vec<u8>>,
    /// 被丟棄的第一行，空檔案時為 None
    pub dropped_line: Option<Vec<u8>>,
    pub guard_macro: String,
    pub license_text: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amalgamation {
    pub name: String,
    pub output_path: PathBuf,
    pub contents: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum SelfIncludePolicy {
    Ignore,
    #[default]
    Warn,
    Require,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    #[default]
    Write,
    DryRun,
    Check,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModuleStatus {
    Written { path: PathBuf, bytes: usize },
    Planned { path: PathBuf, bytes: usize },
    UpToDate { path: PathBuf },
    Failed { category: ErrorCategory, message: String },
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModuleOutcome {
    pub name: String,
    #[serde(flatten)]
    pub status: ModuleStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ModuleOutcome {
    pub fn new(name: impl Into<String>, status: ModuleStatus) -> Self {
        Self {
            name: name.into(),
            status,
            warnings: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub mode: RunMode,
    pub outcomes: Vec<ModuleOutcome>,
    /// 中止整個執行的第一個錯誤
    #[serde(skip)]
    pub error: Option<AmalgamateError>,
}

impl RunSummary {
    pub fn new(mode: RunMode) -> Self {
        let now = Utc::now();
        Self {
            started_at: now,
            finished_at: now,
            mode,
            outcomes: Vec::new(),
            error: None,
        }
    }

    /// 沒有找到任何介面檔
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn error(&self) -> Option<&AmalgamateError> {
        self.error.as_ref()
    }

    pub fn written_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome.status, ModuleStatus::Written { .. }))
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.outcomes.iter().map(|outcome| outcome.warnings.len()).sum()
    }

    pub fn outcome(&self, name: &str) -> Option<&ModuleOutcome> {
        self.outcomes.iter().find(|outcome| outcome.name == name)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn into_result(mut self) -> Result<RunSummary> {
        match self.error.take() {
            Some(error) => Err(error),
            None => Ok(self),
        }
    }
}

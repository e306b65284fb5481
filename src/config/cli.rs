use crate::config::toml_config::TomlConfig;
use crate::config::AmalgamateConfig;
use crate::core::{RunMode, SelfIncludePolicy};
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "singleheader")]
#[command(about = "Merge <name>.h/<name>.c pairs into single-header libraries")]
pub struct CliArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base directory the other paths are resolved against
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Directory containing the interface/implementation pairs
    #[arg(long = "src")]
    pub source_dir: Option<PathBuf>,

    /// License file appended to every generated header
    #[arg(long)]
    pub license: Option<PathBuf>,

    /// Destination directory for generated headers
    #[arg(long = "out")]
    pub output_dir: Option<PathBuf>,

    #[arg(long = "interface-ext")]
    pub interface_extension: Option<String>,

    #[arg(long = "impl-ext")]
    pub implementation_extension: Option<String>,

    /// Appended to the uppercased module name to form the guard macro
    #[arg(long)]
    pub guard_suffix: Option<String>,

    /// What to do when the first implementation line is not a self-include
    #[arg(long, value_enum)]
    pub self_include: Option<SelfIncludePolicy>,

    /// Process modules in discovery order instead of sorting by name
    #[arg(long)]
    pub no_sort: bool,

    /// Assemble everything but write nothing
    #[arg(long, conflicts_with = "check")]
    pub dry_run: bool,

    /// Fail if any generated header differs from what would be written
    #[arg(long)]
    pub check: bool,

    /// Write a JSON run summary to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliArgs {
    pub fn mode(&self) -> RunMode {
        if self.check {
            RunMode::Check
        } else if self.dry_run {
            RunMode::DryRun
        } else {
            RunMode::Write
        }
    }

    /// 預設值 → 設定檔 → 命令列，後者覆蓋前者
    pub fn resolve(&self) -> Result<AmalgamateConfig> {
        let mut config = AmalgamateConfig::default();

        if let Some(path) = &self.config {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            TomlConfig::from_file(path)?.apply_to(&mut config);
        }

        self.apply_to(&mut config);
        Ok(config)
    }

    pub fn apply_to(&self, config: &mut AmalgamateConfig) {
        if let Some(root) = &self.root {
            config.root_dir = root.clone();
        }
        if let Some(source_dir) = &self.source_dir {
            config.source_dir = source_dir.clone();
        }
        if let Some(license) = &self.license {
            config.license_path = license.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(ext) = &self.interface_extension {
            config.interface_extension = ext.clone();
        }
        if let Some(ext) = &self.implementation_extension {
            config.implementation_extension = ext.clone();
        }
        if let Some(suffix) = &self.guard_suffix {
            config.guard_suffix = suffix.clone();
        }
        if let Some(policy) = self.self_include {
            config.self_include = policy;
        }
        if self.no_sort {
            config.sort_modules = false;
        }
        config.mode = self.mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_no_flags_is_default_layout() {
        let args = CliArgs::parse_from(["singleheader"]);
        let config = args.resolve().unwrap();
        assert_eq!(config, AmalgamateConfig::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[paths]\nsource_dir = \"lib\"\nlicense = \"COPYING\"\n")
            .unwrap();
        let config_path = temp_file.path().to_str().unwrap().to_string();

        let args = CliArgs::parse_from([
            "singleheader",
            "--config",
            config_path.as_str(),
            "--src",
            "include",
            "--self-include",
            "require",
            "--check",
        ]);
        let config = args.resolve().unwrap();

        assert_eq!(config.source_dir, PathBuf::from("include"));
        assert_eq!(config.license_path, PathBuf::from("COPYING"));
        assert_eq!(config.self_include, SelfIncludePolicy::Require);
        assert_eq!(config.mode, RunMode::Check);
    }

    #[test]
    fn test_dry_run_conflicts_with_check() {
        assert!(CliArgs::try_parse_from(["singleheader", "--dry-run", "--check"]).is_err());
        let args = CliArgs::parse_from(["singleheader", "--dry-run", "--no-sort"]);
        let config = args.resolve().unwrap();
        assert_eq!(config.mode, RunMode::DryRun);
        assert!(!config.sort_modules);
    }
}

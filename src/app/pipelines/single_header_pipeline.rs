use crate::core::assembler::{self, output_file_name};
use crate::core::discovery;
use crate::core::loader;
use crate::core::{
    Amalgamation, ConfigProvider, Module, ModuleSource, ModuleStatus, Pipeline, RunMode,
    SelfIncludePolicy, Storage,
};
use crate::utils::error::{AmalgamateError, Result};
use std::path::Path;

pub struct SingleHeaderPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> SingleHeaderPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// 讀檔；檔案不存在時改用 `missing` 產生的錯誤
    async fn read_required<F>(&self, path: &Path, missing: F) -> Result<Vec<u8>>
    where
        F: FnOnce() -> AmalgamateError + Send,
    {
        match self.storage.read_file(path).await {
            Ok(text) => Ok(text),
            Err(e) if e.is_not_found() => Err(missing()),
            Err(e) => Err(e),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SingleHeaderPipeline<S, C> {
    fn mode(&self) -> RunMode {
        self.config.mode()
    }

    async fn discover(&self) -> Result<Vec<ModuleSource>> {
        tracing::debug!(
            "Scanning {} for *.{}",
            self.config.source_dir().display(),
            self.config.interface_extension()
        );
        let interface_paths = self
            .storage
            .list_files(self.config.source_dir(), self.config.interface_extension())
            .await?;

        Ok(discovery::pair_sources(
            interface_paths,
            self.config.implementation_extension(),
            self.config.sort_modules(),
        ))
    }

    async fn load(&self, source: &ModuleSource) -> Result<Module> {
        let interface_text = self
            .read_required(&source.interface_path, || AmalgamateError::MissingInterface {
                path: source.interface_path.clone(),
            })
            .await?;

        let implementation_text = self
            .read_required(&source.implementation_path, || {
                AmalgamateError::MissingImplementation {
                    module: source.name.clone(),
                    path: source.implementation_path.clone(),
                }
            })
            .await?;

        let license_path = self.config.license_path();
        let license_text = self
            .read_required(license_path, || AmalgamateError::MissingLicense {
                path: license_path.to_path_buf(),
            })
            .await?;

        Ok(loader::build_module(
            source,
            &interface_text,
            &implementation_text,
            &license_text,
            self.config.guard_suffix(),
        ))
    }

    fn inspect(&self, module: &Module) -> Result<Vec<String>> {
        let policy = self.config.self_include();
        if policy == SelfIncludePolicy::Ignore {
            return Ok(Vec::new());
        }

        let interface_file = output_file_name(&module.name, self.config.interface_extension());
        // 只為了比對而解碼，輸出仍是原始位元組
        let first_line = module
            .dropped_line
            .as_deref()
            .map(String::from_utf8_lossy)
            .unwrap_or_default();
        if loader::is_self_include(&first_line, &interface_file)? {
            return Ok(Vec::new());
        }

        if policy == SelfIncludePolicy::Require {
            return Err(AmalgamateError::UnexpectedFirstLine {
                module: module.name.clone(),
                line: first_line.to_string(),
            });
        }

        Ok(vec![format!(
            "Module '{}': dropped first line {:?} does not include {}",
            module.name, first_line, interface_file
        )])
    }

    fn assemble(&self, module: &Module) -> Amalgamation {
        let file_name = output_file_name(&module.name, self.config.interface_extension());
        Amalgamation {
            name: module.name.clone(),
            output_path: self.config.output_dir().join(file_name),
            contents: assembler::assemble(module, self.config.separator()),
        }
    }

    async fn emit(&self, amalgamation: &Amalgamation) -> Result<ModuleStatus> {
        let path = amalgamation.output_path.clone();
        let bytes = amalgamation.contents.len();

        match self.config.mode() {
            RunMode::Write => {
                self.storage
                    .write_file(&path, &amalgamation.contents)
                    .await?;
                Ok(ModuleStatus::Written { path, bytes })
            }
            RunMode::DryRun => Ok(ModuleStatus::Planned { path, bytes }),
            RunMode::Check => match self.storage.read_file(&path).await {
                Ok(existing) if existing == amalgamation.contents => {
                    Ok(ModuleStatus::UpToDate { path })
                }
                Ok(_) => Err(AmalgamateError::StaleOutput { path }),
                Err(e) if e.is_not_found() => Err(AmalgamateError::StaleOutput { path }),
                Err(e) => Err(e),
            },
        }
    }
}

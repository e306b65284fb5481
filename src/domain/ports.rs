use crate::domain::model::{
    Amalgamation, Module, ModuleSource, ModuleStatus, RunMode, SelfIncludePolicy,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// 列出 `dir` 底下（不遞迴）副檔名為 `extension` 的一般檔案
    fn list_files(
        &self,
        dir: &Path,
        extension: &str,
    ) -> impl std::future::Future<Output = Result<Vec<PathBuf>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source_dir(&self) -> &Path;
    fn license_path(&self) -> &Path;
    fn output_dir(&self) -> &Path;
    fn interface_extension(&self) -> &str;
    fn implementation_extension(&self) -> &str;
    fn guard_suffix(&self) -> &str;
    fn separator(&self) -> &str;
    fn self_include(&self) -> SelfIncludePolicy;
    fn sort_modules(&self) -> bool;
    fn mode(&self) -> RunMode;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    fn mode(&self) -> RunMode;
    async fn discover(&self) -> Result<Vec<ModuleSource>>;
    async fn load(&self, source: &ModuleSource) -> Result<Module>;
    /// 檢查被丟棄的第一行，回傳警告訊息
    fn inspect(&self, module: &Module) -> Result<Vec<String>>;
    fn assemble(&self, module: &Module) -> Amalgamation;
    async fn emit(&self, amalgamation: &Amalgamation) -> Result<ModuleStatus>;
}

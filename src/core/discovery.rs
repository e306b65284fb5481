use crate::domain::model::ModuleSource;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// 建立 `<dir>/*.<ext>` 的 glob 樣式，目錄與副檔名中的特殊字元會被跳脫
pub fn interface_pattern(dir: &Path, extension: &str) -> String {
    let dir = dir.to_string_lossy();
    let dir = dir.trim_end_matches(|c: char| c == '/' || c == '\\');
    format!(
        "{}/*.{}",
        glob::Pattern::escape(dir),
        glob::Pattern::escape(extension)
    )
}

/// 由介面檔路徑取得模組名稱（去掉目錄與副檔名，保留大小寫）
pub fn module_name(interface_path: &Path) -> Option<String> {
    interface_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
}

pub fn pair_sources(
    interface_paths: Vec<PathBuf>,
    implementation_extension: &str,
    sort: bool,
) -> Vec<ModuleSource> {
    let sources = interface_paths.into_iter().filter_map(|interface_path| {
        let Some(name) = module_name(&interface_path) else {
            tracing::debug!("Skipping unnamed interface file {}", interface_path.display());
            return None;
        };
        let implementation_path = interface_path.with_extension(implementation_extension);
        Some(ModuleSource {
            name,
            interface_path,
            implementation_path,
        })
    });

    if sort {
        // ModuleSource 先比 name，順便去重
        sources.collect::<BTreeSet<_>>().into_iter().collect()
    } else {
        sources.collect()
    }
}

use crate::utils::error::{AmalgamateError, Result};
use std::path::{Component, Path, PathBuf};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> AmalgamateError {
    AmalgamateError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let display = path.to_string_lossy();

    if path.as_os_str().is_empty() {
        return Err(invalid(field_name, &display, "Path cannot be empty"));
    }

    if display.contains('\0') {
        return Err(invalid(field_name, &display, "Path contains null bytes"));
    }

    Ok(())
}

/// 副檔名不含點，也不能含路徑分隔符
pub fn validate_extension(field_name: &str, extension: &str) -> Result<()> {
    if extension.trim().is_empty() {
        return Err(invalid(field_name, extension, "Extension cannot be empty"));
    }

    if extension.starts_with('.') {
        return Err(invalid(
            field_name,
            extension,
            "Extension must be given without the leading dot",
        ));
    }

    if extension.contains(&['/', '\\', '\0'][..]) {
        return Err(invalid(
            field_name,
            extension,
            "Extension cannot contain path separators",
        ));
    }

    Ok(())
}

pub fn validate_identifier_suffix(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(invalid(field_name, value, "Value cannot be empty"));
    }

    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid(
            field_name,
            value,
            "Only ASCII letters, digits and '_' are allowed in a macro name",
        ));
    }

    Ok(())
}

/// 純字面正規化：略過 `.`，`..` 抵銷前一個一般元件，不碰檔案系統也不解析 symlink
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// 以 `root` 解析相對路徑後再正規化，絕對路徑維持原樣
pub fn resolve_dir(root: &Path, path: &Path) -> PathBuf {
    let joined = root.join(path);
    let absolute = std::path::absolute(&joined).unwrap_or(joined);
    normalize_path(&absolute)
}

pub fn validate_distinct_dirs(
    field_name: &str,
    root: &Path,
    first: &Path,
    second: &Path,
) -> Result<()> {
    if resolve_dir(root, first) == resolve_dir(root, second) {
        return Err(invalid(
            field_name,
            &second.to_string_lossy(),
            format!(
                "Generated files would overwrite the inputs in {}",
                first.display()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("source_dir", Path::new("src")).is_ok());
        assert!(validate_path("source_dir", Path::new("")).is_err());
        assert!(validate_path("source_dir", Path::new("sr\0c")).is_err());
    }

    #[test]
    fn test_validate_extension() {
        assert!(validate_extension("interface_extension", "h").is_ok());
        assert!(validate_extension("interface_extension", "hpp").is_ok());
        assert!(validate_extension("interface_extension", "").is_err());
        assert!(validate_extension("interface_extension", ".h").is_err());
        assert!(validate_extension("interface_extension", "x/h").is_err());
    }

    #[test]
    fn test_validate_identifier_suffix() {
        assert!(validate_identifier_suffix("guard_suffix", "_IMPLEMENTATION").is_ok());
        assert!(validate_identifier_suffix("guard_suffix", "_IMPL2").is_ok());
        assert!(validate_identifier_suffix("guard_suffix", "").is_err());
        assert!(validate_identifier_suffix("guard_suffix", "-IMPL").is_err());
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("./src/")), PathBuf::from("src"));
        assert_eq!(normalize_path(Path::new("src/../src")), PathBuf::from("src"));
        assert_eq!(normalize_path(Path::new("a/b/../../c")), PathBuf::from("c"));
        assert_eq!(normalize_path(Path::new("../out")), PathBuf::from("../out"));
        assert_eq!(normalize_path(Path::new("/../src")), PathBuf::from("/src"));
    }

    #[test]
    fn test_validate_distinct_dirs() {
        let root = Path::new("/work/project");
        let distinct = |first: &str, second: &str| {
            validate_distinct_dirs("output_dir", root, Path::new(first), Path::new(second))
        };

        assert!(distinct("src", ".").is_ok());
        assert!(distinct("src", "src/out").is_ok());
        assert!(distinct("./src", "src").is_err());
        assert!(distinct("src", "src/").is_err());
        assert!(distinct("src", "src/../src").is_err());
        assert!(distinct("src", "/work/project/src").is_err());
        assert!(distinct("/work/project/src", "./src").is_err());
        assert!(distinct("src", "/work/other/src").is_ok());
    }

    #[test]
    fn test_validate_distinct_dirs_relative_root() {
        let root = Path::new(".");
        let cwd = std::env::current_dir().unwrap();
        assert!(validate_distinct_dirs("output_dir", root, Path::new("src"), &cwd.join("src")).is_err());
        assert!(validate_distinct_dirs("output_dir", root, Path::new("src"), &cwd).is_ok());
    }
}

use crate::domain::model::{Module, ModuleSource};
use crate::utils::error::{AmalgamateError, Result};
use regex::Regex;
use std::sync::OnceLock;

fn include_regex() -> Result<&'static Regex> {
    static INCLUDE: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    INCLUDE
        .get_or_init(|| Regex::new(r#"^\s*#\s*include\s*["<]([^">]+)[">]"#))
        .as_ref()
        .map_err(|e| AmalgamateError::config(format!("include pattern: {}", e)))
}

/// `\r\n` 與單獨的 `\r` 一律轉成 `\n`
pub fn normalize_newlines(text: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    let mut bytes = text.iter().copied().peekable();
    while let Some(byte) = bytes.next() {
        if byte == b'\r' {
            bytes.next_if_eq(&b'\n');
            out.push(b'\n');
        } else {
            out.push(byte);
        }
    }
    out
}

pub fn guard_macro(name: &str, suffix: &str) -> String {
    format!("{}{}", name.to_uppercase(), suffix)
}

/// 以 `\n` 切行，行為同 `str::lines`：結尾的換行不產生額外的空行
pub fn split_lines(text: &[u8]) -> Vec<Vec<u8>> {
    if text.is_empty() {
        return Vec::new();
    }
    let body = text.strip_suffix(b"\n").unwrap_or(text);
    body.split(|&byte| byte == b'\n').map(<[u8]>::to_vec).collect()
}

/// 拆出實作檔的第一行（慣例上是 include 自己的標頭檔）與其餘各行
pub fn split_implementation(text: &[u8]) -> (Option<Vec<u8>>, Vec<Vec<u8>>) {
    let mut lines = split_lines(text).into_iter();
    let first = lines.next();
    (first, lines.collect())
}

/// 取出 `#include "..."` / `#include <...>` 的目標路徑
pub fn include_target(line: &str) -> Result<Option<&str>> {
    Ok(include_regex()?
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|target| target.as_str().trim()))
}

/// 第一行是否 include 了同名的介面檔（只比對最後一個路徑元件）
pub fn is_self_include(line: &str, interface_file: &str) -> Result<bool> {
    Ok(include_target(line)?
        .and_then(|target| target.rsplit(|c: char| c == '/' || c == '\\').next())
        .is_some_and(|file| file == interface_file))
}

pub fn build_module(
    source: &ModuleSource,
    interface_text: &[u8],
    implementation_text: &[u8],
    license_text: &[u8],
    guard_suffix: &str,
) -> Module {
    let (dropped_line, implementation_lines) =
        split_implementation(&normalize_newlines(implementation_text));

    Module {
        name: source.name.clone(),
        interface_text: normalize_newlines(interface_text),
        implementation_lines,
        dropped_line,
        guard_macro: guard_macro(&source.name, guard_suffix),
        license_text: normalize_newlines(license_text),
    }
}

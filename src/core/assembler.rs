use crate::domain::model::Module;

/// 標頭與實作之間的分隔註解
pub const DEFAULT_SEPARATOR: &str = "\n/*\n * -----------------------------------------------------------------------------\n * ----| IMPLEMENTATION |-------------------------------------------------------\n * -----------------------------------------------------------------------------\n */\n";

pub const COMMENT_START: &str = "/*\n";
pub const COMMENT_END: &str = "*/";

pub fn output_file_name(name: &str, interface_extension: &str) -> String {
    format!("{}.{}", name, interface_extension)
}

/// 依固定樣板組出單一標頭檔內容：
/// 介面原文、分隔註解、`#ifdef` 區塊包住的實作、最後是授權條款註解
pub fn assemble(module: &Module, separator: &str) -> Vec<u8> {
    let body_len: usize = module
        .implementation_lines
        .iter()
        .map(|line| line.len() + 1)
        .sum();
    let mut out = Vec::with_capacity(
        module.interface_text.len()
            + separator.len()
            + body_len
            + module.license_text.len()
            + module.guard_macro.len() * 2
            + 64,
    );

    out.extend_from_slice(&module.interface_text);
    out.extend_from_slice(separator.as_bytes());

    out.extend_from_slice(b"#ifdef ");
    out.extend_from_slice(module.guard_macro.as_bytes());
    out.push(b'\n');

    for line in &module.implementation_lines {
        out.extend_from_slice(line);
        out.push(b'\n');
    }

    out.extend_from_slice(b"#endif /* !");
    out.extend_from_slice(module.guard_macro.as_bytes());
    out.extend_from_slice(b" */\n\n");

    out.extend_from_slice(COMMENT_START.as_bytes());
    out.extend_from_slice(&module.license_text);
    out.extend_from_slice(COMMENT_END.as_bytes());

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(interface: &str, lines: &[&str], license: &str) -> Module {
        Module {
            name: "foo".to_string(),
            interface_text: interface.as_bytes().to_vec(),
            implementation_lines: lines.iter().map(|l| l.as_bytes().to_vec()).collect(),
            dropped_line: Some(b"#include \"foo.h\"".to_vec()),
            guard_macro: "FOO_IMPLEMENTATION".to_string(),
            license_text: license.as_bytes().to_vec(),
        }
    }

    fn assemble_text(module: &Module, separator: &str) -> String {
        String::from_utf8(assemble(module, separator)).unwrap()
    }

    #[test]
    fn test_assemble_reference_scenario() {
        let output = assemble_text(
            &module("DECLARATIONS", &["BODY_LINE_1", "BODY_LINE_2"], "MIT"),
            DEFAULT_SEPARATOR,
        );

        let expected = format!(
            "DECLARATIONS{}#ifdef FOO_IMPLEMENTATION\nBODY_LINE_1\nBODY_LINE_2\n#endif /* !FOO_IMPLEMENTATION */\n\n/*\nMIT*/",
            DEFAULT_SEPARATOR
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_guard_appears_once() {
        let output = assemble_text(
            &module("int f(void);\n", &["int f(void) { return 1; }"], "MIT\n"),
            DEFAULT_SEPARATOR,
        );
        assert_eq!(output.matches("#ifdef FOO_IMPLEMENTATION").count(), 1);
        assert_eq!(output.matches("#endif /* !FOO_IMPLEMENTATION */").count(), 1);
    }

    #[test]
    fn test_empty_body() {
        let output = assemble_text(&module("X\n", &[], "L\n"), "\n--\n");
        assert_eq!(
            output,
            "X\n\n--\n#ifdef FOO_IMPLEMENTATION\n#endif /* !FOO_IMPLEMENTATION */\n\n/*\nL\n*/"
        );
    }

    #[test]
    fn test_license_is_verbatim() {
        let license = "Copyright (c) 2024\n\nPermission is hereby granted...\n";
        let output = assemble_text(&module("X\n", &["y"], license), DEFAULT_SEPARATOR);
        let trailer = format!("{}{}{}", COMMENT_START, license, COMMENT_END);
        assert!(output.ends_with(&trailer));
    }

    #[test]
    fn test_default_separator_banner() {
        assert!(DEFAULT_SEPARATOR.starts_with("\n/*\n"));
        assert!(DEFAULT_SEPARATOR.contains(" * ----| IMPLEMENTATION |"));
        assert!(DEFAULT_SEPARATOR.ends_with(" */\n"));
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("tb_str", "h"), "tb_str.h");
    }
}

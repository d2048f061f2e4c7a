//! Static denylist checks run before any interpreter process is spawned.

use regex::Regex;
use std::sync::LazyLock;

const PYTHON_DENIED_IMPORTS: &[&str] = &["os", "sys", "subprocess", "shutil", "socket", "ctypes", "importlib", "pathlib"];
const PYTHON_DENIED_CALLS: &[&str] = &["__import__", "eval(", "exec(", "open(", "compile("];

const JS_DENIED_TOKENS: &[&str] = &["require(", "process.", "child_process", "fs.", "import("];

static PYTHON_IMPORT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = PYTHON_DENIED_IMPORTS.join("|");
    Regex::new(&format!(r"(?m)^\s*(?:import\s+({alternation})\b|from\s+({alternation})\b)")).expect("valid regex")
});

/// Scans Python source for denylisted imports or dangerous builtins.
/// Returns the offending token if found.
pub fn scan_python(source: &str) -> Option<String> {
    if let Some(captures) = PYTHON_IMPORT_PATTERN.captures(source) {
        return captures.get(1).or_else(|| captures.get(2)).map(|m| m.as_str().to_string());
    }
    PYTHON_DENIED_CALLS.iter().find(|token| source.contains(**token)).map(|t| t.to_string())
}

/// Scans JS/TS source for denylisted globals and module access.
pub fn scan_js(source: &str) -> Option<String> {
    JS_DENIED_TOKENS.iter().find(|token| source.contains(**token)).map(|t| t.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_denied_python_import() {
        assert_eq!(scan_python("import os\nprint(1)"), Some("os".to_string()));
    }

    #[test]
    fn flags_denied_python_from_import() {
        assert_eq!(scan_python("from subprocess import run"), Some("subprocess".to_string()));
    }

    #[test]
    fn flags_denied_python_call() {
        assert_eq!(scan_python("eval('1+1')"), Some("eval(".to_string()));
    }

    #[test]
    fn allows_safe_python() {
        assert!(scan_python("x = 1 + 2\nprint(x)").is_none());
    }

    #[test]
    fn flags_denied_js_token() {
        assert_eq!(scan_js("const fs = require('fs')"), Some("require(".to_string()));
    }

    #[test]
    fn allows_safe_js() {
        assert!(scan_js("const x = 1 + 2; console.log(x)").is_none());
    }
}

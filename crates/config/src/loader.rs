use crate::Config;
use anyhow::bail;
use indoc::indoc;
use serde::Deserialize;
use serde_dynamic_string::DynamicString;
use std::fmt::Write;
use std::path::Path;
use std::str::FromStr;
use toml::Value;

/// Shown alongside the read error when `relay.toml` is missing, so a fresh
/// checkout has something to copy instead of guessing at section names.
const SAMPLE_CONFIG: &str = indoc! {r#"
    [server]
    port = 8080

    [backend]
    url = "http://localhost:11434"

    [data]
    data_dir = "./data"
"#};

/// Loads and validates `relay.toml` from `path`: parses TOML, expands
/// `{{ env.VAR }}` placeholders against the process environment, then
/// deserializes into [`Config`]. Unknown keys and malformed placeholders are
/// both startup errors, never silently ignored.
pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}\n\nexpected something like:\n{SAMPLE_CONFIG}", path.display()))?;
    let mut raw_config: Value = toml::from_str(&content)?;

    expand_dynamic_strings(&mut Vec::new(), &mut raw_config)?;

    let config = Config::deserialize(raw_config)?;
    Ok(config)
}

fn expand_dynamic_strings<'a>(path: &mut Vec<Result<&'a str, usize>>, value: &'a mut Value) -> anyhow::Result<()> {
    match value {
        Value::String(s) => match DynamicString::<String>::from_str(s) {
            Ok(out) => *s = out.into_inner(),
            Err(err) => bail!("failed to expand dynamic string at path '{}': {err}", render_path(path)),
        },
        Value::Array(values) => {
            for (i, value) in values.iter_mut().enumerate() {
                path.push(Err(i));
                expand_dynamic_strings(path, value)?;
                path.pop();
            }
        }
        Value::Table(table) => {
            for (key, value) in table.iter_mut() {
                path.push(Ok(key));
                expand_dynamic_strings(path, value)?;
                path.pop();
            }
        }
        _ => {}
    }
    Ok(())
}

fn render_path(path: &[Result<&str, usize>]) -> String {
    let mut rendered = String::new();
    for segment in path {
        match segment {
            Ok(s) => {
                rendered.push_str(s);
                rendered.push('.');
            }
            Err(i) => {
                write!(rendered, "[{i}]").unwrap();
            }
        }
    }
    if rendered.ends_with('.') {
        rendered.pop();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn loads_defaults_from_an_empty_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "").unwrap();
        let config = load(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn expands_env_var_placeholders() {
        unsafe { std::env::set_var("RELAY_TEST_OLLAMA_URL", "http://example.test:11434") };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[backend]\nurl = \"{{{{ env.RELAY_TEST_OLLAMA_URL }}}}\"").unwrap();
        let config = load(file.path()).unwrap();
        assert_eq!(config.backend.url, "http://example.test:11434");
    }

    #[test]
    fn rejects_unknown_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[server]\nnonexistent_key = true").unwrap();
        assert!(load(file.path()).is_err());
    }
}

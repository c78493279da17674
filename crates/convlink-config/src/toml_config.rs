use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use toml::Value;

use super::codec_config::CodecConfig;

/// Tool-level configuration: the code parameters plus ambient options.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    pub code: CodecConfig,
    pub debug_log: Option<String>,
}

/// Build `ToolConfig` from a TOML configuration string
pub fn from_toml_str(toml_str: &str) -> Result<ToolConfig, Box<dyn std::error::Error>> {
    let root: TomlConfigRoot = toml::from_str(toml_str)?;

    // Various sanity checks
    let expected_config_version = "1.0";
    if !root.config_version.eq(expected_config_version) {
        return Err(format!(
            "Unrecognized config_version: {}, expect {}",
            root.config_version, expected_config_version
        )
        .into());
    }
    if !root.extra.is_empty() {
        return Err(format!("Unrecognized top-level fields: {:?}", sorted_keys(&root.extra)).into());
    }
    if let Some(ref code) = root.code {
        if !code.extra.is_empty() {
            return Err(format!("Unrecognized fields: code::{:?}", sorted_keys(&code.extra)).into());
        }
    }

    // Build config from defaults, patched with whatever the file provides
    let mut cfg = ToolConfig {
        code: CodecConfig::default(),
        debug_log: root.debug_log,
    };
    if let Some(code) = root.code {
        apply_code_patch(&mut cfg.code, code);
        cfg.code.validate()?;
    }

    Ok(cfg)
}

/// Build `ToolConfig` from any reader.
pub fn from_reader<R: Read>(reader: R) -> Result<ToolConfig, Box<dyn std::error::Error>> {
    let mut contents = String::new();
    let mut reader = BufReader::new(reader);
    reader.read_to_string(&mut contents)?;
    from_toml_str(&contents)
}

/// Build `ToolConfig` from a file path.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ToolConfig, Box<dyn std::error::Error>> {
    let f = File::open(path)?;
    let r = BufReader::new(f);
    let cfg = from_reader(r)?;
    Ok(cfg)
}

fn apply_code_patch(dst: &mut CodecConfig, src: CodeDto) {
    if let Some(v) = src.register_len {
        dst.register_len = v;
    }
    if let Some(v) = src.upper_scheme {
        dst.upper_scheme = v;
    }
    if let Some(v) = src.lower_scheme {
        dst.lower_scheme = v;
    }
}

fn sorted_keys(map: &HashMap<String, Value>) -> Vec<&str> {
    let mut v: Vec<&str> = map.keys().map(|s| s.as_str()).collect();
    v.sort_unstable();
    v
}

/// ----------------------- DTOs for input shape -----------------------

#[derive(Deserialize)]
struct TomlConfigRoot {
    config_version: String,
    debug_log: Option<String>,

    #[serde(default)]
    code: Option<CodeDto>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct CodeDto {
    register_len: Option<usize>,
    upper_scheme: Option<u32>,
    lower_scheme: Option<u32>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let cfg = from_toml_str(
            r#"
            config_version = "1.0"
            debug_log = "/tmp/convlink.log"

            [code]
            register_len = 3
            upper_scheme = 5
            lower_scheme = 7
            "#,
        )
        .unwrap();
        assert_eq!(cfg.code, CodecConfig::new(3, 5, 7));
        assert_eq!(cfg.debug_log.as_deref(), Some("/tmp/convlink.log"));
    }

    #[test]
    fn test_defaults_when_sections_absent() {
        let cfg = from_toml_str("config_version = \"1.0\"\n").unwrap();
        assert_eq!(cfg.code, CodecConfig::default());
        assert!(cfg.debug_log.is_none());
    }

    #[test]
    fn test_partial_code_section() {
        let cfg = from_toml_str(
            r#"
            config_version = "1.0"

            [code]
            register_len = 4
            "#,
        )
        .unwrap();
        assert_eq!(cfg.code, CodecConfig::new(4, 53, 46));
    }

    #[test]
    fn test_rejects_wrong_version() {
        let err = from_toml_str("config_version = \"0.9\"\n").unwrap_err();
        assert!(err.to_string().contains("config_version"));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = from_toml_str(
            r#"
            config_version = "1.0"
            bogus = 1
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("bogus"));

        let err = from_toml_str(
            r#"
            config_version = "1.0"

            [code]
            register_length = 5
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("register_length"));
    }

    #[test]
    fn test_rejects_invalid_code_params() {
        let err = from_toml_str(
            r#"
            config_version = "1.0"

            [code]
            upper_scheme = 0
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("upper_scheme"));
    }
}

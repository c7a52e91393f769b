//! Converter configuration.
//!
//! Options can come from a YAML file and be overridden from the command line. Every
//! field has a default, so an empty file is a valid configuration:
//!
//! ```yaml
//! decode:
//!   timestamps: utc      # or local
//!   deduplicate: true
//! output:
//!   delimiter: ","
//!   quote_all: false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::types::TimestampPolicy;
use crate::{Result, ViatomError};

/// Options for the header parser and record decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeOptions {
    /// How the header start time maps to epoch milliseconds
    pub timestamps: TimestampPolicy,
    /// Apply the double-sampling correction at 2000 ms resolution
    pub deduplicate: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { timestamps: TimestampPolicy::Utc, deduplicate: true }
    }
}

/// Options for the delimited text writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputOptions {
    /// Field separator
    pub delimiter: char,
    /// Wrap every field in double quotes
    pub quote_all: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self { delimiter: ',', quote_all: false }
    }
}

impl OutputOptions {
    pub fn validate(&self) -> Result<()> {
        if matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(ViatomError::config_error(
                "output.delimiter",
                format!("{:?} cannot be used as a field delimiter", self.delimiter),
            ));
        }
        Ok(())
    }
}

/// Complete converter configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    pub decode: DecodeOptions,
    pub output: OutputOptions,
}

impl ConverterConfig {
    /// Parse a configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Self::parse(yaml, "configuration")
    }

    /// Load a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());

        let context = path.display().to_string();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| ViatomError::config_error(context.as_str(), e.to_string()))?;
        Self::parse(&yaml, &context)
    }

    fn parse(yaml: &str, context: &str) -> Result<Self> {
        // serde_yaml_ng rejects a document with no content; treat it as all defaults.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml_ng::from_str(yaml)
            .map_err(|e| ViatomError::config_error(context, e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.output.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_utc_comma_separated() {
        let config = ConverterConfig::default();
        assert_eq!(config.decode.timestamps, TimestampPolicy::Utc);
        assert!(config.decode.deduplicate);
        assert_eq!(config.output.delimiter, ',');
        assert!(!config.output.quote_all);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(ConverterConfig::from_yaml_str("").unwrap(), ConverterConfig::default());
        assert_eq!(ConverterConfig::from_yaml_str("  \n").unwrap(), ConverterConfig::default());
    }

    #[test]
    fn partial_document_fills_defaults() {
        let config = ConverterConfig::from_yaml_str("decode:\n  timestamps: local\n").unwrap();
        assert_eq!(config.decode.timestamps, TimestampPolicy::Local);
        assert!(config.decode.deduplicate);
        assert_eq!(config.output, OutputOptions::default());
    }

    #[test]
    fn full_document_parses() {
        let yaml = r#"
decode:
  timestamps: utc
  deduplicate: false
output:
  delimiter: ";"
  quote_all: true
"#;
        let config = ConverterConfig::from_yaml_str(yaml).unwrap();
        assert!(!config.decode.deduplicate);
        assert_eq!(config.output.delimiter, ';');
        assert!(config.output.quote_all);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = ConverterConfig::from_yaml_str("decode:\n  dedupe: false\n");
        assert!(matches!(result, Err(ViatomError::Config { .. })));
    }

    #[test]
    fn quote_delimiter_is_rejected() {
        let result = ConverterConfig::from_yaml_str("output:\n  delimiter: '\"'\n");
        match result {
            Err(ViatomError::Config { context, .. }) => assert_eq!(context, "output.delimiter"),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_reports_path() {
        let result = ConverterConfig::load("/nonexistent/viatom.yaml");
        match result {
            Err(ViatomError::Config { context, .. }) => {
                assert!(context.contains("/nonexistent/viatom.yaml"))
            }
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}

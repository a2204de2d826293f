//! Result rendering for the CLI.
//!
//! `--format json` prints the full [`Conversion`] record; text prints only
//! the converted value so the output can be piped.

use std::fmt;

use miette::{IntoDiagnostic, Result};
use numrep_encoding::Conversion;
use serde::{Deserialize, Serialize};

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        self == OutputFormat::Json
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        })
    }
}

/// Render a conversion in `format`.
pub fn render(conversion: &Conversion, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(conversion.output.clone()),
        OutputFormat::Json => serde_json::to_string_pretty(conversion).into_diagnostic(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numrep_encoding::{convert, EncodeOptions, NumberSystem, Scheme};

    fn sample() -> Conversion {
        convert(
            "-5",
            NumberSystem::Decimal,
            NumberSystem::Binary(Scheme::TwosComplement),
            &EncodeOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_render_text() {
        assert_eq!(render(&sample(), OutputFormat::Text).unwrap(), "11111011");
    }

    #[test]
    fn test_render_json() {
        let json = render(&sample(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["input"], "-5");
        assert_eq!(parsed["output"], "11111011");
        assert_eq!(parsed["to"], "twos-complement");
    }

    #[test]
    fn test_render_json_infinity() {
        let conversion = convert(
            "11111111100000000000000000000000",
            NumberSystem::Binary(Scheme::Ieee754),
            NumberSystem::Decimal,
            &EncodeOptions::default(),
        )
        .unwrap();
        let json = render(&conversion, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["output"], "-inf");
        assert_eq!(parsed["value"]["type"], "float");
        assert_eq!(parsed["value"]["value"], "-inf");
    }

    #[test]
    fn test_format_from_config_text() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: OutputFormat,
        }
        let wrapper: Wrapper = toml::from_str(r#"format = "json""#).unwrap();
        assert!(wrapper.format.is_json());
    }
}

//! Show the effective configuration.

use miette::Result;

use super::EncodingArgs;
use crate::config::Config;

/// Print `config`, with any flags applied, as TOML.
pub fn run(mut config: Config, encoding: EncodingArgs) -> Result<()> {
    encoding.apply(&mut config);
    // Reject an unusable layout before printing.
    config.layout()?;
    print!("{}", config.to_toml()?);
    Ok(())
}

//! One-shot conversion command.

use clap::Args;
use miette::{Result, WrapErr};
use numrep_encoding::NumberSystem;

use super::EncodingArgs;
use crate::config::Config;
use crate::output::{render, OutputFormat};

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Decimal number or bit string to convert
    #[arg(value_name = "INPUT", allow_hyphen_values = true)]
    pub input: String,

    /// System the input is written in (decimal, unsigned, signed-magnitude,
    /// ones-complement, twos-complement, ieee754)
    #[arg(short, long, value_name = "SYSTEM")]
    pub from: NumberSystem,

    /// System to convert to
    #[arg(short, long, value_name = "SYSTEM")]
    pub to: NumberSystem,

    #[command(flatten)]
    pub encoding: EncodingArgs,

    /// Output format
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

/// Run the convert command and print the result to stdout.
pub fn run(mut config: Config, args: ConvertArgs) -> Result<()> {
    args.encoding.apply(&mut config);
    let options = config.encode_options()?;
    let format = args.format.unwrap_or(config.output.format);

    tracing::debug!("converting '{}' from {} to {}", args.input, args.from, args.to);
    let conversion = numrep_encoding::convert(&args.input, args.from, args.to, &options)
        .wrap_err_with(|| {
            format!(
                "Failed to convert '{}' from {} to {}",
                args.input, args.from, args.to
            )
        })?;

    println!("{}", render(&conversion, format)?);
    Ok(())
}

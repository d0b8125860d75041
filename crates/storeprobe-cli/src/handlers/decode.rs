//! Decode command handler

use std::io::Read;
use std::path::Path;

use storeprobe::decode_with_source;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;
use crate::DecodeArgs;

/// Execute the decode command
pub fn execute_decode(config: &CliConfig, args: &DecodeArgs) -> CliResult<()> {
    let (source_name, body) = read_input(args.file.as_deref())?;
    let rendered = decode_text(&body, &source_name, config.format)?;
    println!("{rendered}");
    Ok(())
}

/// Read the body from `file`, or stdin when `None` or `-`.
///
/// Invalid UTF-8 is replaced with U+FFFD.
pub fn read_input(file: Option<&Path>) -> CliResult<(String, String)> {
    let (source_name, bytes) = match file {
        Some(path) if path != Path::new("-") => (path.display().to_string(), std::fs::read(path)?),
        _ => {
            let mut bytes = Vec::new();
            std::io::stdin().read_to_end(&mut bytes)?;
            ("stdin".to_string(), bytes)
        }
    };
    Ok((source_name, String::from_utf8_lossy(&bytes).into_owned()))
}

/// Decode `body` and render the JSON
pub fn decode_text(body: &str, source_name: &str, format: OutputFormat) -> CliResult<String> {
    let decoded = decode_with_source(body);
    tracing::info!(source = source_name, path = decoded.source_label(), "decoded body");
    let value = decoded.into_value().ok_or_else(|| CliError::Undecodable {
        source_name: source_name.to_string(),
        len: body.len(),
    })?;
    format.render(&value)
}

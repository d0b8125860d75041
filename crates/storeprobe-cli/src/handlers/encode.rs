//! Encode command handler

use serde_json::json;
use storeprobe::{FormBody, FormValue, FORM_URLENCODED_CONTENT_TYPE};

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;
use crate::EncodeArgs;

/// Execute the encode command
pub fn execute_encode(config: &CliConfig, args: &EncodeArgs) -> CliResult<()> {
    let body = build_form(&args.fields)?;
    println!("{}", render_form(&body, config.format)?);
    Ok(())
}

/// Parse one `KEY=VALUE` argument.
///
/// A bare `KEY` is absent; `KEY=` is an empty string.
pub fn parse_field(arg: &str) -> CliResult<(String, FormValue)> {
    let (key, value) = match arg.split_once('=') {
        Some((key, value)) => (key, FormValue::from(value)),
        None => (arg, FormValue::Absent),
    };
    if key.is_empty() {
        return Err(CliError::invalid_argument(format!(
            "field `{arg}` has no key"
        )));
    }
    Ok((key.to_string(), value))
}

/// Build a form body from `KEY=VALUE` arguments, in order
pub fn build_form(args: &[String]) -> CliResult<FormBody> {
    let mut body = FormBody::new();
    for arg in args {
        let (key, value) = parse_field(arg)?;
        body.push(key, value);
    }
    Ok(body)
}

/// Render an encoded body
pub fn render_form(body: &FormBody, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Text => Ok(body.encode()),
        OutputFormat::Json => format.render(&json!({
            "content_type": FORM_URLENCODED_CONTENT_TYPE,
            "body": body.encode(),
        })),
    }
}

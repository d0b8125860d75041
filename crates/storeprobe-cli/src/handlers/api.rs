//! Api command handler

use serde_json::{json, Value};
use storeprobe::api::{ApiConfig, ApiResponse, StoreApiClient};

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{OutputFormat, Reporter};
use crate::{ApiArgs, ApiCommand};

/// Execute the api command on a fresh runtime
pub fn execute_api(config: &CliConfig, args: &ApiArgs) -> CliResult<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let response = runtime.block_on(call(args))?;

    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());
    if config.format == OutputFormat::Text {
        reporter.info(&status_line(&response));
    }
    println!("{}", render_response(&response, config.format)?);
    Ok(())
}

/// Client configuration from command-line arguments
#[must_use]
pub fn client_config(args: &ApiArgs) -> ApiConfig {
    ApiConfig::new()
        .with_base_url(args.base_url.clone())
        .with_timeout_ms(args.timeout)
}

/// Call the selected endpoint
pub async fn call(args: &ApiArgs) -> CliResult<ApiResponse> {
    let client = StoreApiClient::new(client_config(args))?;
    let response = match &args.endpoint {
        ApiCommand::Products => client.products_list().await?,
        ApiCommand::Brands => client.brands_list().await?,
        ApiCommand::Search { term } => client.search_product(term.as_deref()).await?,
        ApiCommand::User { email } => client.user_detail_by_email(email).await?,
        ApiCommand::Login { email, password } => client.verify_login(email, password).await?,
    };
    Ok(response)
}

/// One-line summary: HTTP status, responseCode and message
#[must_use]
pub fn status_line(response: &ApiResponse) -> String {
    let mut line = format!("HTTP {}", response.status);
    if let Some(code) = response.response_code() {
        line.push_str(&format!(", responseCode {code}"));
    }
    if let Some(message) = response.message() {
        line.push_str(&format!(": {message}"));
    }
    line
}

/// Render a response body
pub fn render_response(response: &ApiResponse, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Text => match response.json() {
            Some(value) => format.render(value),
            None => Ok(response.body.clone()),
        },
        OutputFormat::Json => {
            let body = response
                .json()
                .cloned()
                .unwrap_or_else(|| Value::String(response.body.clone()));
            format.render(&json!({
                "status": response.status,
                "decoded": response.decoded.source_label(),
                "body": body,
            }))
        }
    }
}

//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Storeprobe: decode store responses, build form bodies, query the store API
#[derive(Parser, Debug)]
#[command(name = "storeprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Output format
    #[arg(long, default_value = "text", global = true)]
    pub format: FormatArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a response body, recovering JSON wrapped in HTML
    Decode(DecodeArgs),

    /// Build an application/x-www-form-urlencoded body
    ///
    /// `KEY=VALUE` adds a field, `KEY=` adds an empty field and a bare `KEY`
    /// is treated as absent and left out.
    Encode(EncodeArgs),

    /// Call the store API and print the decoded response
    Api(ApiArgs),
}

/// Arguments for the decode command
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// File holding the body (stdin when omitted or `-`)
    pub file: Option<PathBuf>,
}

/// Arguments for the encode command
#[derive(Parser, Debug)]
pub struct EncodeArgs {
    /// Fields in order, as KEY=VALUE
    #[arg(required = true, value_name = "KEY=VALUE")]
    pub fields: Vec<String>,
}

/// Arguments for the api command
#[derive(Parser, Debug)]
pub struct ApiArgs {
    /// Store base URL
    #[arg(long, env = "STOREPROBE_BASE_URL", default_value = "https://automationexercise.com")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[arg(long, env = "STOREPROBE_TIMEOUT_MS", default_value = "30000")]
    pub timeout: u64,

    /// Endpoint to call
    #[command(subcommand)]
    pub endpoint: ApiCommand,
}

/// Store API endpoints
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ApiCommand {
    /// List all products
    Products,

    /// List all brands
    Brands,

    /// Search products (omit TERM to send an empty search)
    Search {
        /// Search term
        term: Option<String>,
    },

    /// Show account details for an email
    User {
        /// Account email
        email: String,
    },

    /// Verify login credentials
    Login {
        /// Account email
        email: String,
        /// Account password
        password: String,
    },
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum FormatArg {
    /// Pretty-printed, human-readable
    #[default]
    Text,
    /// Single-line JSON for scripts
    Json,
}

impl From<FormatArg> for crate::output::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_decode_with_file() {
            let cli = Cli::parse_from(["storeprobe", "decode", "body.html"]);
            if let Commands::Decode(args) = cli.command {
                assert_eq!(args.file, Some(PathBuf::from("body.html")));
            } else {
                panic!("expected Decode command");
            }
        }

        #[test]
        fn test_parse_decode_stdin() {
            let cli = Cli::parse_from(["storeprobe", "decode"]);
            if let Commands::Decode(args) = cli.command {
                assert!(args.file.is_none());
            } else {
                panic!("expected Decode command");
            }
        }

        #[test]
        fn test_parse_encode_fields() {
            let cli = Cli::parse_from(["storeprobe", "encode", "a=1", "b=", "c"]);
            if let Commands::Encode(args) = cli.command {
                assert_eq!(args.fields, ["a=1", "b=", "c"]);
            } else {
                panic!("expected Encode command");
            }
        }

        #[test]
        fn test_encode_requires_fields() {
            assert!(Cli::try_parse_from(["storeprobe", "encode"]).is_err());
        }

        #[test]
        fn test_global_flags() {
            let cli = Cli::parse_from([
                "storeprobe", "-vv", "--color", "never", "--format", "json", "decode",
            ]);
            assert_eq!(cli.verbose, 2);
            assert!(matches!(cli.color, ColorArg::Never));
            assert!(matches!(cli.format, FormatArg::Json));
        }

        #[test]
        fn test_flags_after_subcommand() {
            let cli = Cli::parse_from(["storeprobe", "decode", "-q"]);
            assert!(cli.quiet);
        }
    }

    mod api_tests {
        use super::*;

        fn api(args: &[&str]) -> ApiArgs {
            let mut argv = vec!["storeprobe", "api"];
            argv.extend_from_slice(args);
            match Cli::parse_from(argv).command {
                Commands::Api(args) => args,
                other => panic!("expected Api command, got {other:?}"),
            }
        }

        #[test]
        fn test_parse_products() {
            let args = api(&["--base-url", "http://localhost:8080", "products"]);
            assert_eq!(args.base_url, "http://localhost:8080");
            assert_eq!(args.endpoint, ApiCommand::Products);
        }

        #[test]
        fn test_parse_search_optional_term() {
            assert_eq!(
                api(&["search", "top"]).endpoint,
                ApiCommand::Search {
                    term: Some("top".to_string())
                }
            );
            assert_eq!(api(&["search"]).endpoint, ApiCommand::Search { term: None });
        }

        #[test]
        fn test_parse_login() {
            assert_eq!(
                api(&["--timeout", "500", "login", "a@b.c", "pw"]).endpoint,
                ApiCommand::Login {
                    email: "a@b.c".to_string(),
                    password: "pw".to_string()
                }
            );
        }

        #[test]
        fn test_timeout_flag() {
            assert_eq!(api(&["--timeout", "500", "brands"]).timeout, 500);
        }
    }
}

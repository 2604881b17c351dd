//! Command-line argument parsing.

/// Options for an interactive session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    /// Overrides `SYNAPSE_API_URL`
    pub api_url: Option<String>,
    /// Open this conversation instead of the remembered one
    pub chat: Option<String>,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the chat client (default)
    Run(RunOptions),
    /// Bad arguments; the message says why
    Invalid(String),
}

/// Parse command-line arguments (including the program name).
///
/// # Examples
///
/// ```
/// use synapse_chat::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["synapse".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut options = RunOptions::default();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        match flag.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--api-url" | "--chat" => {
                let Some(value) = inline.or_else(|| args.next()) else {
                    return CliCommand::Invalid(format!("{} requires a value", flag));
                };
                if value.trim().is_empty() {
                    return CliCommand::Invalid(format!("{} requires a value", flag));
                }
                if flag == "--api-url" {
                    options.api_url = Some(value);
                } else {
                    options.chat = Some(value);
                }
            }
            other => return CliCommand::Invalid(format!("unknown argument: {}", other)),
        }
    }
    CliCommand::Run(options)
}

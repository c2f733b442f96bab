// crates/vrp-consent-cli/src/main.rs
// ============================================================================
// Module: VRP Consent CLI Entry Point
// Description: Command dispatcher for payload validation and consent initiation.
// Purpose: Provide a safe CLI over the VRP consent validator.
// Dependencies: clap, serde, serde_json, thiserror, vrp-consent-config, vrp-consent-core.
// ============================================================================

//! ## Overview
//! The `vrp-consent` CLI validates VRP consent-initiation payloads, runs the
//! consent initiation flow against an in-memory store, and validates
//! configuration files. Inputs are untrusted and read with hard byte limits.
//!
//! Exit codes: `0` when the payload is valid or the command succeeded, `2`
//! when a payload is rejected by the validator, `1` on operational failure.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use serde::Serialize;
use thiserror::Error;
use vrp_consent_cli::msg;
use vrp_consent_config::CONFIG_ENV_VAR;
use vrp_consent_config::DEFAULT_CONFIG_NAME;
use vrp_consent_config::VrpConsentConfig;
use vrp_consent_core::ClientId;
use vrp_consent_core::ConsentAttributes;
use vrp_consent_core::ConsentInitiationService;
use vrp_consent_core::ConsentResource;
use vrp_consent_core::ConsentStore;
use vrp_consent_core::InMemoryConsentStore;
use vrp_consent_core::InitiationError;
use vrp_consent_core::InitiationSettings;
use vrp_consent_core::ValidationOptions;
use vrp_consent_core::ValidationOutcome;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Hard cap on payload input bytes, independent of configuration.
///
/// The configured `limits.max_payload_bytes` never exceeds this value; the
/// extra byte lets the service report its own size-limit outcome.
const MAX_PAYLOAD_INPUT_BYTES: usize = 10 * 1024 * 1024 + 1;
/// Path argument that selects stdin.
const STDIN_PATH: &str = "-";
/// Exit code for payloads rejected by the validator.
const EXIT_INVALID_PAYLOAD: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "vrp-consent", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a VRP consent-initiation payload.
    Validate(ValidateCommand),
    /// Run the consent initiation flow against an in-memory store.
    Initiate(InitiateCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a VRP consent configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for payload validation.
#[derive(Args, Debug)]
struct ValidateCommand {
    /// Payload JSON file (`-` reads stdin).
    #[arg(long, value_name = "PATH")]
    payload: PathBuf,
    /// Optional config file path (defaults to vrp-consent.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Enable every static strict rule set regardless of configuration.
    #[arg(long, action = ArgAction::SetTrue)]
    strict: bool,
    /// Optional client id recorded in audit events.
    #[arg(long = "client-id", value_name = "CLIENT_ID")]
    client_id: Option<String>,
}

/// Arguments for consent initiation.
#[derive(Args, Debug)]
struct InitiateCommand {
    /// Payload JSON file (`-` reads stdin).
    #[arg(long, value_name = "PATH")]
    payload: PathBuf,
    /// Requesting client id.
    #[arg(long = "client-id", value_name = "CLIENT_ID")]
    client_id: String,
    /// Idempotency key sent with the request.
    #[arg(long = "idempotency-key", value_name = "KEY")]
    idempotency_key: Option<String>,
    /// Optional config file path (defaults to vrp-consent.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to vrp-consent.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Output Types
// ============================================================================

/// JSON output for a created or replayed consent.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InitiateOutput {
    /// Stored consent resource.
    consent: ConsentResource,
    /// Stored consent attributes.
    attributes: ConsentAttributes,
    /// True when an idempotent retry returned an existing consent.
    replayed: bool,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for catalogue messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a rendered message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

/// Errors raised while reading bounded inputs.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// Input size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&msg!("version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Validate(command) => command_validate(&command),
        Commands::Initiate(command) => command_initiate(&command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Validate Command
// ============================================================================

/// Executes the `validate` command.
fn command_validate(command: &ValidateCommand) -> CliResult<ExitCode> {
    let config = load_config_or_default(command.config.as_deref())?;
    let settings = validate_settings(&config, command.strict);
    let service = build_service(&config, settings)?;
    let payload = read_payload(&command.payload)?;
    let client_id = command.client_id.as_deref().map(ClientId::new);
    let outcome = service.validate(client_id.as_ref(), &payload);
    write_json_line(&outcome)?;
    Ok(outcome_exit_code(&outcome))
}

/// Returns initiation settings for the `validate` command.
///
/// `--strict` enables every static rule set while keeping the configured
/// periodic limit cap.
fn validate_settings(config: &VrpConsentConfig, strict: bool) -> InitiationSettings {
    let mut settings = config.initiation_settings();
    if strict {
        settings.validation = ValidationOptions {
            max_periodic_limits: Some(config.limits.max_periodic_limits),
            ..ValidationOptions::strict()
        };
    }
    settings
}

/// Maps a validation outcome to a process exit code.
fn outcome_exit_code(outcome: &ValidationOutcome) -> ExitCode {
    if outcome.is_valid() { ExitCode::SUCCESS } else { ExitCode::from(EXIT_INVALID_PAYLOAD) }
}

// ============================================================================
// SECTION: Initiate Command
// ============================================================================

/// Executes the `initiate` command.
fn command_initiate(command: &InitiateCommand) -> CliResult<ExitCode> {
    if command.client_id.trim().is_empty() {
        return Err(CliError::new(msg!("initiate.client_id_empty")));
    }
    let config = load_config_or_default(command.config.as_deref())?;
    let service = build_service(&config, config.initiation_settings())?;
    let payload = read_payload(&command.payload)?;
    let client_id = ClientId::new(command.client_id.trim());
    match service.initiate(&client_id, command.idempotency_key.as_deref(), &payload) {
        Ok(result) => {
            let attributes = service
                .store()
                .load_attributes(&result.consent.consent_id)
                .map_err(|err| CliError::new(msg!("initiate.attributes_failed", error = err)))?;
            write_json_line(&InitiateOutput {
                consent: result.consent,
                attributes,
                replayed: result.replayed,
            })?;
            Ok(ExitCode::SUCCESS)
        }
        Err(InitiationError::InvalidPayload(outcome)) => {
            write_json_line(&outcome)?;
            Ok(outcome_exit_code(&outcome))
        }
        Err(err) => Err(CliError::new(msg!("initiate.failed", error = err))),
    }
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = VrpConsentConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(msg!("config.load_failed", error = err)))?;
    write_stdout_line(&msg!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Service Helpers
// ============================================================================

/// Loads configuration, falling back to defaults when no source exists.
///
/// An explicit path or the environment override must load successfully; a
/// missing default file selects the built-in defaults.
fn load_config_or_default(path: Option<&Path>) -> CliResult<VrpConsentConfig> {
    let has_source = path.is_some()
        || std::env::var_os(CONFIG_ENV_VAR).is_some()
        || Path::new(DEFAULT_CONFIG_NAME).exists();
    if !has_source {
        return Ok(VrpConsentConfig::default());
    }
    VrpConsentConfig::load(path)
        .map_err(|err| CliError::new(msg!("config.load_failed", error = err)))
}

/// Builds an initiation service over a fresh in-memory store.
fn build_service(
    config: &VrpConsentConfig,
    settings: InitiationSettings,
) -> CliResult<ConsentInitiationService<InMemoryConsentStore>> {
    let audit = config
        .build_audit_sink()
        .map_err(|err| CliError::new(msg!("audit.init_failed", error = err)))?;
    Ok(ConsentInitiationService::new(InMemoryConsentStore::new(), audit, settings))
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Reads a payload from a file or stdin with the hard input cap.
fn read_payload(path: &Path) -> CliResult<Vec<u8>> {
    let result = if path == Path::new(STDIN_PATH) {
        read_reader_with_limit(std::io::stdin().lock(), MAX_PAYLOAD_INPUT_BYTES)
    } else {
        read_bytes_with_limit(path, MAX_PAYLOAD_INPUT_BYTES)
    };
    let display =
        if path == Path::new(STDIN_PATH) { "stdin".to_string() } else { path.display().to_string() };
    result.map_err(|err| match err {
        ReadLimitError::Io(err) => {
            CliError::new(msg!("payload.read_failed", path = display, error = err))
        }
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(msg!(
            "payload.read_too_large",
            path = display,
            size = size,
            limit = limit
        )),
    })
}

/// Reads a file into memory, refusing inputs larger than `max_bytes`.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }
    read_reader_with_limit(file, max_bytes)
}

/// Reads a stream into memory, refusing inputs larger than `max_bytes`.
fn read_reader_with_limit<R: Read>(reader: R, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let read_limit = u64::try_from(max_bytes).unwrap_or(u64::MAX).saturating_add(1);
    let mut limited = reader.take(read_limit);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a value as one JSON line to stdout.
fn write_json_line<T: Serialize>(value: &T) -> CliResult<()> {
    let rendered = serde_json::to_string(value)
        .map_err(|err| CliError::new(msg!("output.json_failed", error = err)))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output write failure.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    msg!("output.write_failed", stream = stream, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}

//! Human-readable error descriptions and structured JSON error formatting.

use stepper_core::error::{BuildError, StepperError};

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(BuildError::InvalidConfig(msg)) = err.downcast_ref::<BuildError>() {
        return format!(
            "What happened: Invalid stepper configuration ({msg}).\nLikely causes: Out-of-range values in the [stepper] section of the TOML.\nHow to fix: Edit the config file, then rerun."
        );
    }

    if let Some(se) = err.downcast_ref::<StepperError>() {
        return match se {
            StepperError::Script(msg) => format!(
                "What happened: The interaction script is invalid ({msg}).\nLikely causes: A malformed line, timestamps going backwards, or a press without a release.\nHow to fix: Use one `<at_ms> press up|down`, `<at_ms> release` or `<at_ms> set <n>` per line, and release every press."
            ),
            StepperError::Io(msg) => format!(
                "What happened: {msg}.\nLikely causes: Wrong path or missing permissions.\nHow to fix: Check the path and rerun."
            ),
        };
    }

    // String-based heuristics for errors coming from config loading
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("read config") {
        return format!(
            "What happened: Could not read the config file.\nLikely causes: Wrong --config path.\nHow to fix: Pass an existing TOML file or omit --config. Original: {msg}"
        );
    }

    if lower.contains("parse config") {
        return format!(
            "What happened: The config file is not valid TOML for this tool.\nLikely causes: A typo, an unknown preset/easing name, or a value of the wrong type.\nHow to fix: Compare against the documented [stepper] and [logging] keys. Original: {msg}"
        );
    }

    if lower.starts_with("stepper.") || lower.starts_with("logging.") {
        return format!(
            "What happened: Invalid configuration ({msg}).\nLikely causes: Out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun."
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes: 3 for configuration problems, 4 for script problems, 1 otherwise.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if err.downcast_ref::<BuildError>().is_some() {
        return 3;
    }
    match err.downcast_ref::<StepperError>() {
        Some(StepperError::Script(_)) => 4,
        Some(StepperError::Io(_)) => 1,
        None => {
            let lower = err.to_string().to_ascii_lowercase();
            if lower.contains("parse config")
                || lower.starts_with("stepper.")
                || lower.starts_with("logging.")
            {
                3
            } else {
                1
            }
        }
    }
}

/// Stable reason name for JSON output.
fn reason_name(err: &eyre::Report) -> &'static str {
    match exit_code_for_error(err) {
        3 => "Config",
        4 => "Script",
        _ => "Error",
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;
    json!({
        "reason": reason_name(err),
        "message": humanize(err),
        "error": err.to_string(),
    })
    .to_string()
}

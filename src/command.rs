//! Launch command synthesis
//!
//! Maps an [`AgentSpec`] to the exact shell line handed to the multiplexer.
//! Pure and deterministic: no filesystem, no environment, no `PATH` lookup.

use crate::error::{HiveError, Result};
use crate::types::agent::{AgentProgram, AgentSpec};

/// Base token for the aider family (`aider`, `ollama`)
const AIDER: &str = "aider";

/// Base token for the Claude CLI
const CLAUDE: &str = "claude";

/// Model used for `ollama` when the spec leaves it out
pub const DEFAULT_OLLAMA_MODEL: &str = "ollama/codellama:13b";

/// Synthesize the launch command for `spec`
///
/// # Errors
/// `MissingCustomCommand` when `custom` has no (or a blank) command
pub fn synthesize(spec: &AgentSpec) -> Result<String> {
    match spec.program {
        AgentProgram::Custom => spec
            .custom_command
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(str::to_string)
            .ok_or(HiveError::MissingCustomCommand),
        AgentProgram::Aider => Ok(aider_line(spec.model.as_deref(), spec.auto_accept)),
        AgentProgram::Claude => {
            let mut parts = vec![CLAUDE.to_string()];
            if spec.auto_accept {
                parts.push("--dangerously-skip-permissions".to_string());
            }
            Ok(parts.join(" "))
        }
        AgentProgram::Ollama => {
            let model = spec.model.as_deref().unwrap_or(DEFAULT_OLLAMA_MODEL);
            Ok(aider_line(Some(model), spec.auto_accept))
        }
    }
}

/// Synthesize from a program name given as text
///
/// # Errors
/// `UnknownProgram` for names outside the supported set, otherwise as [`synthesize`]
pub fn synthesize_named(program: &str, spec: &AgentSpec) -> Result<String> {
    let program: AgentProgram = program.parse()?;
    synthesize(&AgentSpec {
        program,
        ..spec.clone()
    })
}

fn aider_line(model: Option<&str>, auto_accept: bool) -> String {
    let mut parts = vec![AIDER.to_string()];
    if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
        parts.push("--model".to_string());
        parts.push(shell_words::quote(model).into_owned());
    }
    if auto_accept {
        parts.push("--yes".to_string());
    }
    parts.join(" ")
}

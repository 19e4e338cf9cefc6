//! Speaker diarization through the configured external command.
//!
//! The diarizer is an opaque collaborator: it receives the input WAV path
//! and the output RTTM path as its final two arguments and must write the
//! RTTM file itself. The HuggingFace credential is passed to the child
//! process environment, resolved as flag > config > environment.

use crate::config::Config;
use crate::defaults;
use crate::error::{IntervoxError, Result};
use crate::exec::{CommandExecutor, SystemCommandExecutor};
use std::path::Path;

/// Resolve the diarization credential.
///
/// Precedence: explicit flag value, then `diarization.token` from the
/// config, then the `HF_TOKEN` environment variable. Empty values are
/// treated as absent at every level.
pub fn resolve_token(flag: Option<&str>, config: &Config) -> Result<String> {
    if let Some(token) = flag
        && !token.is_empty()
    {
        return Ok(token.to_string());
    }

    if let Some(token) = config.diarization.token.as_deref()
        && !token.is_empty()
    {
        return Ok(token.to_string());
    }

    if let Ok(token) = std::env::var(defaults::CREDENTIAL_VAR)
        && !token.is_empty()
    {
        return Ok(token);
    }

    Err(IntervoxError::CredentialMissing {
        variable: defaults::CREDENTIAL_VAR.to_string(),
    })
}

/// Runs the external diarization command.
pub struct SpeakerDiarizer<E: CommandExecutor> {
    executor: E,
    program: String,
    args: Vec<String>,
}

impl<E: CommandExecutor> SpeakerDiarizer<E> {
    pub fn new(executor: E, program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            executor,
            program: program.into(),
            args,
        }
    }

    /// Diarize `input` into an RTTM file at `output`.
    ///
    /// The command is `<program> [args...] <input> <output>` with the
    /// credential exported as `HF_TOKEN` in the child environment. A clean
    /// exit without the output file present is still a failure.
    pub fn diarize(&self, input: &Path, output: &Path, token: &str) -> Result<()> {
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let input_str = input.display().to_string();
        let output_str = output.display().to_string();
        let mut args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        args.push(&input_str);
        args.push(&output_str);

        let stdout = self
            .executor
            .execute_with_env(&self.program, &args, &[(defaults::CREDENTIAL_VAR, token)])
            .map_err(|e| match &e {
                IntervoxError::ToolNotFound { tool } => IntervoxError::StageInvocation {
                    stage: "diarize".to_string(),
                    message: format!("{} not found; install it or set diarization.program", tool),
                },
                _ => e,
            })?;

        if !stdout.trim().is_empty() {
            print!("{}", stdout);
        }

        if !output.exists() {
            return Err(IntervoxError::StageInvocation {
                stage: "diarize".to_string(),
                message: format!(
                    "diarizer completed but wrote no RTTM at {}",
                    output.display()
                ),
            });
        }

        Ok(())
    }
}

impl SpeakerDiarizer<SystemCommandExecutor> {
    /// Create a diarizer from the configured program and arguments.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            SystemCommandExecutor::new(),
            config.diarization.program.clone(),
            config.diarization.args.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::MockCommandExecutor;
    use std::fs;
    use std::sync::Mutex;

    // Mutex to serialize tests that modify HF_TOKEN
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    // SAFETY: Only used in tests with ENV_LOCK held, ensuring no concurrent
    // access to environment variables.
    fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) }
    }

    fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) }
    }

    #[test]
    fn test_resolve_token_flag_wins() {
        let _lock = ENV_LOCK.lock().unwrap();
        set_env("HF_TOKEN", "hf_env");

        let mut config = Config::default();
        config.diarization.token = Some("hf_config".to_string());

        let token = resolve_token(Some("hf_flag"), &config).unwrap();
        assert_eq!(token, "hf_flag");

        remove_env("HF_TOKEN");
    }

    #[test]
    fn test_resolve_token_config_beats_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        set_env("HF_TOKEN", "hf_env");

        let mut config = Config::default();
        config.diarization.token = Some("hf_config".to_string());

        let token = resolve_token(None, &config).unwrap();
        assert_eq!(token, "hf_config");

        remove_env("HF_TOKEN");
    }

    #[test]
    fn test_resolve_token_env_fallback() {
        let _lock = ENV_LOCK.lock().unwrap();
        set_env("HF_TOKEN", "hf_env");

        let token = resolve_token(None, &Config::default()).unwrap();
        assert_eq!(token, "hf_env");

        remove_env("HF_TOKEN");
    }

    #[test]
    fn test_resolve_token_missing_everywhere() {
        let _lock = ENV_LOCK.lock().unwrap();
        remove_env("HF_TOKEN");

        let result = resolve_token(None, &Config::default());
        match result {
            Err(IntervoxError::CredentialMissing { variable }) => {
                assert_eq!(variable, "HF_TOKEN");
            }
            other => panic!("Expected CredentialMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_flag_and_config_are_treated_as_absent() {
        let _lock = ENV_LOCK.lock().unwrap();
        set_env("HF_TOKEN", "hf_env");

        let mut config = Config::default();
        config.diarization.token = Some(String::new());

        let token = resolve_token(Some(""), &config).unwrap();
        assert_eq!(token, "hf_env");

        remove_env("HF_TOKEN");
    }

    #[test]
    fn test_diarize_appends_paths_and_exports_credential() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("audio.wav");
        let output = dir.path().join("interim").join("audio.rttm");

        let diarizer = SpeakerDiarizer::new(
            MockCommandExecutor::new(),
            "pyannote-audio",
            vec!["--model".to_string(), "sd3".to_string()],
        );

        // The mock does not write files, so stand in for the diarizer here
        fs::create_dir_all(output.parent().unwrap()).unwrap();
        fs::write(&output, "SPEAKER audio 1 0.0 1.0 <NA> <NA> SPEAKER_00 <NA> <NA>\n").unwrap();

        diarizer.diarize(&input, &output, "hf_secret").unwrap();

        let call = diarizer.executor.call(0).unwrap();
        assert_eq!(call.program, "pyannote-audio");
        assert_eq!(
            call.args,
            vec![
                "--model".to_string(),
                "sd3".to_string(),
                input.display().to_string(),
                output.display().to_string(),
            ]
        );
        assert_eq!(
            call.env,
            vec![("HF_TOKEN".to_string(), "hf_secret".to_string())]
        );
    }

    #[test]
    fn test_diarize_fails_when_rttm_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("audio.wav");
        let output = dir.path().join("audio.rttm");

        let diarizer =
            SpeakerDiarizer::new(MockCommandExecutor::new(), "pyannote-audio", Vec::new());

        let result = diarizer.diarize(&input, &output, "hf_secret");
        match result {
            Err(IntervoxError::StageInvocation { stage, message }) => {
                assert_eq!(stage, "diarize");
                assert!(message.contains("wrote no RTTM"));
            }
            other => panic!("Expected StageInvocation, got {:?}", other),
        }
    }

    #[test]
    fn test_diarize_missing_program_is_actionable() {
        let dir = tempfile::tempdir().unwrap();
        let mock = MockCommandExecutor::new().with_error(IntervoxError::ToolNotFound {
            tool: "pyannote-audio".to_string(),
        });
        let diarizer = SpeakerDiarizer::new(mock, "pyannote-audio", Vec::new());

        let result = diarizer.diarize(
            &dir.path().join("audio.wav"),
            &dir.path().join("audio.rttm"),
            "hf_secret",
        );
        match result {
            Err(IntervoxError::StageInvocation { message, .. }) => {
                assert!(message.contains("diarization.program"));
            }
            other => panic!("Expected StageInvocation, got {:?}", other),
        }
    }

    #[test]
    fn test_diarize_command_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let mock = MockCommandExecutor::new().with_error(IntervoxError::CommandFailed {
            program: "pyannote-audio".to_string(),
            message: "exit status: 1: CUDA unavailable".to_string(),
        });
        let diarizer = SpeakerDiarizer::new(mock, "pyannote-audio", Vec::new());

        let result = diarizer.diarize(
            &dir.path().join("audio.wav"),
            &dir.path().join("audio.rttm"),
            "hf_secret",
        );
        assert!(matches!(result, Err(IntervoxError::CommandFailed { .. })));
    }

    #[test]
    fn test_from_config_uses_configured_program() {
        let mut config = Config::default();
        config.diarization.program = "my-diarizer".to_string();
        config.diarization.args = vec!["--fast".to_string()];

        let diarizer = SpeakerDiarizer::from_config(&config);
        assert_eq!(diarizer.program, "my-diarizer");
        assert_eq!(diarizer.args, vec!["--fast".to_string()]);
    }
}

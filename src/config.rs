use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults;
use crate::error::{IntervoxError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub diarization: DiarizationConfig,
    pub transcription: TranscriptionConfig,
    pub analysis: AnalysisConfig,
}

/// Working directory layout configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    pub work_dir: PathBuf,
}

/// Speaker diarization collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DiarizationConfig {
    pub program: String,
    pub args: Vec<String>,
    pub token: Option<String>,
}

/// Per-clip transcription collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranscriptionConfig {
    pub program: String,
    pub args: Vec<String>,
    pub min_clip_secs: f64,
}

/// Conversation analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    pub lexicon_dir: Option<PathBuf>,
    pub interview_id: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("data"),
        }
    }
}

impl Default for DiarizationConfig {
    fn default() -> Self {
        Self {
            program: defaults::DIARIZER_PROGRAM.to_string(),
            args: Vec::new(),
            token: None,
        }
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            program: defaults::TRANSCRIBER_PROGRAM.to_string(),
            args: Vec::new(),
            min_clip_secs: defaults::MIN_CLIP_SECS,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            lexicon_dir: None,
            interview_id: defaults::INTERVIEW_ID.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IntervoxError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                IntervoxError::Io(e)
            }
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Panics on invalid TOML so a broken config never silently reverts.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(IntervoxError::ConfigFileNotFound { .. }) => Self::default(),
            Err(e) => {
                panic!("Failed to load config from {}: {}", path.display(), e);
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - INTERVOX_WORKDIR → paths.work_dir
    /// - INTERVOX_DIARIZER → diarization.program
    /// - INTERVOX_TRANSCRIBER → transcription.program
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var("INTERVOX_WORKDIR")
            && !dir.is_empty()
        {
            self.paths.work_dir = PathBuf::from(dir);
        }

        if let Ok(program) = std::env::var("INTERVOX_DIARIZER")
            && !program.is_empty()
        {
            self.diarization.program = program;
        }

        if let Ok(program) = std::env::var("INTERVOX_TRANSCRIBER")
            && !program.is_empty()
        {
            self.transcription.program = program;
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/intervox/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("intervox")
            .join("config.toml")
    }

    /// Directory holding the per-language sentiment lexicons.
    ///
    /// Uses analysis.lexicon_dir when set, otherwise
    /// ~/.local/share/intervox/lexicons.
    pub fn lexicon_dir(&self) -> PathBuf {
        self.analysis.lexicon_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("intervox")
                .join("lexicons")
        })
    }

    /// Save configuration to a TOML file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self).map_err(|e| IntervoxError::ConfigParse {
            message: e.to_string(),
        })?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Read a configuration value by dotted key path, e.g. "diarization.program".
    pub fn get_value_by_path(&self, key: &str) -> Result<String> {
        let value = match key {
            "paths.work_dir" => self.paths.work_dir.display().to_string(),
            "diarization.program" => self.diarization.program.clone(),
            "diarization.args" => self.diarization.args.join(" "),
            "diarization.token" => self.diarization.token.clone().unwrap_or_default(),
            "transcription.program" => self.transcription.program.clone(),
            "transcription.args" => self.transcription.args.join(" "),
            "transcription.min_clip_secs" => self.transcription.min_clip_secs.to_string(),
            "analysis.lexicon_dir" => self.lexicon_dir().display().to_string(),
            "analysis.interview_id" => self.analysis.interview_id.clone(),
            _ => {
                return Err(IntervoxError::ConfigInvalidValue {
                    key: key.to_string(),
                    message: "unknown key".to_string(),
                });
            }
        };
        Ok(value)
    }

    /// Set a configuration value by dotted key path and persist the file.
    pub fn set_value_by_path(path: &Path, key: &str, value: &str) -> Result<()> {
        let mut config = Self::load_or_default(path);
        match key {
            "paths.work_dir" => config.paths.work_dir = PathBuf::from(value),
            "diarization.program" => config.diarization.program = value.to_string(),
            "diarization.args" => {
                config.diarization.args = value.split_whitespace().map(String::from).collect();
            }
            "diarization.token" => {
                config.diarization.token = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "transcription.program" => config.transcription.program = value.to_string(),
            "transcription.args" => {
                config.transcription.args = value.split_whitespace().map(String::from).collect();
            }
            "transcription.min_clip_secs" => {
                let secs: f64 = value
                    .parse()
                    .map_err(|_| IntervoxError::ConfigInvalidValue {
                        key: key.to_string(),
                        message: format!("'{value}' is not a number"),
                    })?;
                if secs < 0.0 {
                    return Err(IntervoxError::ConfigInvalidValue {
                        key: key.to_string(),
                        message: "must be non-negative".to_string(),
                    });
                }
                config.transcription.min_clip_secs = secs;
            }
            "analysis.lexicon_dir" => config.analysis.lexicon_dir = Some(PathBuf::from(value)),
            "analysis.interview_id" => config.analysis.interview_id = value.to_string(),
            _ => {
                return Err(IntervoxError::ConfigInvalidValue {
                    key: key.to_string(),
                    message: "unknown key".to_string(),
                });
            }
        }
        config.save(path)
    }

    /// Render the effective configuration as TOML for `config list`.
    pub fn to_display_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| IntervoxError::ConfigParse {
            message: e.to_string(),
        })
    }

    /// Render one section of the configuration for `config list <section>`.
    pub fn display_section(&self, section: &str) -> Result<String> {
        let rendered = match section {
            "paths" => toml::to_string_pretty(&self.paths),
            "diarization" => toml::to_string_pretty(&self.diarization),
            "transcription" => toml::to_string_pretty(&self.transcription),
            "analysis" => toml::to_string_pretty(&self.analysis),
            _ => {
                return Err(IntervoxError::ConfigInvalidValue {
                    key: section.to_string(),
                    message: "unknown section".to_string(),
                });
            }
        };
        rendered.map_err(|e| IntervoxError::ConfigParse {
            message: e.to_string(),
        })
    }

    /// Fully commented configuration template for `config dump`.
    pub fn dump_template() -> String {
        format!(
            r#"# intervox configuration
# Location: ~/.config/intervox/config.toml

[paths]
# Working directory for a run. Input audio goes in <work_dir>/raw,
# intermediate and final artifacts are written under it.
work_dir = "data"

[diarization]
# External diarization command. Invoked as:
#   <program> [args...] <input.wav> <output.rttm>
program = "{diarizer}"
args = []
# Hugging Face access token for the gated diarization model.
# Can also be supplied via the {cred} environment variable or --token.
# token = "hf_..."

[transcription]
# External per-clip transcription command. Invoked once per clip as:
#   <program> [args...] <clip.wav>
# The transcript is read from stdout.
program = "{transcriber}"
args = []
# Clips shorter than this many seconds are skipped (kept as empty text).
min_clip_secs = {min_secs}

[analysis]
# Directory holding en.tsv / es.tsv sentiment lexicons
# (token<TAB>polarity per line). Defaults to ~/.local/share/intervox/lexicons.
# lexicon_dir = "/path/to/lexicons"
# Identifier stamped into the analysis document.
interview_id = "{interview_id}"
"#,
            diarizer = defaults::DIARIZER_PROGRAM,
            cred = defaults::CREDENTIAL_VAR,
            transcriber = defaults::TRANSCRIBER_PROGRAM,
            min_secs = defaults::MIN_CLIP_SECS,
            interview_id = defaults::INTERVIEW_ID,
        )
    }
}

//! The canonical six-stage interview pipeline.
//!
//! Every stage re-invokes the current executable with one subcommand and
//! explicit path arguments, so each stage is also runnable by hand for
//! debugging. The output file of each stage is the input of the next.

use std::path::Path;

use crate::error::Result;
use crate::paths::ProjectPaths;
use crate::pipeline::stage::StageSpec;

/// Build the six canonical stages in their fixed order.
///
/// `config_path` is forwarded to every child so a custom `--config` applies
/// to the whole run; `token` is forwarded to the diarize stage only.
pub fn canonical_stages(
    paths: &ProjectPaths,
    config_path: Option<&Path>,
    token: Option<&str>,
) -> Result<Vec<StageSpec>> {
    let exe = std::env::current_exe()?;
    let exe = exe.display().to_string();

    let global: Vec<String> = match config_path {
        Some(path) => vec!["--config".to_string(), path.display().to_string()],
        None => Vec::new(),
    };

    let arg = |path: &Path| path.display().to_string();

    let mut diarize_args = with_global(
        &global,
        &[
            "diarize",
            "--input",
            &arg(&paths.raw_wav),
            "--output",
            &arg(&paths.rttm),
        ],
    );
    if let Some(token) = token {
        diarize_args.push("--token".to_string());
        diarize_args.push(token.to_string());
    }

    Ok(vec![
        StageSpec::new(
            "diarize",
            &exe,
            diarize_args,
            "Detect speaker turns in the recording (external diarization model)",
        ),
        StageSpec::new(
            "segments",
            &exe,
            with_global(
                &global,
                &[
                    "segments",
                    "--input",
                    &arg(&paths.rttm),
                    "--output",
                    &arg(&paths.segments),
                ],
            ),
            "Convert the RTTM speaker turns into ordered JSON segments",
        ),
        StageSpec::new(
            "split",
            &exe,
            with_global(
                &global,
                &[
                    "split",
                    "--audio",
                    &arg(&paths.raw_wav),
                    "--segments",
                    &arg(&paths.segments),
                    "--out-dir",
                    &arg(&paths.clips_dir),
                ],
            ),
            "Cut the recording into one WAV clip per segment",
        ),
        StageSpec::new(
            "transcribe",
            &exe,
            with_global(
                &global,
                &[
                    "transcribe",
                    "--clips",
                    &arg(&paths.clips_dir),
                    "--output",
                    &arg(&paths.transcripts),
                ],
            ),
            "Transcribe each clip (external speech-to-text model)",
        ),
        StageSpec::new(
            "align",
            &exe,
            with_global(
                &global,
                &[
                    "align",
                    "--segments",
                    &arg(&paths.segments),
                    "--transcripts",
                    &arg(&paths.transcripts),
                    "--output",
                    &arg(&paths.aligned),
                ],
            ),
            "Join segments with their transcripts into speaker turns",
        ),
        StageSpec::new(
            "analyze",
            &exe,
            with_global(
                &global,
                &[
                    "analyze",
                    "--input",
                    &arg(&paths.aligned),
                    "--output",
                    &arg(&paths.analysis),
                ],
            ),
            "Classify roles, pair questions with answers, score sentiment",
        ),
    ])
}

fn with_global(global: &[String], args: &[&str]) -> Vec<String> {
    let mut out: Vec<String> = global.to_vec();
    out.extend(args.iter().map(|s| s.to_string()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_paths() -> ProjectPaths {
        ProjectPaths::new(Path::new("/work"))
    }

    #[test]
    fn test_six_stages_in_canonical_order() {
        let stages = canonical_stages(&test_paths(), None, None).unwrap();

        let names: Vec<&str> = stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["diarize", "segments", "split", "transcribe", "align", "analyze"]
        );
    }

    #[test]
    fn test_stages_invoke_current_executable() {
        let stages = canonical_stages(&test_paths(), None, None).unwrap();
        let exe = std::env::current_exe().unwrap().display().to_string();

        for stage in &stages {
            assert_eq!(stage.program, exe);
        }
    }

    #[test]
    fn test_each_output_feeds_the_next_input() {
        let paths = test_paths();
        let stages = canonical_stages(&paths, None, None).unwrap();

        let rttm = paths.rttm.display().to_string();
        let segments = paths.segments.display().to_string();
        let transcripts = paths.transcripts.display().to_string();
        let aligned = paths.aligned.display().to_string();

        assert!(stages[0].args.contains(&rttm));
        assert!(stages[1].args.contains(&rttm));
        assert!(stages[1].args.contains(&segments));
        assert!(stages[2].args.contains(&segments));
        assert!(stages[3].args.contains(&transcripts));
        assert!(stages[4].args.contains(&transcripts));
        assert!(stages[4].args.contains(&aligned));
        assert!(stages[5].args.contains(&aligned));
    }

    #[test]
    fn test_config_path_is_forwarded_to_every_stage() {
        let config = PathBuf::from("/etc/intervox.toml");
        let stages = canonical_stages(&test_paths(), Some(&config), None).unwrap();

        for stage in &stages {
            assert_eq!(stage.args[0], "--config");
            assert_eq!(stage.args[1], "/etc/intervox.toml");
        }
    }

    #[test]
    fn test_token_is_forwarded_to_diarize_only() {
        let stages = canonical_stages(&test_paths(), None, Some("hf_abc")).unwrap();

        assert!(stages[0].args.contains(&"--token".to_string()));
        assert!(stages[0].args.contains(&"hf_abc".to_string()));
        for stage in &stages[1..] {
            assert!(!stage.args.contains(&"--token".to_string()));
        }
    }
}

//! External stage execution with testable process invocation.
//!
//! The `StageRunner` trait is the only seam between the pipeline and the
//! operating system. The production runner blocks until the child process
//! exits and captures both output streams; mocks stand in for it in tests.

use owo_colors::OwoColorize;
use std::process::Command;

/// Immutable description of one pipeline stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageSpec {
    /// Display label, also used in halt reports.
    pub name: String,
    /// Executable to invoke.
    pub program: String,
    /// Arguments passed verbatim.
    pub args: Vec<String>,
    /// One-line description shown in the stage banner.
    pub description: String,
}

impl StageSpec {
    pub fn new(
        name: impl Into<String>,
        program: impl Into<String>,
        args: Vec<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args,
            description: description.into(),
        }
    }
}

/// Captured result of one stage execution.
///
/// `exit_code` is `None` when the process never started (missing executable,
/// spawn error) or was killed by a signal.
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutcome {
    pub success: bool,
    pub stage_name: String,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

/// Trait for executing pipeline stages.
///
/// Object-safe, Send + Sync. A failed or unstartable stage is reported
/// through the outcome, never as a panic or error value.
pub trait StageRunner: Send + Sync {
    fn run(&self, stage: &StageSpec) -> StageOutcome;
}

/// Production stage runner using std::process::Command.
///
/// Runs the stage synchronously to completion with no timeout and prints
/// the stage banner and captured output to the console.
#[derive(Debug, Clone, Default)]
pub struct ProcessStageRunner {
    quiet: bool,
}

impl ProcessStageRunner {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    /// Suppress the banner and captured stdout; failures still print.
    pub fn quiet(quiet: bool) -> Self {
        Self { quiet }
    }

    fn print_banner(&self, stage: &StageSpec) {
        if self.quiet {
            return;
        }
        println!();
        println!("{}", "=".repeat(80).dimmed());
        println!("{} {}", "STAGE:".bold(), stage.name.cyan().bold());
        println!("{}", stage.description);
        println!("{}", "=".repeat(80).dimmed());
    }

    fn print_outcome(&self, outcome: &StageOutcome) {
        if outcome.success {
            if !self.quiet {
                if !outcome.stdout.trim().is_empty() {
                    println!("{}", outcome.stdout.trim_end());
                }
                if !outcome.stderr.trim().is_empty() {
                    eprintln!(
                        "{} {}",
                        "warning:".yellow().bold(),
                        outcome.stderr.trim_end()
                    );
                }
                println!("{} {}", "done:".green().bold(), outcome.stage_name);
            }
        } else {
            if !outcome.stdout.trim().is_empty() {
                println!("{}", outcome.stdout.trim_end());
            }
            if !outcome.stderr.trim().is_empty() {
                eprintln!("{}", outcome.stderr.trim_end().red());
            }
            match outcome.exit_code {
                Some(code) => eprintln!(
                    "{} {} (exit code {})",
                    "failed:".red().bold(),
                    outcome.stage_name,
                    code
                ),
                None => eprintln!(
                    "{} {} (process did not start)",
                    "failed:".red().bold(),
                    outcome.stage_name
                ),
            }
        }
    }
}

impl StageRunner for ProcessStageRunner {
    fn run(&self, stage: &StageSpec) -> StageOutcome {
        self.print_banner(stage);

        let outcome = match Command::new(&stage.program).args(&stage.args).output() {
            Ok(output) => StageOutcome {
                success: output.status.success(),
                stage_name: stage.name.clone(),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                exit_code: output.status.code(),
            },
            Err(e) => StageOutcome {
                success: false,
                stage_name: stage.name.clone(),
                stdout: String::new(),
                stderr: format!("failed to start {}: {}", stage.program, e),
                exit_code: None,
            },
        };

        self.print_outcome(&outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, program: &str, args: &[&str]) -> StageSpec {
        StageSpec::new(
            name,
            program,
            args.iter().map(|s| s.to_string()).collect(),
            "test stage",
        )
    }

    #[test]
    fn test_successful_command_captures_stdout() {
        let runner = ProcessStageRunner::quiet(true);
        let outcome = runner.run(&spec("echo", "echo", &["hello"]));

        assert!(outcome.success);
        assert_eq!(outcome.stage_name, "echo");
        assert_eq!(outcome.stdout.trim(), "hello");
        assert_eq!(outcome.exit_code, Some(0));
    }

    #[test]
    fn test_failing_command_reports_exit_code() {
        let runner = ProcessStageRunner::quiet(true);
        let outcome = runner.run(&spec("false", "false", &[]));

        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, Some(1));
    }

    #[test]
    fn test_missing_executable_does_not_panic() {
        let runner = ProcessStageRunner::quiet(true);
        let outcome = runner.run(&spec(
            "ghost",
            "intervox-no-such-binary-a8f3",
            &["--flag"],
        ));

        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, None);
        assert!(outcome.stdout.is_empty());
        assert!(outcome.stderr.contains("intervox-no-such-binary-a8f3"));
    }

    #[test]
    fn test_stage_runner_is_object_safe() {
        let runner: Box<dyn StageRunner> = Box::new(ProcessStageRunner::quiet(true));
        let outcome = runner.run(&spec("true", "true", &[]));
        assert!(outcome.success);
    }

    #[test]
    fn test_stage_runner_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Box<dyn StageRunner>>();
        assert_sync::<Box<dyn StageRunner>>();
    }
}

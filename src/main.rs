use anyhow::Result;
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

use intervox::audio::ensure_wav;
use intervox::check::check_dependencies;
use intervox::cli::{Cli, ConfigAction};
use intervox::config::Config;
use intervox::exec::SystemCommandExecutor;
use intervox::paths::ProjectPaths;
use intervox::pipeline::orchestrator::{PipelineOrchestrator, print_outcome};
use intervox::pipeline::stage::ProcessStageRunner;
use intervox::pipeline::steps::canonical_stages;
use intervox::stages;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            run_full_pipeline(cli.config.as_deref(), None, cli.quiet, cli.verbose)?;
        }
        Some(intervox::cli::Commands::Run { token }) => {
            run_full_pipeline(cli.config.as_deref(), token.as_deref(), cli.quiet, cli.verbose)?;
        }
        Some(intervox::cli::Commands::Diarize {
            input,
            output,
            token,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            let paths = ProjectPaths::new(&config.paths.work_dir);
            stages::run_diarize(
                &config,
                &input.unwrap_or(paths.raw_wav),
                &output.unwrap_or(paths.rttm),
                token.as_deref(),
            )?;
        }
        Some(intervox::cli::Commands::Segments { input, output }) => {
            let config = load_config(cli.config.as_deref())?;
            let paths = ProjectPaths::new(&config.paths.work_dir);
            stages::run_segments(
                &input.unwrap_or(paths.rttm),
                &output.unwrap_or(paths.segments),
            )?;
        }
        Some(intervox::cli::Commands::Split {
            audio,
            segments,
            out_dir,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            let paths = ProjectPaths::new(&config.paths.work_dir);
            stages::run_split(
                &audio.unwrap_or(paths.raw_wav),
                &segments.unwrap_or(paths.segments),
                &out_dir.unwrap_or(paths.clips_dir),
            )?;
        }
        Some(intervox::cli::Commands::Transcribe { clips, output }) => {
            let config = load_config(cli.config.as_deref())?;
            let paths = ProjectPaths::new(&config.paths.work_dir);
            stages::run_transcribe(
                &config,
                &clips.unwrap_or(paths.clips_dir),
                &output.unwrap_or(paths.transcripts),
            )?;
        }
        Some(intervox::cli::Commands::Align {
            segments,
            transcripts,
            output,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            let paths = ProjectPaths::new(&config.paths.work_dir);
            stages::run_align(
                &segments.unwrap_or(paths.segments),
                &transcripts.unwrap_or(paths.transcripts),
                &output.unwrap_or(paths.aligned),
            )?;
        }
        Some(intervox::cli::Commands::Analyze { input, output }) => {
            let config = load_config(cli.config.as_deref())?;
            let paths = ProjectPaths::new(&config.paths.work_dir);
            stages::run_analyze(
                &config,
                &input.unwrap_or(paths.aligned),
                &output.unwrap_or(paths.analysis),
            )?;
        }
        Some(intervox::cli::Commands::Check) => {
            let config = load_config(cli.config.as_deref())?;
            check_dependencies(&config);
        }
        Some(intervox::cli::Commands::Config { action }) => {
            handle_config_command(action, cli.config.as_deref())?;
        }
        Some(intervox::cli::Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut intervox::cli::Cli::command(),
                "intervox",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Priority order:
/// 1. Custom config path from CLI (--config)
/// 2. Default config path (~/.config/intervox/config.toml)
/// 3. Built-in defaults with environment variable overrides
fn load_config(custom_path: Option<&Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        // Load from custom path
        Config::load(path)?
    } else {
        // Try default path, fall back to defaults
        let default_path = Config::default_path();
        Config::load_or_default(&default_path)
    };

    // Apply environment variable overrides
    Ok(config.with_env_overrides())
}

/// Run the six pipeline stages end to end.
///
/// Cleans previous run artifacts, converts MP3 input to WAV when needed,
/// then executes the stages strictly in order, halting at the first failure.
/// Exits with code 1 when the pipeline halts.
fn run_full_pipeline(
    config_path: Option<&Path>,
    token: Option<&str>,
    quiet: bool,
    verbose: u8,
) -> Result<()> {
    let config = load_config(config_path)?;
    let paths = ProjectPaths::new(&config.paths.work_dir);

    if !quiet {
        println!("{}", "interview analysis pipeline".bold());
        println!("work dir: {}", config.paths.work_dir.display());
    }

    paths.ensure_layout()?;
    paths.clean_previous_run()?;

    let executor = SystemCommandExecutor::new();
    ensure_wav(&executor, &paths.raw_wav, &paths.raw_mp3)?;

    let stages = canonical_stages(&paths, config_path, token)?;
    if verbose > 0 {
        println!("stage invocations:");
        for stage in &stages {
            println!("  {} {}", stage.program, stage.args.join(" "));
        }
    }

    let orchestrator = PipelineOrchestrator::new(ProcessStageRunner::quiet(quiet));
    let outcome = orchestrator.execute(&stages);
    print_outcome(&outcome, stages.len());

    if !outcome.is_success() {
        std::process::exit(1);
    }
    if !quiet {
        println!("analysis written: {}", paths.analysis.display());
    }
    Ok(())
}

/// Handle configuration commands.
fn handle_config_command(action: ConfigAction, custom_path: Option<&Path>) -> Result<()> {
    let config_path = custom_path
        .map(PathBuf::from)
        .unwrap_or_else(Config::default_path);

    match action {
        ConfigAction::Get { key } => {
            let config = Config::load_or_default(&config_path).with_env_overrides();
            match config.get_value_by_path(&key) {
                Ok(value) => println!("{}", value),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            Config::set_value_by_path(&config_path, &key, &value)?;
            println!("Set {} = {}", key, value);
        }
        ConfigAction::List { key } => {
            let config = Config::load_or_default(&config_path).with_env_overrides();
            match key.as_deref() {
                // Show a specific config section
                Some(section) => match config.display_section(section) {
                    Ok(toml) => println!("{}", toml),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                },
                // Show full config
                None => match config.to_display_toml() {
                    Ok(toml) => print!("{}", toml),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                },
            }
        }
        ConfigAction::Dump => {
            print!("{}", Config::dump_template());
        }
    }
    Ok(())
}

use clap::Parser;
use itertools::Itertools;
use java_clippy::LintEngine;
use java_clippy::cli::{Args, Command, LintArgs, OutputFormat};
use java_clippy::config::{self, ParameterLimit};
use java_clippy::fixer;
use java_clippy::instrument_block;
use java_clippy::level::LintLevel;
use java_clippy::lint::{LintRegistry, LintSettings};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    java_clippy::telemetry::init_tracing();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    match args.command {
        Some(Command::ListRules) => {
            list_rules();
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Explain { rule }) => {
            explain_rule(&rule)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Lint(lint)) => lint_command(lint),
        None => lint_command(args.lint),
    }
}

fn list_rules() {
    let registry = LintRegistry::default_rules(ParameterLimit::default());
    let rules = registry.descriptors().sorted_by_key(|d| d.name);

    for d in rules {
        let fix_status = if d.fix.available {
            format!(" [fix: {}]", d.fix.safety.as_str())
        } else {
            String::new()
        };
        println!(
            "{}\t{}\t{}\t{}{}",
            d.name,
            d.category.as_str(),
            d.scope.as_str(),
            d.description,
            fix_status
        );
    }
}

fn explain_rule(rule: &str) -> anyhow::Result<()> {
    let registry = LintRegistry::default_rules(ParameterLimit::default());
    let Some(d) = registry.find_descriptor(rule) else {
        anyhow::bail!("unknown lint: {rule}");
    };

    println!("name: {}", d.name);
    println!("category: {}", d.category.as_str());
    println!("priority: {}", d.priority);
    println!("severity: {}", d.severity.as_str());
    println!("scope: {}", d.scope.as_str());
    println!("description: {}", d.description);
    println!("explanation: {}", d.explanation);
    if d.fix.available {
        println!("fix: available ({})", d.fix.safety.as_str());
        if !d.fix.description.is_empty() {
            println!("fix description: {}", d.fix.description);
        }
    } else {
        println!("fix: not available");
    }
    Ok(())
}

fn build_engine(args: &LintArgs, limit: ParameterLimit) -> anyhow::Result<LintEngine> {
    let start_dir = infer_start_dir(args)?;
    let loaded_cfg = config::load_config(args.config.as_deref(), &start_dir)?;

    let (disabled, settings) = match loaded_cfg.as_ref() {
        Some((_path, cfg)) => (
            cfg.lints.disabled.clone(),
            LintSettings::default()
                .with_config_levels(cfg.lints.levels.clone())
                .disable(cfg.lints.disabled.clone()),
        ),
        None => (Vec::new(), LintSettings::default()),
    };

    let registry = LintRegistry::default_rules_filtered(&args.only, &args.skip, &disabled, limit)?;
    Ok(LintEngine::new_with_settings(registry, settings))
}

fn lint_command(args: LintArgs) -> anyhow::Result<ExitCode> {
    if args.fix || args.fix_dry_run {
        return fix_command(args);
    }

    // Parameter limit is read from the environment exactly once per run.
    let engine = build_engine(&args, ParameterLimit::from_env())?;

    let mut total_diags = 0usize;
    let mut has_error = false;

    instrument_block!("lint", {
        match args.format {
            OutputFormat::Json => {
                let mut out: Vec<JsonDiagnostic> = Vec::new();

                if args.paths.is_empty() {
                    let (count, file_has_error, mut diags) = lint_stdin_json(&engine)?;
                    total_diags += count;
                    has_error |= file_has_error;
                    out.append(&mut diags);
                } else {
                    let files = collect_java_files(&args.paths)?;
                    for path in files {
                        let (count, file_has_error, mut diags) = lint_file_json(&engine, &path)?;
                        total_diags += count;
                        has_error |= file_has_error;
                        out.append(&mut diags);
                    }
                }

                let out: Vec<JsonDiagnostic> = out
                    .into_iter()
                    .sorted_by(|a, b| {
                        (a.file.as_str(), a.row, a.column, a.lint.as_str())
                            .cmp(&(b.file.as_str(), b.row, b.column, b.lint.as_str()))
                    })
                    .collect();

                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            OutputFormat::Pretty | OutputFormat::Github => {
                if args.paths.is_empty() {
                    let (count, file_has_error) =
                        lint_stdin_text(&engine, args.format, args.deny_warnings)?;
                    total_diags += count;
                    has_error |= file_has_error;
                } else {
                    let files = collect_java_files(&args.paths)?;
                    for path in files {
                        let (count, file_has_error) =
                            lint_file_text(&engine, &path, args.format, args.deny_warnings)?;
                        total_diags += count;
                        has_error |= file_has_error;
                    }
                }
            }
        }

        anyhow::Ok(())
    })?;

    if has_error || (args.deny_warnings && total_diags > 0) {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

#[derive(Debug, Serialize)]
struct JsonDiagnostic {
    file: String,
    row: usize,
    column: usize,
    level: String,
    lint: String,
    message: String,
}

/// Handle --fix / --fix-dry-run: apply suggested rewrites to files.
fn fix_command(args: LintArgs) -> anyhow::Result<ExitCode> {
    if args.paths.is_empty() {
        anyhow::bail!("--fix requires file paths (stdin not supported)");
    }

    let engine = build_engine(&args, ParameterLimit::from_env())?;

    let files = collect_java_files(&args.paths)?;
    let mut total_fixed = 0usize;
    let mut total_skipped = 0usize;
    let mut files_modified = 0usize;

    for path in &files {
        let original_source = std::fs::read_to_string(path)?;

        let diagnostics = engine.lint_source(&original_source)?;
        let fixable: Vec<_> = diagnostics
            .iter()
            .filter(|d| d.suggestion.is_some())
            .cloned()
            .collect();

        if fixable.is_empty() {
            continue;
        }

        let outcome = fixer::apply_suggestions(&original_source, &fixable, args.unsafe_fixes)?;
        total_skipped += outcome.fixes_skipped;

        if outcome.fixes_applied == 0 {
            continue;
        }

        if args.fix_dry_run {
            let diff = fixer::format_diff(&original_source, &outcome.fixed_source, path);
            if !diff.is_empty() {
                println!("{}", diff);
            }
        } else {
            if !args.no_backup {
                let backup_path = path.with_extension(format!(
                    "{}.bak",
                    path.extension().unwrap_or_default().to_string_lossy()
                ));
                std::fs::write(&backup_path, &original_source)?;
            }

            std::fs::write(path, &outcome.fixed_source)?;
            files_modified += 1;
        }
        total_fixed += outcome.fixes_applied;
    }

    if args.fix_dry_run {
        println!(
            "\n{} fix(es) would be applied to {} file(s)",
            total_fixed,
            files.len()
        );
    } else {
        println!(
            "Applied {} fix(es) to {} file(s)",
            total_fixed, files_modified
        );
    }
    if total_skipped > 0 {
        println!(
            "{} fix(es) skipped (use --unsafe-fixes to apply)",
            total_skipped
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn lint_file_text(
    engine: &LintEngine,
    path: &Path,
    format: OutputFormat,
    deny_warnings: bool,
) -> anyhow::Result<(usize, bool)> {
    let source = std::fs::read_to_string(path)?;
    let diagnostics = engine.lint_source(&source)?;
    let file = path.display().to_string();
    Ok(print_text_diagnostics(
        &diagnostics,
        &file,
        format,
        deny_warnings,
    ))
}

fn lint_stdin_text(
    engine: &LintEngine,
    format: OutputFormat,
    deny_warnings: bool,
) -> anyhow::Result<(usize, bool)> {
    let mut source = String::new();
    std::io::stdin().read_to_string(&mut source)?;
    let diagnostics = engine.lint_source(&source)?;
    Ok(print_text_diagnostics(
        &diagnostics,
        "stdin",
        format,
        deny_warnings,
    ))
}

fn print_text_diagnostics(
    diagnostics: &[java_clippy::diagnostics::Diagnostic],
    default_file: &str,
    format: OutputFormat,
    deny_warnings: bool,
) -> (usize, bool) {
    let mut has_error = false;

    match format {
        OutputFormat::Pretty => {
            for diag in diagnostics {
                let file = diag.file.clone().unwrap_or_else(|| default_file.to_string());
                println!(
                    "{}:{}:{}: {}: {}: {}",
                    file,
                    diag.span.start.row,
                    diag.span.start.column,
                    diag.level.as_str(),
                    diag.lint.name,
                    diag.message
                );
                has_error |= diag.level == LintLevel::Error;
            }
            println!("{} diagnostics for {}", diagnostics.len(), default_file);
        }
        OutputFormat::Github => {
            for diag in diagnostics {
                let file = diag.file.clone().unwrap_or_else(|| default_file.to_string());
                let msg = github_escape(&diag.message);

                let kind = if diag.level == LintLevel::Error
                    || (deny_warnings && diag.level == LintLevel::Warn)
                {
                    "error"
                } else {
                    "warning"
                };

                println!(
                    "::{} file={},line={},col={},title={}::{}",
                    kind,
                    github_escape(&file),
                    diag.span.start.row,
                    diag.span.start.column,
                    diag.lint.name,
                    msg
                );
                has_error |= kind == "error";
            }
        }
        OutputFormat::Json => unreachable!("json handled elsewhere"),
    }

    (diagnostics.len(), has_error)
}

fn lint_file_json(
    engine: &LintEngine,
    path: &Path,
) -> anyhow::Result<(usize, bool, Vec<JsonDiagnostic>)> {
    let source = std::fs::read_to_string(path)?;
    let diagnostics = engine.lint_source(&source)?;
    Ok(json_diagnostics(&diagnostics, &path.display().to_string()))
}

fn lint_stdin_json(engine: &LintEngine) -> anyhow::Result<(usize, bool, Vec<JsonDiagnostic>)> {
    let mut source = String::new();
    std::io::stdin().read_to_string(&mut source)?;
    let diagnostics = engine.lint_source(&source)?;
    Ok(json_diagnostics(&diagnostics, "stdin"))
}

fn json_diagnostics(
    diagnostics: &[java_clippy::diagnostics::Diagnostic],
    default_file: &str,
) -> (usize, bool, Vec<JsonDiagnostic>) {
    let mut has_error = false;

    let out = diagnostics
        .iter()
        .map(|d| {
            let file = d.file.clone().unwrap_or_else(|| default_file.to_string());
            has_error |= d.level == LintLevel::Error;
            JsonDiagnostic {
                file,
                row: d.span.start.row,
                column: d.span.start.column,
                level: d.level.as_str().to_string(),
                lint: d.lint.name.to_string(),
                message: d.message.clone(),
            }
        })
        .collect::<Vec<_>>();

    (diagnostics.len(), has_error, out)
}

fn github_escape(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn collect_java_files(paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for path in paths {
        collect_from_path(path, &mut out)?;
    }

    out.sort();
    out.dedup();
    Ok(out)
}

fn collect_from_path(path: &Path, out: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    let meta = std::fs::metadata(path)?;
    if meta.is_dir() {
        collect_from_dir(path, out)
    } else {
        out.push(path.to_path_buf());
        Ok(())
    }
}

fn collect_from_dir(dir: &Path, out: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            if should_skip_dir(&path) {
                continue;
            }
            collect_from_dir(&path, out)?;
            continue;
        }

        if path.extension().and_then(|e| e.to_str()) == Some("java") {
            out.push(path);
        }
    }

    Ok(())
}

fn should_skip_dir(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
        return false;
    };

    matches!(name, ".git" | "target" | "build")
}

fn infer_start_dir(args: &LintArgs) -> anyhow::Result<PathBuf> {
    let base = if let Some(p) = args.paths.first() {
        p.clone()
    } else {
        std::env::current_dir()?
    };

    let base = if base.is_file() {
        base.parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    } else {
        base
    };

    Ok(base)
}

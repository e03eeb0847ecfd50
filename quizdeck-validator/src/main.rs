use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use quizdeck_core::{ValidationReport, validate_quiz_json};
use serde::Serialize;
use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};

/// Files that live in the data directory but are not quizzes.
const NON_QUIZ_FILES: [&str; 2] = ["index.json", "trophies.json"];

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// Colored per-file output with a summary block
    Console,
    /// Machine-readable report array
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "quizdeck-validator", version)]
#[command(about = "Structural validation for QuizDeck quiz JSON files")]
struct Args {
    /// Quiz files to validate; when empty, the data directory is scanned
    files: Vec<PathBuf>,

    /// Directory scanned for *.json quizzes when no files are given
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Treat warnings as failures
    #[arg(long)]
    strict: bool,

    /// Verbose output (prints warnings even for passing files)
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    #[serde(flatten)]
    report: ValidationReport,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    files: usize,
    valid: usize,
    invalid: usize,
    errors: usize,
    warnings: usize,
}

impl Summary {
    fn tally(reports: &[FileReport]) -> Self {
        let mut summary = Self {
            files: reports.len(),
            ..Self::default()
        };
        for file in reports {
            if file.report.is_valid() {
                summary.valid += 1;
            } else {
                summary.invalid += 1;
            }
            summary.errors += file.report.errors.len();
            summary.warnings += file.report.warnings.len();
        }
        summary
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let files = collect_files(&args)?;
    if files.is_empty() {
        anyhow::bail!("no quiz files found under {}", args.data_dir.display());
    }

    let reports = validate_files(&files)?;
    let summary = Summary::tally(&reports);

    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report {
        ReportFormat::Console => write_console_report(&mut output_target, &args, &reports, &summary)?,
        ReportFormat::Json => write_json_report(&mut output_target, &reports, &summary)?,
    }
    output_target.flush_inner()?;

    let failed = summary.errors > 0 || (args.strict && summary.warnings > 0);
    if failed {
        std::process::exit(1);
    }
    Ok(())
}

/// Explicit paths win; otherwise scan the data directory for quizzes.
fn collect_files(args: &Args) -> Result<Vec<PathBuf>> {
    if !args.files.is_empty() {
        return Ok(args.files.clone());
    }
    scan_data_dir(&args.data_dir)
}

fn scan_data_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read data directory {}", dir.display()))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_quiz_file(path))
        .collect();
    files.sort();
    Ok(files)
}

fn is_quiz_file(path: &Path) -> bool {
    if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
        return false;
    }
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    !NON_QUIZ_FILES.contains(&name)
}

fn validate_files(files: &[PathBuf]) -> Result<Vec<FileReport>> {
    let mut reports = Vec::with_capacity(files.len());
    for path in files {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        log::debug!("validating {}", path.display());
        reports.push(FileReport {
            path: path.display().to_string(),
            report: validate_quiz_json(&raw),
        });
    }
    Ok(reports)
}

fn write_console_report(
    out: &mut OutputTarget,
    args: &Args,
    reports: &[FileReport],
    summary: &Summary,
) -> Result<()> {
    writeln!(out, "{}", "🃏 QuizDeck Quiz Validator".bright_cyan().bold())?;
    writeln!(out, "{}", "==========================".cyan())?;

    for file in reports {
        write_file_result(out, args, file)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "Summary".bold())?;
    writeln!(
        out,
        "  {} file(s): {} valid, {} invalid",
        summary.files,
        summary.valid.to_string().green(),
        red_unless_zero(summary.invalid),
    )?;
    writeln!(
        out,
        "  {} error(s), {} warning(s)",
        red_unless_zero(summary.errors),
        yellow_unless_zero(summary.warnings),
    )?;
    if args.strict && summary.warnings > 0 {
        writeln!(out, "  {}", "strict mode: warnings count as failures".yellow())?;
    }
    Ok(())
}

fn write_file_result(out: &mut OutputTarget, args: &Args, file: &FileReport) -> Result<()> {
    let verdict = if file.report.is_valid() {
        "PASS".green().bold()
    } else {
        "FAIL".red().bold()
    };
    writeln!(
        out,
        "{verdict} {} ({} question(s))",
        file.path, file.report.question_count
    )?;

    for error in &file.report.errors {
        writeln!(out, "  {} {error}", "error:".red())?;
    }
    let show_warnings = args.verbose || args.strict || !file.report.is_valid();
    if show_warnings {
        for warning in &file.report.warnings {
            writeln!(out, "  {} {warning}", "warning:".yellow())?;
        }
    } else if !file.report.warnings.is_empty() {
        writeln!(
            out,
            "  {} warning(s) hidden; rerun with --verbose",
            file.report.warnings.len()
        )?;
    }
    Ok(())
}

fn red_unless_zero(count: usize) -> String {
    if count == 0 {
        count.to_string()
    } else {
        count.to_string().red().to_string()
    }
}

fn yellow_unless_zero(count: usize) -> String {
    if count == 0 {
        count.to_string()
    } else {
        count.to_string().yellow().to_string()
    }
}

fn write_json_report(
    out: &mut OutputTarget,
    reports: &[FileReport],
    summary: &Summary,
) -> Result<()> {
    let document = serde_json::json!({
        "summary": summary,
        "files": reports,
    });
    serde_json::to_writer_pretty(out.writer(), &document)?;
    writeln!(out)?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

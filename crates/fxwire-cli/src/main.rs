use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use fxwire_bridge::FixedClassLoader;
use fxwire_gen::{
    FsSourceSink, GenConfig, GenContext, Generator, MemoryDiagnostics, MemorySources, SourceSink,
};
use fxwire_model::{ClassSymbol, MirrorType, TypeDesc};
use fxwire_types::{Diagnostic, Severity};

#[derive(Parser)]
#[command(name = "fxwire", version, about = "fxwire view-wiring generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate wiring subclasses from a compiler symbol dump
    Generate(GenerateArgs),
    /// Validate a symbol dump without writing any sources
    Check(CheckArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Symbol dump produced by the compiler plugin (JSON)
    dump: PathBuf,
    /// Generated-sources root to write under
    #[arg(long, default_value = "generated-sources")]
    out: PathBuf,
    /// Generator config file (JSON); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CheckArgs {
    /// Symbol dump produced by the compiler plugin (JSON)
    dump: PathBuf,
    /// Generator config file (JSON); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

/// On-disk input: the classes captured mid-compilation plus the binary
/// names the surrounding classpath can actually load.
#[derive(Debug, Default, Deserialize)]
struct SymbolDump {
    #[serde(default)]
    classpath: Vec<String>,
    #[serde(default)]
    classes: Vec<ClassSymbol>,
}

#[derive(Serialize)]
struct RoundReport {
    generated: Vec<String>,
    skipped: usize,
    diagnostics: Vec<Diagnostic>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Generate(args) => {
            let generator = Generator::new(load_config(args.config.as_deref())?);
            let dump = load_dump(&args.dump)?;
            let mut sink = FsSourceSink::new(&args.out);
            let report = run_round(&generator, dump, &mut sink);
            print_report(&report, args.json)?;
            Ok(exit_code(&report, Severity::Error))
        }
        Command::Check(args) => {
            let generator = Generator::new(load_config(args.config.as_deref())?);
            let dump = load_dump(&args.dump)?;
            let mut sink = MemorySources::new();
            let report = run_round(&generator, dump, &mut sink);
            print_report(&report, args.json)?;
            Ok(exit_code(&report, Severity::Warning))
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<GenConfig> {
    match path {
        Some(path) => GenConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(GenConfig::default()),
    }
}

fn load_dump(path: &std::path::Path) -> Result<SymbolDump> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read symbol dump {}", path.display()))?;
    let dump: SymbolDump = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse symbol dump {}", path.display()))?;
    tracing::debug!(
        classes = dump.classes.len(),
        classpath = dump.classpath.len(),
        "loaded symbol dump"
    );
    Ok(dump)
}

fn run_round(generator: &Generator, dump: SymbolDump, sink: &mut dyn SourceSink) -> RoundReport {
    let loader = Arc::new(FixedClassLoader::new(dump.classpath));
    let mirrors: Vec<MirrorType> = dump
        .classes
        .into_iter()
        .map(|symbol| MirrorType::new(symbol, loader.clone(), false))
        .collect();
    let candidates: Vec<&dyn TypeDesc> = mirrors.iter().map(|m| m as _).collect();

    let mut diagnostics = MemoryDiagnostics::new();
    let outcome = generator.run_round(
        &candidates,
        &mut GenContext {
            diagnostics: &mut diagnostics,
            sources: sink,
        },
    );
    tracing::info!(
        generated = outcome.generated.len(),
        skipped = outcome.skipped,
        diagnostics = diagnostics.diagnostics.len(),
        "round complete"
    );
    RoundReport {
        generated: outcome.generated,
        skipped: outcome.skipped,
        diagnostics: diagnostics.diagnostics,
    }
}

fn print_report(report: &RoundReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for diagnostic in &report.diagnostics {
        let severity = match diagnostic.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        match &diagnostic.declaration {
            Some(declaration) => eprintln!(
                "{severity}[{}]: {} ({declaration})",
                diagnostic.code, diagnostic.message
            ),
            None => eprintln!("{severity}[{}]: {}", diagnostic.code, diagnostic.message),
        }
    }
    for name in &report.generated {
        println!("generated {name}");
    }
    println!(
        "{} generated, {} skipped, {} diagnostics",
        report.generated.len(),
        report.skipped,
        report.diagnostics.len()
    );
    Ok(())
}

/// Exit 1 when any diagnostic at or above `threshold` was reported.
fn exit_code(report: &RoundReport, threshold: Severity) -> i32 {
    let failing = report.diagnostics.iter().any(|d| match threshold {
        Severity::Error => d.severity == Severity::Error,
        Severity::Warning => true,
    });
    if failing {
        1
    } else {
        0
    }
}

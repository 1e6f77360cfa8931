use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use stimflow::{Compiler, ExperimentPayload, GeneratorRegistry, StimflowConfig, Target};

#[derive(Parser, Debug)]
#[command(name = "stimflow", version)]
struct Cli {
    /// Configuration file (TOML). `STIMFLOW_*` environment variables apply on top.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile an experiment document into source programs.
    Compile(CompileArgs),
    /// Validate an experiment document without compiling it.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct CompileArgs {
    /// Input experiment JSON (`react_flow` + `component_props`).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Experiment name. Defaults to the input file stem.
    #[arg(long)]
    name: Option<String>,

    /// Target to emit. Defaults to the configured targets.
    #[arg(long, value_enum)]
    target: Option<TargetChoice>,

    /// Output directory.
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Template directory with `desktop/` and/or `browser/` overrides.
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Fail when any node produced a diagnostic.
    #[arg(long)]
    strict: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input experiment JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TargetChoice {
    Desktop,
    Browser,
    All,
}

impl TargetChoice {
    fn targets(self) -> Vec<Target> {
        match self {
            TargetChoice::Desktop => vec![Target::Desktop],
            TargetChoice::Browser => vec![Target::Browser],
            TargetChoice::All => Target::ALL.to_vec(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = StimflowConfig::load_from(cli.config.as_ref())
        .with_context(|| "load configuration")?;
    stimflow::logging::init(&config.logging)?;

    match cli.cmd {
        Command::Compile(args) => cmd_compile(args, config),
        Command::Check(args) => cmd_check(args),
    }
}

fn read_payload(path: &Path) -> anyhow::Result<ExperimentPayload> {
    ExperimentPayload::from_path(path)
        .with_context(|| format!("read experiment '{}'", path.display()))
}

fn cmd_compile(args: CompileArgs, mut config: StimflowConfig) -> anyhow::Result<()> {
    let payload = read_payload(&args.in_path)?;
    let name = match args.name {
        Some(name) => name,
        None => args
            .in_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .context("input path has no file name; pass --name")?,
    };
    if let Some(dir) = args.templates {
        config.compiler.template_dir = Some(dir);
    }
    let targets = match args.target {
        Some(choice) => choice.targets(),
        None => config.compiler.targets.clone(),
    };

    let compilers = targets
        .iter()
        .map(|&t| Compiler::from_config(&config.compiler, t))
        .collect::<Result<Vec<_>, _>>()?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;
    let stem = stimflow::sanitize(&name);

    let mut findings = 0usize;
    for (compiler, report) in compilers
        .iter()
        .zip(stimflow::compile_targets(&compilers, &name, &payload))
    {
        let target = compiler.target();
        let report = report.with_context(|| format!("compile {target}"))?;
        for d in &report.diagnostics {
            eprintln!("warning[{target}]: {d}");
        }
        findings += report.diagnostics.len();

        let out_path = args.out.join(format!("{stem}.{}", target.extension()));
        std::fs::write(&out_path, report.source_text())
            .with_context(|| format!("write '{}'", out_path.display()))?;
        eprintln!(
            "wrote {} ({} field, {} nodes emitted, {} omitted, fingerprint {})",
            out_path.display(),
            target.code_field(),
            report.fragments.len(),
            report.omitted(),
            report.output.fingerprint
        );
    }

    if args.strict && findings > 0 {
        anyhow::bail!("{findings} diagnostic(s) reported");
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let payload = read_payload(&args.in_path)?;
    let generators = GeneratorRegistry::builtin();
    let graph = &payload.react_flow;

    for node in &graph.nodes {
        if generators.get(&node.node_type).is_none() {
            eprintln!(
                "note: node '{}' has unsupported type '{}' and will be skipped",
                node.id, node.node_type
            );
        }
    }
    println!(
        "ok: {} nodes, {} edges, {} property entries",
        graph.nodes.len(),
        graph.edges.len(),
        payload.component_props.len()
    );
    Ok(())
}

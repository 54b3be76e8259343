// jv_lombok_cli - command line host (library interface for testing)
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use jv_lombok::{AugmentConfig, ElementKind, Problem, ProcessorRegistry, render_elements};
use jv_lombok_ast::{SourceFileModel, SourceTree};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "jvlombok")]
#[command(about = "Synthesize lombok members for a Java declaration model")]
pub struct Cli {
    /// Processor configuration (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Log dispatch decisions
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Print generated members as Java stubs
    Augment {
        /// Declaration model (JSON)
        model: PathBuf,
        /// Only this class (qualified or simple name)
        #[arg(long)]
        class: Option<String>,
        /// Only elements of this kind
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },
    /// Report annotation problems
    Check {
        /// Declaration model (JSON)
        model: PathBuf,
        /// Emit problems as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Method,
    Constructor,
    Class,
}

impl From<KindArg> for ElementKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Method => ElementKind::Method,
            KindArg::Constructor => ElementKind::Constructor,
            KindArg::Class => ElementKind::Class,
        }
    }
}

/// Problems reported for one class and the fields it declares.
#[derive(Debug, Serialize)]
pub struct ClassReport {
    pub class: String,
    pub problems: Vec<Problem>,
}

/// Text printed by a command and whether it found errors.
#[derive(Debug)]
pub struct Outcome {
    pub output: String,
    pub has_errors: bool,
}

pub fn load_model(path: &Path) -> Result<SourceTree> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read model '{}'", path.display()))?;
    let model: SourceFileModel = serde_json::from_str(&source)
        .with_context(|| format!("failed to parse model '{}'", path.display()))?;
    SourceTree::from_file(&model).with_context(|| format!("invalid model '{}'", path.display()))
}

pub fn load_config(path: Option<&Path>) -> Result<AugmentConfig> {
    let Some(path) = path else {
        return Ok(AugmentConfig::default());
    };
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read config '{}'", path.display()))?;
    AugmentConfig::from_toml_str(&source)
        .with_context(|| format!("invalid config '{}'", path.display()))
}

/// Generated stubs for every class (or the selected one), each under a `// Class` header.
pub fn augment(
    tree: &SourceTree,
    registry: &ProcessorRegistry,
    class: Option<&str>,
    kind: Option<ElementKind>,
) -> Result<String> {
    let classes = match class {
        Some(name) => vec![
            tree.find_class(name)
                .with_context(|| format!("class '{}' not found in model", name))?,
        ],
        None => tree.classes().collect(),
    };

    let mut sections = Vec::new();
    for decl in classes {
        let elements = match kind {
            Some(kind) => registry.augment(tree, decl.id, kind),
            None => registry.process(tree, decl.id),
        };
        if elements.is_empty() {
            continue;
        }
        sections.push(format!("// {}\n{}", decl.qualified_name, render_elements(&elements)));
    }
    Ok(sections.join("\n"))
}

pub fn check(tree: &SourceTree, registry: &ProcessorRegistry) -> Vec<ClassReport> {
    tree.classes()
        .map(|decl| ClassReport {
            class: decl.qualified_name.clone(),
            problems: registry.verify_class(tree, decl.id),
        })
        .filter(|report| !report.problems.is_empty())
        .collect()
}

pub fn render_report(reports: &[ClassReport]) -> String {
    let mut out = String::new();
    for report in reports {
        for problem in &report.problems {
            out.push_str(&format!("{}: {}: {}\n", report.class, problem.severity, problem.message));
            for fix in &problem.fixes {
                out.push_str(&format!("  fix: {}\n", fix.title()));
            }
        }
    }
    out
}

pub fn run(cli: &Cli) -> Result<Outcome> {
    let config = load_config(cli.config.as_deref())?;
    let registry = ProcessorRegistry::with_config(config);

    match &cli.command {
        Commands::Augment { model, class, kind } => {
            let tree = load_model(model)?;
            let output = augment(&tree, &registry, class.as_deref(), kind.map(ElementKind::from))?;
            Ok(Outcome {
                output,
                has_errors: false,
            })
        }
        Commands::Check { model, json } => {
            let tree = load_model(model)?;
            let reports = check(&tree, &registry);
            let has_errors = reports
                .iter()
                .any(|report| report.problems.iter().any(Problem::is_error));
            let output = if *json {
                serde_json::to_string_pretty(&reports).context("failed to serialize problems")?
            } else {
                render_report(&reports)
            };
            Ok(Outcome { output, has_errors })
        }
    }
}

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::{generate, Shell};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

use inheritance_compatibility::parsers::vcf::{DEFAULT_GENE_KEY, DEFAULT_X_CONTIGS};
use inheritance_compatibility::{
    GeneFilter, ModeOfInheritance, PedParser, Pedigree, ReportFormat, ReportWriter,
    VcfGenotypeReader,
};

/// Multithreaded mode-of-inheritance compatibility filter
#[derive(Parser, Debug)]
#[command(
    name = "inheritance-compatibility",
    version,
    about = "Filter candidate genes by Mendelian mode of inheritance",
    long_about = r#"
Tests, for every gene of a multi-sample VCF, whether the genotype calls of a
family are consistent with the selected mode of inheritance:
- autosomal dominant
- autosomal recessive (homozygous or compound heterozygous)
- X-linked dominant
- X-linked recessive

The family is read from a PED file; genes are taken from an INFO key.
"#
)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Pedigree file (PED)
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    ped: Option<PathBuf>,

    /// Multi-sample VCF file, plain or gzip compressed
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    vcf: Option<PathBuf>,

    /// Mode of inheritance to test
    #[arg(short, long, value_enum, default_value = "autosomal-dominant")]
    mode: ModeOfInheritance,

    /// Pedigree to use when the PED file describes several families
    #[arg(long, value_name = "NAME")]
    pedigree: Option<String>,

    /// INFO key holding the gene name
    #[arg(long, default_value = DEFAULT_GENE_KEY)]
    gene_key: String,

    /// Contig names of the X chromosome
    #[arg(long, value_name = "CONTIG", num_args = 1.., default_values_t = DEFAULT_X_CONTIGS.map(String::from))]
    x_contig: Vec<String>,

    /// Number of threads (0 = auto-detect)
    #[arg(
        short,
        long,
        default_value = "0",
        help = "Number of threads (0 = auto)"
    )]
    threads: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "tsv")]
    format: ReportFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Only report compatible genes
    #[arg(long)]
    only_compatible: bool,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions
    Completions { shell: Shell },
    /// List supported modes of inheritance
    Modes,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
            return Ok(());
        }
        Some(Commands::Modes) => {
            list_modes();
            return Ok(());
        }
        None => {}
    }

    // Initialize logging
    init_logging(cli.verbose);

    let config = AppConfig::from_cli(&cli)?;

    // Initialize thread pool
    init_thread_pool(config.threads)?;

    info!("Starting inheritance compatibility filtering...");
    info!("Using {} threads", rayon::current_num_threads());

    run_filter(config)
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn list_modes() {
    println!("{}", style("Supported Modes of Inheritance:").bold().cyan());
    println!();

    for mode in ModeOfInheritance::all() {
        println!("  {}", style(mode).green().bold());
        println!("         {}", style(mode.description()).dim());
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(format!("inheritance_compatibility={}", level))
        .init();
}

fn init_thread_pool(threads: usize) -> Result<()> {
    let num_threads = if threads == 0 {
        num_cpus::get()
    } else {
        threads
    };

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .map_err(|e| anyhow::anyhow!("Failed to initialize thread pool: {}", e))?;

    Ok(())
}

fn run_filter(config: AppConfig) -> Result<()> {
    // Step 1: Build the pedigree
    let contents = PedParser::new()
        .parse(&config.ped)
        .with_context(|| format!("Failed to read PED file: {}", config.ped.display()))?;
    let pedigree = Pedigree::from_ped(&contents, config.pedigree.as_deref())
        .with_context(|| format!("Invalid pedigree in {}", config.ped.display()))?;
    info!(
        "Pedigree {} with {} members, {} affected",
        pedigree.name(),
        pedigree.len(),
        pedigree.affected().len()
    );

    // Step 2: Extract per-gene genotype calls
    let reader = VcfGenotypeReader::new(config.gene_key.clone(), config.x_contigs.clone());
    let genes = reader
        .read(&config.vcf, &pedigree)
        .with_context(|| format!("Failed to read VCF file: {}", config.vcf.display()))?;
    info!("Found {} genes to check", genes.len());

    // Step 3: Check every gene
    let pb = ProgressBar::new(genes.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message(format!("Checking {}...", config.mode));
    let report = GeneFilter::new(&pedigree, config.mode).filter_with_progress(&genes, || pb.inc(1));
    pb.finish_and_clear();

    // Step 4: Write verdicts
    let writer = ReportWriter::new(config.format, config.only_compatible);
    match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            writer.write(&report, BufWriter::new(file))?;
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            writer.write(&report, &mut lock)?;
            lock.flush()?;
        }
    }

    eprintln!(
        "{} {}/{} genes compatible with {}{}",
        style("✓").green().bold(),
        report.compatible_count(),
        genes.len(),
        style(config.mode).cyan(),
        if report.skipped.is_empty() {
            String::new()
        } else {
            format!(", {} skipped", style(report.skipped.len()).red())
        }
    );

    Ok(())
}

#[derive(Debug)]
struct AppConfig {
    ped: PathBuf,
    vcf: PathBuf,
    mode: ModeOfInheritance,
    pedigree: Option<String>,
    gene_key: String,
    x_contigs: Vec<String>,
    threads: usize,
    format: ReportFormat,
    output: Option<PathBuf>,
    only_compatible: bool,
}

impl AppConfig {
    fn from_cli(cli: &Cli) -> Result<Self> {
        Ok(Self {
            ped: cli.ped.clone().context("--ped is required")?,
            vcf: cli.vcf.clone().context("--vcf is required")?,
            mode: cli.mode,
            pedigree: cli.pedigree.clone(),
            gene_key: cli.gene_key.clone(),
            x_contigs: cli.x_contig.clone(),
            threads: cli.threads,
            format: cli.format,
            output: cli.output.clone(),
            only_compatible: cli.only_compatible,
        })
    }
}

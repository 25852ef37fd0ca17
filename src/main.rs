use std::{ fs, path::{ Path, PathBuf } };
use anyhow::{ Context, Result };
use clap::{ Parser, Subcommand, ValueEnum };
use tracing::info;
use tracing_subscriber::{ fmt, prelude::*, EnvFilter };
use orbitals::{
    generate, radial_profile,
    sampling::{ CubeGrid, SphericalGrid, Strategy },
    writer::{ self, OutputFormat },
    Hybrid, HybridKind, Orbital, PipelineConfig, ProfileConfig, QuantumNumbers,
};

#[derive(Parser)]
#[command(name = "orbitals")]
#[command(version, about = "Generate point clouds of hydrogen atomic orbitals")]
struct Cli {
    /// JSON pipeline configuration; flags below override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Sampling strategy
    #[arg(long, global = true, value_enum)]
    strategy: Option<StrategyArg>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "obj")]
    format: FormatArg,

    /// Normalized probability below which points are dropped
    #[arg(long, global = true)]
    threshold: Option<f64>,

    /// Directory receiving the output files
    #[arg(long, global = true, default_value = ".")]
    out_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a single (n, l, m)-orbital
    Orbital {
        #[arg(long)]
        n: u32,
        #[arg(long)]
        l: u32,
        #[arg(long, allow_negative_numbers = true, default_value = "0")]
        m: i32,
    },

    /// Generate every supported orbital and every hybrid orbital
    All,

    /// Generate sp, sp^2 or sp^3 hybrid orbitals
    Hybrid {
        /// sp, sp2 or sp3
        #[arg(long, default_value = "sp")]
        kind: HybridKind,

        /// Only this member of the family
        #[arg(long)]
        index: Option<usize>,
    },

    /// Write the normalized radial probability of an orbital as JSON
    Radial {
        #[arg(long)]
        n: u32,
        #[arg(long)]
        l: u32,
        #[arg(long, allow_negative_numbers = true, default_value = "0")]
        m: i32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Spherical,
    Cartesian,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Obj,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Obj => OutputFormat::Obj,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    let config = pipeline_config(&cli)?;
    let format = OutputFormat::from(cli.format);
    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;

    match cli.command {
        Commands::Orbital { n, l, m } => {
            let qn = QuantumNumbers::new(n, l, m)?;
            gen_orbital(qn, &config, format, &cli.out_dir)
        }
        Commands::All => {
            for qn in QuantumNumbers::supported() {
                gen_orbital(qn, &config, format, &cli.out_dir)?;
            }
            for kind in [HybridKind::Sp, HybridKind::Sp2, HybridKind::Sp3] {
                for hybrid in kind.orbitals() {
                    gen_hybrid(&hybrid, &config, format, &cli.out_dir)?;
                }
            }
            Ok(())
        }
        Commands::Hybrid { kind, index } => {
            let hybrids = match index {
                Some(index) => vec![kind.orbital(index)?],
                None => kind.orbitals(),
            };
            for hybrid in hybrids.iter() {
                gen_hybrid(hybrid, &config, format, &cli.out_dir)?;
            }
            Ok(())
        }
        Commands::Radial { n, l, m } => {
            let qn = QuantumNumbers::new(n, l, m)?;
            let orbital = Orbital::resolve(qn)?;
            let profile = radial_profile(&orbital, &ProfileConfig::default())?;
            let path = cli.out_dir
                .join(format!("radial_probability_n_{}_l_{}_m_{}.json", n, l, m));
            info!("creating {:?}", path);
            let file = fs::File::create(&path)
                .with_context(|| format!("creating {}", path.display()))?;
            writer::write_profile(file, &profile)?;
            Ok(())
        }
    }
}

// config file (or defaults), then command-line overrides
fn pipeline_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    match (cli.strategy, config.strategy) {
        (Some(StrategyArg::Spherical), Strategy::Cartesian(_)) => {
            config.strategy = Strategy::Spherical(SphericalGrid::default());
        }
        (Some(StrategyArg::Cartesian), Strategy::Spherical(_)) => {
            config.strategy = Strategy::Cartesian(CubeGrid::default());
        }
        _ => {}
    }
    if let Some(threshold) = cli.threshold {
        config.threshold = threshold;
    }
    config.validate()?;
    Ok(config)
}

fn gen_orbital(
    qn: QuantumNumbers,
    config: &PipelineConfig,
    format: OutputFormat,
    out_dir: &Path,
) -> Result<()> {
    let orbital = Orbital::resolve(qn)?;
    let points = generate(&orbital, config)?;
    let path = out_dir.join(writer::orbital_file_name(qn, format));
    info!(orbital = %qn, points = points.len(), "creating {:?}", path);
    writer::write_points_file(&path, &points, format)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn gen_hybrid(
    hybrid: &Hybrid,
    config: &PipelineConfig,
    format: OutputFormat,
    out_dir: &Path,
) -> Result<()> {
    let points = generate(hybrid, config)?;
    let path = out_dir.join(writer::hybrid_file_name(hybrid, format));
    info!(hybrid = %hybrid.kind, index = hybrid.index, points = points.len(), "creating {:?}", path);
    writer::write_points_file(&path, &points, format)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

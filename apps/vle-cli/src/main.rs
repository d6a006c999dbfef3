mod error;
mod report;

use clap::{Args, Parser, Subcommand, ValueEnum};
use error::{CliError, CliResult};
use report::{FlashOutput, PropertyReport, SweepOutput};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vle_compounds::{
    BuiltinProvider, CompoundDataProvider, DirectoryProvider, PackageDefinition, RealConstant,
    StringConstant, TemperatureDependentProperty,
};
use vle_thermo::{
    AllowedPhases, FlashSpec, FlashType, Phase, PhaseConditions, PropertyPackage, Quantity,
    SinglePhaseProperty, SweepDefinition, SweepSpacing, execute_tp_sweep, parse_quantity,
};

#[derive(Parser)]
#[command(name = "vle")]
#[command(about = "Ideal vapor/liquid equilibrium properties and flashes", long_about = None)]
struct Cli {
    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available compounds
    Compounds {
        /// Directory of compound data files (builtin catalog when omitted)
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Show the constants of every compound in a package
    Constants {
        #[command(flatten)]
        package: PackageArgs,
    },
    /// Evaluate the temperature-dependent correlations of one compound
    Tdep {
        #[command(flatten)]
        package: PackageArgs,
        /// Compound name
        #[arg(long)]
        compound: String,
        /// Temperature, e.g. "350 K" or "80C"
        #[arg(short, long)]
        temperature: String,
    },
    /// Single-phase mixture properties
    Props {
        #[command(flatten)]
        package: PackageArgs,
        #[command(flatten)]
        feed: FeedArgs,
        /// vapor or liquid
        #[arg(long)]
        phase: Phase,
        #[arg(short, long)]
        temperature: String,
        #[arg(short, long)]
        pressure: String,
        /// Property names (e.g. EnthalpyDT) or numeric ids
        #[arg(long = "property", required = true)]
        properties: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Phase equilibrium at two specified conditions
    Flash {
        #[command(flatten)]
        package: PackageArgs,
        #[command(flatten)]
        feed: FeedArgs,
        /// TP, TVF, PVF, TVFm, PVFm, PH or PS
        #[arg(long = "type")]
        flash_type: FlashType,
        /// First specification (T for T* flashes, otherwise P)
        #[arg(long)]
        spec1: String,
        /// Second specification
        #[arg(long)]
        spec2: String,
        /// Allowed phases: vl, v or l
        #[arg(long, default_value = "vl")]
        phases: AllowedPhases,
        #[arg(long)]
        json: bool,
    },
    /// TP flashes across a temperature or pressure range
    Sweep {
        #[command(flatten)]
        package: PackageArgs,
        #[command(flatten)]
        feed: FeedArgs,
        #[arg(long, value_enum)]
        vary: SweptVariable,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long, default_value_t = 11)]
        points: usize,
        /// Logarithmic point spacing
        #[arg(long)]
        log: bool,
        /// Value of the variable held fixed
        #[arg(long)]
        fixed: String,
        #[arg(long, default_value = "vl")]
        phases: AllowedPhases,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct PackageArgs {
    /// Property package definition file (YAML or one compound per line)
    #[arg(long, conflicts_with = "compounds")]
    package: Option<PathBuf>,
    /// Comma separated compound names
    #[arg(long, value_delimiter = ',')]
    compounds: Vec<String>,
    /// Directory of compound data files (builtin catalog when omitted)
    #[arg(long)]
    data: Option<PathBuf>,
}

#[derive(Args)]
struct FeedArgs {
    /// Comma separated mole amounts in package order
    #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
    composition: Vec<f64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SweptVariable {
    Temperature,
    Pressure,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Compounds { data } => cmd_compounds(data),
        Commands::Constants { package } => cmd_constants(&package),
        Commands::Tdep {
            package,
            compound,
            temperature,
        } => cmd_tdep(&package, &compound, &temperature),
        Commands::Props {
            package,
            feed,
            phase,
            temperature,
            pressure,
            properties,
            json,
        } => cmd_props(
            &package,
            &feed,
            phase,
            &temperature,
            &pressure,
            &properties,
            json,
        ),
        Commands::Flash {
            package,
            feed,
            flash_type,
            spec1,
            spec2,
            phases,
            json,
        } => cmd_flash(&package, &feed, flash_type, &spec1, &spec2, phases, json),
        Commands::Sweep {
            package,
            feed,
            vary,
            from,
            to,
            points,
            log,
            fixed,
            phases,
            json,
        } => {
            let spacing = if log {
                SweepSpacing::Logarithmic
            } else {
                SweepSpacing::Linear
            };
            let (swept, held) = match vary {
                SweptVariable::Temperature => (Quantity::Temperature, Quantity::Pressure),
                SweptVariable::Pressure => (Quantity::Pressure, Quantity::Temperature),
            };
            let sweep = SweepDefinition::from_text(from, to, swept, points, spacing)?;
            let fixed = parse(&fixed, held, "fixed value")?;
            cmd_sweep(&package, &feed, &sweep, fixed, phases, json)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn provider(data: Option<PathBuf>) -> Box<dyn CompoundDataProvider> {
    match data {
        Some(dir) => Box::new(DirectoryProvider::new(dir)),
        None => Box::new(BuiltinProvider),
    }
}

fn load_package(args: &PackageArgs) -> CliResult<PropertyPackage> {
    let definition = match (&args.package, args.compounds.is_empty()) {
        (Some(path), _) => PackageDefinition::load(path)?,
        (None, false) => PackageDefinition::new(args.compounds.clone())?,
        (None, true) => {
            return Err(CliError::Usage(
                "a package is required: pass --package FILE or --compounds a,b,...".to_string(),
            ));
        }
    };
    let provider = provider(args.data.clone());
    let package = PropertyPackage::from_definition(&definition, provider.as_ref())?;
    debug!(compounds = ?definition.compounds, "package loaded");
    Ok(package)
}

fn compound_names(package: &PropertyPackage) -> Vec<String> {
    package
        .compounds()
        .iter()
        .map(|c| c.name().to_string())
        .collect()
}

fn all_indices(package: &PropertyPackage) -> CliResult<Vec<usize>> {
    Ok((0..package.compound_count()?).collect())
}

fn parse(text: &str, quantity: Quantity, what: &'static str) -> CliResult<f64> {
    parse_quantity(text, quantity).map_err(|source| CliError::Unit { what, source })
}

fn parse_property(text: &str) -> CliResult<SinglePhaseProperty> {
    let property = match text.trim().parse::<usize>() {
        Ok(id) => SinglePhaseProperty::try_from(id)?,
        Err(_) => text.parse::<SinglePhaseProperty>()?,
    };
    Ok(property)
}

fn print_json(value: &impl Serialize) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_compounds(data: Option<PathBuf>) -> CliResult<()> {
    let names = provider(data).compound_names()?;
    if names.is_empty() {
        println!("No compounds found");
    } else {
        for name in names {
            println!("{}", name);
        }
    }
    Ok(())
}

fn cmd_constants(args: &PackageArgs) -> CliResult<()> {
    let package = load_package(args)?;
    if let Some(name) = package.name() {
        println!("{}", name);
    }
    for (i, compound) in package.compounds().iter().enumerate() {
        println!("{}:", compound.name());
        for id in StringConstant::ALL.into_iter().skip(1) {
            println!("  {:<22} {}", id.key(), package.string_constant(i, id)?);
        }
        for id in RealConstant::ALL {
            println!(
                "  {:<22} {} {}",
                id.key(),
                package.real_constant(i, id)?,
                id.unit()
            );
        }
    }
    Ok(())
}

fn cmd_tdep(args: &PackageArgs, compound: &str, temperature: &str) -> CliResult<()> {
    let package = load_package(args)?;
    let index = package
        .compound_index(compound)
        .ok_or_else(|| CliError::Usage(format!("compound \"{}\" is not in the package", compound)))?;
    let t = parse(temperature, Quantity::Temperature, "temperature")?;
    println!("{} at {} K:", package.compounds()[index].name(), t);
    for id in TemperatureDependentProperty::ALL {
        let value = package.temperature_dependent_property(index, id, t)?;
        println!("  {:<36} {:.6e} {}", id.key(), value, id.unit());
    }
    Ok(())
}

fn cmd_props(
    args: &PackageArgs,
    feed: &FeedArgs,
    phase: Phase,
    temperature: &str,
    pressure: &str,
    properties: &[String],
    json: bool,
) -> CliResult<()> {
    let package = load_package(args)?;
    let t = parse(temperature, Quantity::Temperature, "temperature")?;
    let p = parse(pressure, Quantity::Pressure, "pressure")?;
    let requested = properties
        .iter()
        .map(|text| parse_property(text))
        .collect::<CliResult<Vec<_>>>()?;

    let conditions = PhaseConditions::new(phase, t, p, &feed.composition);
    let values =
        package.single_phase_properties(&all_indices(&package)?, conditions, &requested)?;
    let reports: Vec<PropertyReport> = requested
        .iter()
        .zip(&values)
        .map(|(&property, value)| PropertyReport::new(property, value))
        .collect();

    if json {
        return print_json(&reports);
    }
    println!("{} at T = {} K, P = {} Pa", phase, t, p);
    for report in &reports {
        println!("{}", report.to_text());
    }
    Ok(())
}

fn cmd_flash(
    args: &PackageArgs,
    feed: &FeedArgs,
    flash_type: FlashType,
    spec1: &str,
    spec2: &str,
    allowed: AllowedPhases,
    json: bool,
) -> CliResult<()> {
    let package = load_package(args)?;
    let (q1, q2) = Quantity::of_flash(flash_type);
    let spec = FlashSpec::new(
        flash_type,
        parse(spec1, q1, flash_type.first_label())?,
        parse(spec2, q2, flash_type.second_label())?,
    );
    let result = package.flash(&all_indices(&package)?, &feed.composition, spec, allowed)?;
    let output = FlashOutput::new(flash_type, compound_names(&package), &result);
    if json {
        return print_json(&output);
    }
    print!("{}", output.to_text());
    Ok(())
}

fn cmd_sweep(
    args: &PackageArgs,
    feed: &FeedArgs,
    sweep: &SweepDefinition,
    fixed: f64,
    allowed: AllowedPhases,
    json: bool,
) -> CliResult<()> {
    let package = load_package(args)?;
    let result = execute_tp_sweep(
        &package,
        &all_indices(&package)?,
        &feed.composition,
        sweep,
        fixed,
        allowed,
    )?;
    let output = SweepOutput::new(compound_names(&package), &result);
    if json {
        return print_json(&output);
    }
    println!("{}", sweep);
    print!("{}", output.to_text());
    Ok(())
}

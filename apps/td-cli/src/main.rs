mod config;
mod error;

use clap::{Parser, Subcommand};
use config::CliConfig;
use error::{CliError, CliResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use td_core::units::k;
use td_inp::{
    Category, CondensedStart, Database, ParseOptions, SectionMarkers, SpeciesRecord, cache,
    write_database,
};
use td_poly::{EvalMode, PropertyTable, SweepType, TemperatureSweep, evaluate_species};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "td-cli")]
#[command(about = "thermodata CLI - NASA Glenn thermo.inp reader and property evaluator", long_about = None)]
struct Cli {
    /// Path to the thermo.inp database
    #[arg(long, global = true, env = "THERMO_INP")]
    db: Option<PathBuf>,
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List species names by category
    List {
        /// One of gas_products, condensed_products, reactants
        #[arg(long)]
        category: Option<String>,
    },
    /// Show the decoded record of a species
    Show {
        /// Species name, e.g. "Air" or "Ag(cr)"
        name: String,
        #[arg(long)]
        json: bool,
    },
    /// Find species whose name starts with a prefix
    Search { prefix: String },
    /// Evaluate Cp, H and S at one temperature
    Eval {
        name: String,
        /// Temperature in K
        temperature: f64,
        /// Evaluate outside the fitted range instead of failing
        #[arg(long)]
        extrapolate: bool,
        #[arg(long)]
        json: bool,
    },
    /// Tabulate properties over explicit temperatures or a sweep
    Table {
        name: String,
        /// Temperatures in K; when omitted, --from/--to define a sweep
        temperatures: Vec<f64>,
        #[arg(long)]
        from: Option<f64>,
        #[arg(long)]
        to: Option<f64>,
        #[arg(long, default_value_t = 10)]
        points: usize,
        /// Logarithmic sweep spacing
        #[arg(long)]
        log: bool,
        #[arg(long)]
        extrapolate: bool,
        #[arg(long)]
        json: bool,
    },
    /// Write a database holding only the named species
    Subset {
        #[arg(required = true)]
        names: Vec<String>,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => CliConfig::load_yaml(path)?,
        None => CliConfig::default(),
    };
    let db = load_database(cli.db.as_deref(), &config)?;

    let mode = |extrapolate: bool| {
        if extrapolate {
            EvalMode::Extrapolate
        } else {
            config.eval_mode
        }
    };

    match cli.command {
        Commands::List { category } => cmd_list(&db, category.as_deref()),
        Commands::Show { name, json } => cmd_show(&db, &name, json),
        Commands::Search { prefix } => cmd_search(&db, &prefix),
        Commands::Eval {
            name,
            temperature,
            extrapolate,
            json,
        } => cmd_eval(&db, &name, temperature, mode(extrapolate), json),
        Commands::Table {
            name,
            temperatures,
            from,
            to,
            points,
            log,
            extrapolate,
            json,
        } => {
            let sweep = match (from, to) {
                (Some(from), Some(to)) => {
                    let kind = if log {
                        SweepType::Logarithmic
                    } else {
                        SweepType::Linear
                    };
                    Some(TemperatureSweep::new(from, to, points, kind)?)
                }
                (None, None) => None,
                _ => {
                    return Err(CliError::InvalidInput(
                        "--from and --to must be given together".to_string(),
                    ));
                }
            };
            cmd_table(&db, &name, &temperatures, sweep.as_ref(), mode(extrapolate), json)
        }
        Commands::Subset { names, output } => cmd_subset(&db, &names, output.as_deref()),
    }
}

fn load_database(db: Option<&Path>, config: &CliConfig) -> CliResult<Arc<Database>> {
    let path = db
        .map(Path::to_path_buf)
        .or_else(|| config.database.clone())
        .ok_or(CliError::NoDatabase)?;
    let text = std::fs::read_to_string(&path).map_err(|source| CliError::DatabaseRead {
        path: path.clone(),
        source,
    })?;
    let options = options_for(&text, &config.parse);
    let database = cache::global().initialize_with(&text, &options)?;
    info!(path = %path.display(), species = database.len(), "database ready");
    Ok(database)
}

/// Files written by `subset` may lack the configured condensed marker
/// species; those are read with positional section boundaries.
fn options_for(text: &str, configured: &ParseOptions) -> ParseOptions {
    let CondensedStart::Species(marker) = &configured.markers.condensed_start else {
        return configured.clone();
    };
    let has_marker = text
        .lines()
        .any(|line| line.get(..15).unwrap_or(line).trim_end() == marker.as_str());
    if has_marker {
        return configured.clone();
    }
    warn!(marker = %marker, "condensed marker species absent, using phase flags");
    ParseOptions {
        markers: SectionMarkers {
            condensed_start: CondensedStart::FirstCondensedPhase,
            ..configured.markers.clone()
        },
    }
}

fn categories(key: Option<&str>) -> CliResult<Vec<Category>> {
    match key {
        None => Ok(Category::ALL.to_vec()),
        Some(key) => Category::from_key(key).map(|c| vec![c]).ok_or_else(|| {
            CliError::InvalidInput(format!(
                "unknown category '{key}' (expected gas_products, condensed_products or reactants)"
            ))
        }),
    }
}

fn cmd_list(db: &Database, category: Option<&str>) -> CliResult<()> {
    for category in categories(category)? {
        let names = db.names(category);
        println!("{category} ({})", names.len());
        for name in names {
            println!("  {name}");
        }
    }
    Ok(())
}

fn cmd_search(db: &Database, prefix: &str) -> CliResult<()> {
    let mut found = 0;
    for (category, sp) in db.search(prefix) {
        println!("{:<16} {category}", sp.name());
        found += 1;
    }
    if found == 0 {
        println!("no species start with '{prefix}'");
    }
    Ok(())
}

fn cmd_show(db: &Database, name: &str, json: bool) -> CliResult<()> {
    let sp = db.lookup(name)?;
    if json {
        println!("{}", serde_json::to_string_pretty(sp)?);
        return Ok(());
    }

    let category = db
        .category_of(name)
        .map(|c| c.to_string())
        .unwrap_or_default();
    println!("{} ({category})", sp.name());
    if !sp.comment().is_empty() {
        println!("  {}", sp.comment());
    }
    for line in sp.reference().describe().lines() {
        println!("  {line}");
    }
    println!("  Formula         : {}", sp.formula_string());
    println!("  Phase           : {:?}", sp.phase());
    println!("  Molar mass      : {} g/mol", sp.molar_mass());
    print_enthalpy(sp);
    if sp.intervals().is_empty() {
        println!("  No polynomial intervals");
    }
    for iv in sp.intervals() {
        let b = iv.bounds();
        let exponents = if iv.has_canonical_exponents() {
            String::new()
        } else {
            format!("  exponents {:?}", iv.exponents())
        };
        println!("  Interval {:>10.3} - {:>10.3} K{exponents}", b.min, b.max);
    }
    Ok(())
}

fn print_enthalpy(sp: &SpeciesRecord) {
    match (sp.assigned_enthalpy(), sp.reference_temperature()) {
        (Some(h), Some(t)) => println!("  Assigned H      : {h:.3} J/mol at {t} K"),
        _ => println!("  Hf(298.15)      : {:.3} J/mol", sp.heat_of_formation()),
    }
}

fn cmd_eval(db: &Database, name: &str, t_k: f64, mode: EvalMode, json: bool) -> CliResult<()> {
    let sp = db.lookup(name)?;
    let props = evaluate_species(sp, k(t_k), mode)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&props)?);
        return Ok(());
    }

    let note = if props.extrapolated() {
        " (extrapolated)"
    } else {
        ""
    };
    println!("{} at {} K{note}", props.name, t_k);
    println!(
        "  Cp     {:>12.4} J/mol-K {:>14.4} J/kg-K",
        props.cp(),
        props.cp_mass()
    );
    println!(
        "  H      {:>12.4} J/mol   {:>14.4} J/kg",
        props.h(),
        props.h_mass()
    );
    println!("  H-H298 {:>12.4} J/mol", props.h_minus_h298());
    println!(
        "  S      {:>12.4} J/mol-K {:>14.4} J/kg-K",
        props.s(),
        props.s_mass()
    );
    println!("  G      {:>12.4} J/mol", props.g());
    Ok(())
}

fn cmd_table(
    db: &Database,
    name: &str,
    temperatures: &[f64],
    sweep: Option<&TemperatureSweep>,
    mode: EvalMode,
    json: bool,
) -> CliResult<()> {
    let sp = db.lookup(name)?;
    let table = match (temperatures.is_empty(), sweep) {
        (false, None) => PropertyTable::new(sp, temperatures, mode)?,
        (true, Some(sweep)) => PropertyTable::from_sweep(sp, sweep, mode)?,
        (false, Some(_)) => {
            return Err(CliError::InvalidInput(
                "give either temperatures or --from/--to, not both".to_string(),
            ));
        }
        (true, None) => {
            return Err(CliError::InvalidInput(
                "no temperatures given".to_string(),
            ));
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        println!("{table}");
        println!("{}", table.formatted());
    }
    Ok(())
}

fn cmd_subset(db: &Database, names: &[String], output: Option<&Path>) -> CliResult<()> {
    let subset = db.select(names)?;
    let text = write_database(&subset);
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            info!(path = %path.display(), species = subset.len(), "subset written");
        }
        None => print!("{text}"),
    }
    Ok(())
}

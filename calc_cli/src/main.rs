//! # Quickcalc CLI
//!
//! Every calculator from the site, from the terminal. Arguments are taken
//! as raw text and go through the same form validation as the web pages.
//!
//! ```text
//! calc_cli convert mass 5 kg lb
//! calc_cli fuel 400 15 100
//! calc_cli love Alex Taylor --json
//! calc_cli solve "2x + 3 = 11"
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use calc_core::algebra::{AlgebraInput, AlgebraSolver, OpenAiCompatBackend};
use calc_core::calculations::{
    AgeInput, BmiInput, ConversionInput, FuelCostInput, IncomeTaxInput, LoveScoreInput, LuckyNumberInput,
    ModuloInput, PercentageInput,
};
use calc_core::pixel_em::{PxEmEdit, PxEmState};
use calc_core::{evaluate, sitemap, CalcError, CalcResult, CalculatorRequest, Quantity, SiteConfig};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Quickcalc - everyday calculators")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true, env = "QUICKCALC_CONFIG")]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert between units of mass, speed or length
    Convert {
        quantity: String,
        value: String,
        from: String,
        to: String,
    },
    /// List the units of a quantity
    Units { quantity: String },
    /// Pixel <-> em
    PxEm {
        /// Pixel value to convert to ems
        #[arg(long, conflicts_with = "ems")]
        pixels: Option<String>,
        /// Em value to convert to pixels
        #[arg(long)]
        ems: Option<String>,
        /// Root font size in pixels (defaults to the configured base size)
        #[arg(long)]
        base: Option<String>,
    },
    /// Fuel needed and cost for a trip
    Fuel {
        distance: String,
        efficiency: String,
        price: String,
    },
    /// Remainder of dividend / divisor
    Modulo { dividend: String, divisor: String },
    /// Lucky number for a date (YYYY-MM-DD)
    Lucky { date: String },
    /// Love compatibility score (for fun)
    Love { name1: String, name2: String },
    /// Percentages: percent_of, what_percent, change
    Percent { mode: String, x: String, y: String },
    /// Body mass index
    Bmi { weight_kg: String, height_cm: String },
    /// Exact age between two dates
    Age {
        birth_date: String,
        /// Defaults to today
        #[arg(long, default_value = "")]
        as_of: String,
    },
    /// Income tax under the slab table
    Tax {
        income: String,
        /// Skip the salaried standard deduction
        #[arg(long)]
        not_salaried: bool,
    },
    /// Ask the configured language model to solve an algebra problem
    Solve {
        #[arg(required = true, num_args = 1..)]
        problem: Vec<String>,
    },
    /// List public pages
    Pages {
        /// Only pages of this kind: home, calculator, info, legal
        #[arg(long)]
        kind: Option<String>,
    },
    /// Print sitemap.xml
    Sitemap {
        /// Base URL (defaults to the configured site URL)
        #[arg(long)]
        base_url: Option<String>,
    },
}

fn tracing_init(verbose: u8) {
    let default = match verbose {
        0 => "calc_cli=warn,calc_core=warn",
        1 => "calc_cli=info,calc_core=info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: serde::Serialize>(value: &T) -> CalcResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse raw arguments into a calculator request (the form boundary).
fn calculator_request(command: &Command) -> CalcResult<Option<CalculatorRequest>> {
    let request = match command {
        Command::Convert { quantity, value, from, to } => {
            let quantity: Quantity = quantity.parse()?;
            CalculatorRequest::Conversion(ConversionInput::from_fields(quantity, value, from, to)?)
        }
        Command::Fuel { distance, efficiency, price } => {
            CalculatorRequest::FuelCost(FuelCostInput::from_fields(distance, efficiency, price)?)
        }
        Command::Modulo { dividend, divisor } => {
            CalculatorRequest::Modulo(ModuloInput::from_fields(dividend, divisor)?)
        }
        Command::Lucky { date } => CalculatorRequest::LuckyNumber(LuckyNumberInput::from_fields(date)?),
        Command::Love { name1, name2 } => CalculatorRequest::LoveScore(LoveScoreInput::new(name1, name2)),
        Command::Percent { mode, x, y } => CalculatorRequest::Percentage(PercentageInput::from_fields(mode, x, y)?),
        Command::Bmi { weight_kg, height_cm } => CalculatorRequest::Bmi(BmiInput::from_fields(weight_kg, height_cm)?),
        Command::Age { birth_date, as_of } => {
            let today = chrono::Local::now().date_naive();
            CalculatorRequest::Age(AgeInput::from_fields(birth_date, as_of, today)?)
        }
        Command::Tax { income, not_salaried } => {
            CalculatorRequest::IncomeTax(IncomeTaxInput::from_fields(income, !not_salaried)?)
        }
        _ => return Ok(None),
    };
    Ok(Some(request))
}

fn px_em(config: &SiteConfig, pixels: Option<&str>, ems: Option<&str>, base: Option<&str>) -> CalcResult<PxEmState> {
    let mut state = PxEmState {
        pixels: config.display.default_base_size,
        ems: 1.0,
        base_size: config.display.default_base_size,
    };
    let decimals = config.display.px_em_decimals;

    if let Some(raw) = base {
        calc_core::forms::parse_positive("base", raw)?;
        state = state.apply(&PxEmEdit::BaseSize(raw.to_string()), decimals);
    }
    match (pixels, ems) {
        (Some(raw), _) => {
            calc_core::forms::parse_number("pixels", raw)?;
            Ok(state.apply(&PxEmEdit::Pixels(raw.to_string()), decimals))
        }
        (None, Some(raw)) => {
            calc_core::forms::parse_number("ems", raw)?;
            Ok(state.apply(&PxEmEdit::Ems(raw.to_string()), decimals))
        }
        (None, None) => Err(CalcError::missing_field("pixels or ems")),
    }
}

/// Commands that read `SiteConfig`
fn needs_config(command: &Command) -> bool {
    matches!(command, Command::PxEm { .. } | Command::Solve { .. } | Command::Sitemap { .. })
}

async fn run(cli: Cli) -> CalcResult<()> {
    let config = if needs_config(&cli.command) {
        SiteConfig::load(cli.config.as_deref())?
    } else {
        SiteConfig::default()
    };

    if let Some(request) = calculator_request(&cli.command)? {
        debug!(calculator = request.calc_type(), "evaluating");
        let output = evaluate(&request)?;
        if cli.json {
            return print_json(&output);
        }
        println!("{}", output.summary());
        return Ok(());
    }

    match cli.command {
        Command::Units { quantity } => {
            let quantity: Quantity = quantity.parse()?;
            let table = quantity.table();
            if cli.json {
                return print_json(table);
            }
            let base_key = table.base_unit().map(|u| u.key.as_str());
            for unit in table.units() {
                let base = if Some(unit.key.as_str()) == base_key { " (base)" } else { "" };
                println!("{:<6} {:<22} x{}{}", unit.key, unit.display_name, unit.factor_to_base, base);
            }
        }
        Command::PxEm { pixels, ems, base } => {
            let state = px_em(&config, pixels.as_deref(), ems.as_deref(), base.as_deref())?;
            if cli.json {
                return print_json(&state);
            }
            println!("{}px = {}em (base {}px)", state.pixels, state.ems, state.base_size);
        }
        Command::Solve { problem } => {
            let backend = OpenAiCompatBackend::from_config(&config.model)?;
            let solver = AlgebraSolver::new(Arc::new(backend));
            let output = solver.solve(&AlgebraInput { problem: problem.join(" ") }).await?;
            if cli.json {
                return print_json(&output);
            }
            println!("{}", output.solution);
        }
        Command::Pages { kind } => {
            let pages: Vec<&sitemap::Page> = match kind {
                Some(kind) => sitemap::pages_of(kind.parse()?).collect(),
                None => sitemap::pages().iter().collect(),
            };
            if cli.json {
                return print_json(&pages);
            }
            for page in pages {
                println!("{:<28} {}", page.path, page.title);
            }
        }
        Command::Sitemap { base_url } => {
            let base = base_url.unwrap_or_else(|| config.site.base_url.clone());
            print!("{}", sitemap::sitemap_xml(&base));
        }
        _ => {}
    }
    Ok(())
}

fn exit_code_for(err: &CalcError) -> u8 {
    if err.is_validation() {
        2
    } else if matches!(err, CalcError::UpstreamFailure { .. }) {
        3
    } else {
        1
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_init(cli.verbose);
    let json = cli.json;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if json {
                if let Ok(text) = serde_json::to_string_pretty(&e) {
                    eprintln!("{}", text);
                }
            }
            ExitCode::from(exit_code_for(&e))
        }
    }
}

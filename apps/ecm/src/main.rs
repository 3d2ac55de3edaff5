use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use machine_core::text;
use rand::{rngs::StdRng, SeedableRng};
use rotors::interval::{self, IntervalReport};
use rotors::wiring::{BIG_ROTOR_WIRINGS, INDEX_ROTOR_WIRINGS};
use shared::domain::Direction;
use shared::error::ErrorReport;
use shared::protocol::RunReport;
use tracing_subscriber::EnvFilter;

mod config;
mod setup;

use config::{load_settings, Settings, DEFAULT_CONFIG_FILE};
use setup::MachineSetup;

/// ECM Mark II (SIGABA) cipher machine.
#[derive(Parser, Debug)]
#[command(name = "ecm", version)]
struct Cli {
    /// Settings file; missing files are ignored.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Log rotor positions after every cycle.
    #[arg(long, global = true)]
    trace: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Encrypt(RunArgs),
    Decrypt(RunArgs),
    /// Interval-method report for the built-in rotor wirings.
    CheckWiring,
    /// Generate a random interval-method wiring.
    GenerateWiring {
        #[arg(long, default_value_t = 26)]
        size: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the configured machine.
    Show(MachineArgs),
}

#[derive(Args, Debug, Default)]
struct MachineArgs {
    /// Cipher rotors, e.g. 0N1R2N3R4N
    #[arg(long)]
    cipher_order: Option<String>,
    /// Control rotors, e.g. 5N6R7N8R9N
    #[arg(long)]
    control_order: Option<String>,
    /// Index rotors, e.g. 0N1R2N3R4N
    #[arg(long)]
    index_order: Option<String>,
    /// CSP889 or CSP2900
    #[arg(long)]
    machine: Option<String>,
    #[arg(long)]
    cipher_pos: Option<String>,
    #[arg(long)]
    control_pos: Option<String>,
    #[arg(long)]
    index_pos: Option<String>,
    /// Key the control rotors with the navy procedure; cipher positions are
    /// then unused.
    #[arg(long)]
    navy_init: bool,
}

impl MachineArgs {
    fn apply(self, settings: &mut Settings) {
        let overrides = [
            (self.cipher_order, &mut settings.cipher_order),
            (self.control_order, &mut settings.control_order),
            (self.index_order, &mut settings.index_order),
            (self.machine, &mut settings.machine),
            (self.cipher_pos, &mut settings.cipher_pos),
            (self.control_pos, &mut settings.control_pos),
            (self.index_pos, &mut settings.index_pos),
        ];
        for (value, slot) in overrides {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if self.navy_init {
            settings.navy_init = true;
        }
    }
}

#[derive(Args, Debug)]
#[command(group(clap::ArgGroup::new("source").required(true).args(["text", "input"])))]
struct RunArgs {
    #[command(flatten)]
    machine: MachineArgs,
    /// Text to process.
    #[arg(short, long)]
    text: Option<String>,
    /// File to read the text from, `-` for stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Print a JSON run report instead of formatted text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.trace {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut settings = load_settings(&cli.config)?;

    match cli.command {
        Command::Encrypt(args) => run(args, Direction::Encrypt, settings),
        Command::Decrypt(args) => run(args, Direction::Decrypt, settings),
        Command::CheckWiring => {
            check_wiring()?;
            Ok(ExitCode::SUCCESS)
        }
        Command::GenerateWiring { size, seed } => {
            generate_wiring(size, seed)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Show(args) => {
            args.apply(&mut settings);
            let setup = MachineSetup::from_settings(&settings).context("invalid machine setup")?;
            let machine = setup.build();
            println!("{}", machine.cage());
            println!("machine {}", machine.variant());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run(args: RunArgs, direction: Direction, mut settings: Settings) -> Result<ExitCode> {
    let RunArgs {
        machine,
        text: inline,
        input,
        json,
    } = args;
    machine.apply(&mut settings);

    let setup = match MachineSetup::from_settings(&settings) {
        Ok(setup) => setup,
        Err(err) if json => {
            println!("{}", serde_json::to_string_pretty(&ErrorReport::from(err))?);
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err).context("invalid machine setup"),
    };

    let raw = match (inline, input) {
        (Some(inline), _) => inline,
        (None, Some(path)) => read_input(&path)?,
        (None, None) => String::new(),
    };

    let mut machine = setup.build();
    let start = machine.positions();
    let output = machine.process_text(&raw, direction);

    if json {
        let report = RunReport {
            machine: machine.variant(),
            direction,
            cipher_order: setup.cipher.to_string(),
            control_order: setup.control.to_string(),
            index_order: setup.index.to_string(),
            start,
            end: machine.positions(),
            input: text::filter_in(direction, &raw),
            output,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(ExitCode::SUCCESS);
    }

    let lines = match direction {
        Direction::Encrypt => text::group_lines(&output, settings.group_size, settings.line_width),
        Direction::Decrypt => text::wrap_words(&output, settings.line_width),
    };
    for line in lines {
        println!("{line}");
    }
    Ok(ExitCode::SUCCESS)
}

/// Reads the message, joining its lines with spaces.
fn read_input(path: &Path) -> Result<String> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("unable to open file '{}'", path.display()))?
    };
    Ok(raw.lines().collect::<Vec<_>>().join(" "))
}

fn check_wiring() -> Result<()> {
    for (id, row) in BIG_ROTOR_WIRINGS.iter().enumerate() {
        let report = IntervalReport::analyze_symbols(row, 'A')?;
        println!("big rotor {id}: {row}");
        println!("{report}");
    }
    for (id, row) in INDEX_ROTOR_WIRINGS.iter().enumerate() {
        let report = IntervalReport::analyze_symbols(row, '0')?;
        println!("index rotor {id}: {row}");
        println!("{report}");
    }
    Ok(())
}

fn generate_wiring(size: usize, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let wiring = interval::generate(size, &mut rng)?;
    if size <= 26 {
        println!("{}", wiring.symbols('A'));
    } else {
        let numbers: Vec<String> = wiring.permutation.iter().map(ToString::to_string).collect();
        println!("{}", numbers.join(" "));
    }
    println!("{}", IntervalReport::analyze(&wiring.permutation)?);
    println!("  {} steps", wiring.steps);
    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;

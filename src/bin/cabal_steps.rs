use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use log::{debug, error};

use cabal_steps::cabal::Cabal;
use cabal_steps::config::{Config, Overrides};
use cabal_steps::step::{BuildStep, CommandLine};
use cabal_steps::version;

// Preview tool: builds the requested step and prints the command it
// would hand to the CI executor. Never runs anything itself.
#[derive(Parser)]
#[command(name = "cabal_steps", version = &*version::full_version().leak())]
struct Cli {
    /// Explicit configuration file instead of the layered lookup
    #[arg(long)]
    config: Option<PathBuf>,

    /// Working directory substituted for the deferred placeholder
    #[arg(long, default_value = ".")]
    workdir: String,

    /// Override the sandbox path
    #[arg(long)]
    sandbox: Option<String>,

    /// Override the sandbox path to none
    #[arg(long, conflicts_with = "sandbox")]
    no_sandbox: bool,

    /// Override the GHC optimization level
    #[arg(long)]
    optimization: Option<i32>,

    /// Override the number of parallel jobs
    #[arg(long)]
    jobs: Option<usize>,

    /// Override test building (true or false)
    #[arg(long)]
    tests: Option<bool>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the `cabal update` step
    Update,
    /// Print the `cabal install <package>` step
    Install { package: String },
    /// Print the sandbox initialization step
    SandboxInit,
    /// Print the sandbox deletion step
    SandboxDelete,
    /// Show the configuration paths and the effective configuration
    Config,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Cmd::Config = cli.command {
        Config::help();
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_file(path)?,
        None => Config::load()?,
    };
    debug!("base configuration: {}", serde_yaml::to_string(&config)?);

    let overrides = overrides(&cli);
    let cabal = Cabal::new(config);
    let step = match cli.command {
        Cmd::Update => cabal.update(overrides),
        Cmd::Install { ref package } => cabal.install(package, overrides),
        Cmd::SandboxInit => cabal.sandbox_init(overrides)?,
        Cmd::SandboxDelete => cabal.sandbox_delete(overrides)?,
        Cmd::Config => unreachable!(),
    };
    print_step(&step, &cli.workdir);
    Ok(())
}

fn overrides(cli: &Cli) -> Overrides {
    let mut overrides = Overrides::new();
    if let Some(ref sandbox) = cli.sandbox {
        overrides = overrides.sandbox(sandbox.clone());
    }
    if cli.no_sandbox {
        overrides = overrides.no_sandbox();
    }
    if let Some(level) = cli.optimization {
        overrides = overrides.optimization(level);
    }
    if let Some(jobs) = cli.jobs {
        overrides = overrides.jobs(jobs);
    }
    if let Some(tests) = cli.tests {
        overrides = overrides.tests(tests);
    }
    overrides
}

fn print_step(step: &BuildStep, workdir: &str) {
    println!("name:        {}", step.name);
    println!("description: {}", step.description);
    match &step.command {
        CommandLine::Argv(args) => {
            let resolved: Vec<String> = args.iter().map(|a| a.resolve(workdir)).collect();
            println!("command:     {}", resolved.join(" "));
        }
        CommandLine::Shell(line) => {
            println!("command:     {}", line.resolve(workdir));
        }
    }
}

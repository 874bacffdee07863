use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "stax")]
#[command(about = "Deploy interdependent Docker Swarm stacks from YAML fragments", long_about = None)]
struct Cli {
    /// Path to the stack directory to deploy
    stack: String,

    /// The deployment target to use (e.g. "prod", "dev")
    target: String,

    /// Don't deploy dependencies
    #[arg(short = 'n', long)]
    no_deps: bool,

    /// Only print the commands which would be executed
    #[arg(short = 'd', long)]
    dry_run: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = commands::deploy::run(&cli.stack, &cli.target, cli.no_deps, cli.dry_run) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

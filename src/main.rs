use clap::{Parser, Subcommand};

mod cmd;

use cmd::{calculate::CalculateCommand, schedule::ScheduleCommand, schema::SchemaCommand};

#[derive(Parser, Debug)]
#[command(name = "congestion-tax", version, about = "Daily congestion tax calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate the tax for each day of recorded passages
    Calculate(CalculateCommand),
    /// Show fee schedules
    Schedule(ScheduleCommand),
    /// Print the configuration schema or passage CSV format
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Calculate(cmd) => cmd.exec(),
        Command::Schedule(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}

use clap::{Args, Parser, Subcommand, ValueEnum};
use mortgage::api::{
    ScheduleArgs, build_parameters, build_schedule_response, render_summary, render_table,
    run_http_server,
};
use mortgage::core::simulate;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "mortgage",
    about = "Fortnightly mortgage repayment planner with an annual lump sum"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the yearly repayment schedule.
    Schedule(ScheduleCommand),
    /// Serve the web calculator and JSON API.
    Serve {
        #[arg(default_value_t = 8080)]
        port: u16,
    },
}

#[derive(Args, Debug)]
struct ScheduleCommand {
    #[command(flatten)]
    params: ScheduleArgs,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Schedule(command) => print_schedule(command),
        Command::Serve { port } => run_http_server(port)
            .await
            .map_err(|e| format!("Server error: {e}")),
    };

    if let Err(msg) = result {
        eprintln!("{msg}");
        std::process::exit(1);
    }
}

fn print_schedule(command: ScheduleCommand) -> Result<(), String> {
    let parameters = build_parameters(command.params)?;
    let schedule = simulate(&parameters).map_err(|e| e.to_string())?;

    match command.format {
        OutputFormat::Table => {
            println!("{}", render_table(&schedule));
            println!("{}", render_summary(&schedule));
        }
        OutputFormat::Json => {
            let response = build_schedule_response(parameters, &schedule);
            let json = serde_json::to_string_pretty(&response)
                .map_err(|e| format!("Failed to serialize schedule: {e}"))?;
            println!("{json}");
        }
    }

    Ok(())
}

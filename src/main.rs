use clap::Parser;

use employee_tracker::cli::{Cli, Commands};
use employee_tracker::config::StaticConfig;
use employee_tracker::runtime::modes::{run_cli, run_server};
use employee_tracker::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = StaticConfig::load(&cli.config);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            // guard 必须存活到进程结束
            let _guard = init_logging(&config.logging);
            run_server(config).await
        }
        cmd => {
            if let Err(e) = run_cli(cmd, &config).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

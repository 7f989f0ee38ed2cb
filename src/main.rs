use clap::Parser;
use log::error;

mod cli;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = cli::Cli::parse();
    if let Err(err) = cli::run(cli) {
        error!("{err:#}");
        std::process::exit(1);
    }
}

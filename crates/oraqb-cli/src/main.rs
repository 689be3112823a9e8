use clap::Parser;
use oraqb_cli::cli::Cli;

fn main() {
    let cli = Cli::parse();
    oraqb_cli::logging::setup_logging(cli.verbose);

    if let Err(e) = oraqb_cli::run(cli) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

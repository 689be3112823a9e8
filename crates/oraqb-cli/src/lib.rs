pub mod cli;
pub mod config;
mod demo;
pub mod logging;
mod render;

use std::io::Write;

pub fn run(cli: cli::Cli) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    run_with_writer(cli, &mut stdout.lock())
}

/// Same as [`run`], writing rendered output to `out`.
pub fn run_with_writer(cli: cli::Cli, out: &mut impl Write) -> anyhow::Result<()> {
    match cli.command {
        cli::Command::Render(args) => {
            let config = config::QueryConfig::load(&args.file)?;
            tracing::info!(
                file = %config.config_path.display(),
                root = %config.file.root,
                queries = config.file.queries.len(),
                "rendering query file"
            );
            let query = render::build_root(&config.file)?;
            render::write_query(
                out,
                query.as_ref(),
                &args.output,
                config.file.placeholder_style.into(),
            )
        }
        cli::Command::Demo(args) => {
            let query = demo::employee_report(args.all_rows);
            render::write_query(out, &query, &args.output, oraqb::PlaceholderStyle::Question)
        }
    }
}

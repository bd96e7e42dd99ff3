//! `catpack` command-line entry point

fn main() -> anyhow::Result<()> {
    catpack::cli::run_cli()
}

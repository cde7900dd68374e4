//! CLI entry point for map scoring and search

use clap::Parser;
use mapsmith::io::cli::{Cli, Session, init_tracing};

fn main() -> mapsmith::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut session = Session::new(cli);
    session.run().map(|_| ())
}

use clap::Parser;

use kvtree_cli::Cli;

fn main() {
    let cli = Cli::parse();
    kvtree_cli::init_tracing(cli.verbose);

    if let Err(e) = kvtree_cli::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

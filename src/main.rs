use clap::Parser;
use foliogen::cli::{self, output, Cli};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli::dispatch(&cli) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

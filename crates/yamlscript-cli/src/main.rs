use clap::Parser;
use std::path::PathBuf;

mod load;
mod logger;
mod utils;

#[cfg(test)]
mod tests;

use load::{LoadOptions, handle_load};

/// Get the version string including git revision
fn version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (git:",
        env!("GIT_HASH"),
        ")"
    )
}

#[derive(Parser)]
#[command(
    author,
    version = version(),
    about = "Load a YAMLScript document through libys and print the result as JSON",
    long_about = None
)]
struct Cli {
    /// The file to load ("-" or omitted reads stdin)
    file: Option<String>,

    /// Path to the libys shared library (overrides LIBYS_PATH)
    #[arg(long, value_name = "PATH")]
    library: Option<PathBuf>,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Print the raw response envelope from libys
    #[arg(long)]
    raw: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    logger::init(cli.verbose);

    let options = LoadOptions {
        file: cli.file.unwrap_or_else(|| "-".to_string()),
        library: cli.library,
        compact: cli.compact,
        raw: cli.raw,
    };
    handle_load(&options);
}

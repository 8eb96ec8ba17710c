//! `EaLoc` command-line binary

fn main() {
    if let Err(e) = ealoc::cli::run_cli() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

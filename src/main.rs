//! Popple CLI entry point

fn main() {
    popple::cli::run();
}

//! Kermit to Binary

fn main() {
    std::process::exit(kquote::cli::main(&kquote::cli::KTOB));
}

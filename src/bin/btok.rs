//! Binary to Kermit

fn main() {
    std::process::exit(kquote::cli::main(&kquote::cli::BTOK));
}

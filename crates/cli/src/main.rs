fn main() {
    if let Err(e) = naming_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

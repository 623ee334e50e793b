fn main() {
    if let Err(err) = docmerge_cli::run() {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

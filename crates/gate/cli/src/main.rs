fn main() {
    if let Err(e) = legend_gate_cli::run() {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

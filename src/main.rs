fn main() {
    if let Err(err) = sankey_timeline::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn main() {
    if let Err(err) = mindvault::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

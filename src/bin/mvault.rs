//! Short alias (`mvault`) that forwards to the `mindvault` library.

fn main() {
    if let Err(err) = mindvault::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

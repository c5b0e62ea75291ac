use stamp_notes::error::Error;

fn main() {
    if let Err(err) = stamp_notes::entry() {
        eprintln!("error: {err}");
        if matches!(err, Error::Usage(_)) {
            eprintln!("Run with -h for usage.");
        }
        std::process::exit(err.exit_code());
    }
}

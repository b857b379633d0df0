fn main() {
    if let Err(err) = canaicode::run() {
        eprintln!("{}", canaicode::format_error(&err));
        std::process::exit(1);
    }
}

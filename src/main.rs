fn main() {
    let cli = doxdepends::cli::parse();
    let code = doxdepends::app::run_cli(cli);
    if code != 0 {
        std::process::exit(code);
    }
}

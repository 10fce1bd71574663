fn main() {
    std::process::exit(gtm_cli::run_cli());
}

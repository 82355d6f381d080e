fn main() {
    cptm_client::app::cli::run();
}

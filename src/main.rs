use env_logger::Env;
use log::LevelFilter;

fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .parse_env(Env::new().filter("MNISTIDX_LOG"))
        .init();

    if let Err(err) = mnistidx::run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

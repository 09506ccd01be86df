use log::error;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = orrery::run() {
        error!("failed to start: {err}");
        std::process::exit(1);
    }
}

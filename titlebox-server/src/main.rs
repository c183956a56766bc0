use clap::Parser;
use titlebox_server::Config;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the environment and flags still apply.
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    if let Err(e) = titlebox_server::run(config).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

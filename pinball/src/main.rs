use clap::Parser;
use ggez::{GameError, GameResult};
use pinball::config::{Args, SceneConfig};

mod visual;

fn main() -> GameResult {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => return Err(GameError::CustomError(e.to_string())),
        // --help and --version
        Err(e) => e.exit(),
    };
    match args.seed {
        Some(seed) => log::info!("Pinball starting with seed {}", seed),
        None => log::info!("Pinball starting with a random seed"),
    }

    visual::run_visual(SceneConfig::default(), args.seed)
}

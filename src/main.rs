use isolation_aho_ai::selfplay::{run_selfplay, SelfPlayConfig};
use std::env;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 引数で設定ファイル (JSON) を指定できる
    let config = match env::args().nth(1) {
        Some(path) => SelfPlayConfig::load(&path)?,
        None => SelfPlayConfig::default(),
    };

    log::info!(
        "self-play: {} games on {}x{}, {} ms per move",
        config.num_games,
        config.board_width,
        config.board_height,
        config.time_limit_ms
    );

    let stats = run_selfplay(&config)?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

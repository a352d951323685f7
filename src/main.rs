use sortbin::config::CONTROLS_HELP;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("{}", CONTROLS_HELP);

    sortbin::run()?;
    Ok(())
}

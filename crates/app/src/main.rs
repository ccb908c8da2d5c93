use anyhow::Context;

fn main() -> anyhow::Result<()> {
    franchise_observability::init();

    let config = franchise_config::load_from_env().context("failed to load configuration")?;

    let mut registry = franchise_registry::Registry::new(config)?;
    let demo = franchise_app::seed_demo(&mut registry)?;
    franchise_app::log_report(&registry, &demo, chrono::Local::now().date_naive());

    Ok(())
}

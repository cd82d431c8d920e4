use anyhow::Result;

use chalkboard::config::ReportConfig;
use chalkboard::data::loader;
use chalkboard::report;

fn main() -> Result<()> {
    env_logger::init();

    let cfg = ReportConfig::default();
    let dataset = loader::load_dataset(&cfg.sources)?;
    report::render(&dataset, &cfg)?;

    Ok(())
}

use anyhow::{Context, Result};
use confcal_core::IcsGenerator;

use crate::render::Render;

pub fn run(generator: &IcsGenerator) -> Result<()> {
    let event = generator
        .featured_event()
        .context("The featured event in config is invalid")?;

    println!("{}", event.render());

    Ok(())
}

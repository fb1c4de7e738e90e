//! Regions command - validates a region map file

use std::path::Path;

use anyhow::{Context, Result};
use hospital_ui::cascade::district_options;
use hospital_ui::RegionMap;

pub fn run(file: Option<&Path>, state: Option<&str>) -> Result<()> {
    let regions = match file {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            RegionMap::from_json(&json)
                .with_context(|| format!("Invalid region map {}", path.display()))?
        }
        None => RegionMap::builtin(),
    };

    if let Some(state) = state {
        if regions.districts(state).is_empty() {
            log::warn!("State {state:?} has no districts configured");
        }
        for option in district_options(&regions, state) {
            println!("{:?} => {}", option.value, option.label);
        }
        return Ok(());
    }

    println!("{} states", regions.len());
    for state in regions.states() {
        println!("  {state}: {} districts", regions.districts(state).len());
    }
    Ok(())
}

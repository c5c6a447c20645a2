use anyhow::Result;
use geoplace::{read_boundaries_file, Catalog, Resolver};
use log::info;

use super::load_config;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::CatalogArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let resolver = Resolver::from_config(&config);

    info!("[catalog] loading boundaries from {}", args.boundaries.display());
    let catalog = Catalog::build(read_boundaries_file(&args.boundaries)?, &resolver);

    for (key, summary) in catalog.units() {
        println!(
            "{:<40} {:<9} center=({:.6}, {:.6}) range=({:.6}, {:.6})",
            key.as_str(),
            if catalog.is_mapped(key) { "mapped" } else { "unmapped" },
            summary.center_lat, summary.center_lng, summary.lat_range, summary.lng_range,
        );
    }

    let report = catalog.report();
    println!("{} units from {} features", catalog.len(), report.features);
    for label in &report.unresolved {
        println!("  unresolved label: {label}");
    }
    for unit in &report.degenerate {
        println!("  degenerate: {} ({})", unit.key, unit.error);
    }
    for key in &report.duplicates {
        println!("  duplicate (last kept): {key}");
    }
    if report.unlabeled > 0 {
        println!("  {} features without a label in {:?}", report.unlabeled, resolver.label_fields());
    }

    Ok(())
}

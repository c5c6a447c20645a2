use std::{fs::File, io::{self, BufWriter, Write}, path::Path};

use anyhow::{bail, Context, Result};
use geoplace::{read_boundaries_file, write_markers_geojson, MapSession, Registrant, UnitKey};
use log::{info, warn};
use serde::Deserialize;

use super::load_config;
use crate::cli::OutputFormat;

/// A registrant row as exported by the records datastore.
#[derive(Debug, Deserialize)]
struct RegistrantRecord {
    id: String,
    #[serde(default)]
    unit_key: Option<String>,
    #[serde(default)]
    purok: Option<String>,
    #[serde(default)]
    barangay: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    name: Option<String>,
}

impl RegistrantRecord {
    fn into_registrant(self) -> Result<Registrant> {
        let key = match (self.unit_key, self.purok, self.barangay) {
            (Some(key), _, _) => UnitKey::from(key),
            (None, Some(purok), Some(barangay)) => UnitKey::from_parts(&purok, &barangay),
            _ => bail!("registrant '{}' needs either unit_key or both purok and barangay", self.id),
        };

        let mut registrant = Registrant::new(self.id, key);
        registrant.latitude = self.latitude;
        registrant.longitude = self.longitude;
        registrant.label = self.name;
        Ok(registrant)
    }
}

fn read_registrants(path: &Path) -> Result<Vec<Registrant>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open registrant file {}", path.display()))?;
    let records: Vec<RegistrantRecord> = serde_json::from_reader(io::BufReader::new(file))
        .with_context(|| format!("Failed to parse registrant file {}", path.display()))?;
    records.into_iter().map(RegistrantRecord::into_registrant).collect()
}

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::PlaceArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if args.seed.is_some() { config.scatter.seed = args.seed }

    let mut session = MapSession::new(config)?;

    info!("[place] loading boundaries from {}", args.boundaries.display());
    session.rebuild_catalog(read_boundaries_file(&args.boundaries)?);

    info!("[place] loading registrants from {}", args.registrants.display());
    let registrants = read_registrants(&args.registrants)?;
    let total = registrants.len();
    let placement = session.place_all(registrants);

    for group in &placement.unplaced {
        warn!("[place] no boundary for '{}', {} registrants left out", group.unit_key, group.registrants.len());
    }
    info!("[place] placed {} of {} registrants", placement.markers.len(), total);

    let bytes = match args.format {
        OutputFormat::Json => serde_json::to_vec_pretty(&placement.markers).context("Failed to serialize markers")?,
        OutputFormat::Geojson => write_markers_geojson(&placement.markers)?,
    };

    match &args.output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?);
            out.write_all(&bytes)?;
            out.flush()?;
            info!("[place] wrote markers to {}", path.display());
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(&bytes)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

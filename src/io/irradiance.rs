use std::{io::Read, path::Path};

use serde::Deserialize;

use crate::{
    core::pv::IrradianceSample,
    prelude::*,
    quantity::{irradiance::WattsPerSquareMetre, power::Watts, time::Hours},
};

/// Irradiance CSV row: `hour,irradiance,consumption`.
#[derive(Deserialize)]
struct Record {
    hour: Hours,
    irradiance: WattsPerSquareMetre,
    consumption: Watts,
}

#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_path(path: &Path) -> Result<Vec<IrradianceSample>> {
    let reader = std::fs::File::open(path)
        .with_context(|| format!("failed to open `{}`", path.display()))?;
    let samples =
        read(reader).with_context(|| format!("failed to read irradiance `{}`", path.display()))?;
    info!(n_samples = samples.len(), "loaded irradiance");
    Ok(samples)
}

pub fn read(reader: impl Read) -> Result<Vec<IrradianceSample>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize::<Record>()
        .enumerate()
        .map(|(index, record)| {
            let record = record.with_context(|| format!("invalid record #{index}"))?;
            Ok(IrradianceSample {
                time: record.hour,
                irradiance: record.irradiance,
                consumption: record.consumption,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read() {
        let samples = read("hour,irradiance,consumption\n12,850,300\n".as_bytes()).unwrap();
        assert_eq!(
            samples,
            [IrradianceSample {
                time: Hours(12.0),
                irradiance: WattsPerSquareMetre(850.0),
                consumption: Watts(300.0),
            }]
        );
    }
}

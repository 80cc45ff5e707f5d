use std::{io::Read, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    core::{Profile, Sample},
    prelude::*,
    quantity::{power::Watts, time::Hours},
};

/// Profile CSV row: `hour,generation,consumption`.
#[derive(Deserialize, Serialize)]
struct Record {
    hour: Hours,
    generation: Watts,
    consumption: Watts,
}

impl From<Record> for Sample {
    fn from(record: Record) -> Self {
        Self::new(record.hour, record.generation, record.consumption)
    }
}

impl From<&Sample> for Record {
    fn from(sample: &Sample) -> Self {
        Self { hour: sample.time, generation: sample.generation, consumption: sample.consumption }
    }
}

#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_path(path: &Path) -> Result<Profile> {
    let reader = std::fs::File::open(path)
        .with_context(|| format!("failed to open `{}`", path.display()))?;
    let profile =
        read(reader).with_context(|| format!("failed to read profile `{}`", path.display()))?;
    if profile.is_empty() {
        warn!("the profile has no samples");
    }
    info!(n_samples = profile.len(), "loaded profile");
    Ok(profile)
}

/// Read the samples without checking them: the simulator validates the profile as a whole.
pub fn read(reader: impl Read) -> Result<Profile> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize::<Record>()
        .enumerate()
        .map(|(index, record)| {
            record.map(Sample::from).with_context(|| format!("invalid record #{index}"))
        })
        .collect()
}

pub fn write(profile: &Profile, writer: impl std::io::Write) -> Result {
    let mut writer = csv::Writer::from_writer(writer);
    for sample in profile {
        writer.serialize(Record::from(sample))?;
    }
    writer.flush()?;
    Ok(())
}

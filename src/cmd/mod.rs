pub mod calculate;
pub mod schedule;
pub mod schema;

use congestion_tax::{PassageRecord, TaxConfig};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read passage records from a CSV file (or stdin with "-")
pub fn read_passages(path: &Path) -> anyhow::Result<Vec<PassageRecord>> {
    if path.as_os_str() == "-" {
        read_from_stdin()
    } else {
        let file = File::open(path)?;
        read_csv(BufReader::new(file))
    }
}

fn read_from_stdin() -> anyhow::Result<Vec<PassageRecord>> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    read_csv(io::Cursor::new(buffer))
}

fn read_csv<R: Read>(reader: R) -> anyhow::Result<Vec<PassageRecord>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let records = rdr
        .deserialize()
        .collect::<Result<Vec<PassageRecord>, _>>()?;
    log::info!("Read {} passage records", records.len());
    Ok(records)
}

/// The reference configuration unless a config file is given
pub fn load_config(path: Option<&Path>) -> anyhow::Result<TaxConfig> {
    match path {
        Some(path) => Ok(TaxConfig::load(path)?),
        None => Ok(TaxConfig::default()),
    }
}

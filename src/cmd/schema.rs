//! Schema command - print expected input formats

use clap::Args;
use congestion_tax::TaxConfig;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema, csv-header or csv-fields
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the configuration file
    JsonSchema,
    /// CSV header row for passage files
    CsvHeader,
    /// CSV column descriptions
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => {
                let schema = schema_for!(TaxConfig);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::CsvHeader => {
                let names: Vec<_> = CSV_FIELD_DESCRIPTIONS.iter().map(|(name, ..)| *name).collect();
                println!("{}", names.join(","));
            }
            SchemaFormat::CsvFields => {
                println!("CSV Input Format");
                println!("================");
                println!();
                for (name, required, description) in CSV_FIELD_DESCRIPTIONS {
                    let req = if *required { "required" } else { "optional" };
                    println!("{:12} ({:8})  {}", name, req, description);
                }
                println!();
                println!("Other columns are ignored. Each date is taxed separately.");
            }
        }
        Ok(())
    }
}

const CSV_FIELD_DESCRIPTIONS: &[(&str, bool, &str)] = &[(
    "timestamp",
    true,
    "Passage time (YYYY-MM-DD hh:mm[:ss] or YYYY-MM-DDThh:mm[:ss])",
)];

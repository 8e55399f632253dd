//! Seed files.
//!
//! Seed data is distributed as three CSV files. Each row maps to one
//! record, with columns matched to fields by header name:
//!
//! - Advice: `topic,description,link`
//! - Countries: `name,description,travel_advice,crime_index,disaster_risk,corruption_index,health`
//! - Links: `country,topic`
//!
//! Empty cells in numeric columns default to zero, and an empty `link`
//! means the advice has no link.

use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{AdvisoryError, AdvisoryResult};
use crate::risk::RiskIndices;

/// A row of the advice file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdviceRecord {
    pub topic: String,
    pub description: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub link: Option<String>,
}

/// A row of the countries file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CountryRecord {
    pub name: String,
    pub description: String,
    pub travel_advice: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub crime_index: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub disaster_risk: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub corruption_index: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub health: Option<f64>,
}

/// A row of the country-advice links file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkRecord {
    /// Name of the country.
    pub country: String,

    /// Topic of the advice.
    pub topic: String,
}

impl AdviceRecord {
    /// Returns the link, treating blank cells as absent.
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref().filter(|link| !link.trim().is_empty())
    }
}

impl CountryRecord {
    pub fn indices(&self) -> RiskIndices {
        RiskIndices {
            crime_index: self.crime_index.unwrap_or_default(),
            disaster_risk: self.disaster_risk.unwrap_or_default(),
            corruption_index: self.corruption_index.unwrap_or_default(),
            health: self.health.unwrap_or_default(),
        }
    }
}

/// Reads all records from a CSV file.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> AdvisoryResult<Vec<T>> {
    let file = std::fs::File::open(path)?;
    parse_records(file).map_err(|error| AdvisoryError::InvalidSeedFile {
        path: path.to_owned(),
        error,
    })
}

/// Parses all records from a CSV stream with a header row.
pub fn parse_records<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, csv::Error> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[test]
    fn test_advice_records() {
        let s = "topic,description,link
crime,Keep valuables out of sight.,https://example.com/crime
health,Check vaccinations before travel.,
";
        let records: Vec<AdviceRecord> = parse_records(s.as_bytes()).unwrap();
        assert_eq!(2, records.len());
        assert_eq!("crime", records[0].topic);
        assert_eq!(Some("https://example.com/crime"), records[0].link());
        assert_eq!(None, records[1].link());
    }

    #[test]
    fn test_country_records() {
        // Columns are matched by header, not position
        let s = "name,travel_advice,description,health,crime_index,disaster_risk,corruption_index
testland,Exercise caution,A test country,0.5,0.5,0.5,0.5
blankland,Do not travel,No metrics yet,,,,
";
        let records: Vec<CountryRecord> = parse_records(s.as_bytes()).unwrap();
        assert_eq!(2, records.len());

        assert_eq!("testland", records[0].name);
        assert_eq!("A test country", records[0].description);
        assert_eq!(0.5, records[0].indices().aggregate());

        assert_eq!(RiskIndices::default(), records[1].indices());
    }

    #[test]
    fn test_read_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "country,topic").unwrap();
        writeln!(file, "testland,crime").unwrap();

        let records: Vec<LinkRecord> = read_records(file.path()).unwrap();
        assert_eq!(
            vec![LinkRecord {
                country: "testland".to_string(),
                topic: "crime".to_string(),
            }],
            records
        );
    }

    #[test]
    fn test_read_records_bad_row() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "country,topic").unwrap();
        writeln!(file, "testland").unwrap();

        let err = read_records::<LinkRecord>(file.path()).unwrap_err();
        assert_eq!("InvalidSeedFile", err.name());
    }

    #[test]
    fn test_read_records_missing_file() {
        let err = read_records::<LinkRecord>(Path::new("/nonexistent/links.csv")).unwrap_err();
        assert_eq!("IoError", err.name());
    }
}

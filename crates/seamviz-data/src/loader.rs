//! Delivery CSV loading with required-column validation.

use seamviz_common::{Delivery, Result, SeamError};
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

/// Columns that must be present in the input table. Only presence and
/// numeric typing of the four metric columns is enforced; anything else in
/// the file is ignored.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "Date",
    "Match",
    "Innings",
    "Bowler",
    "Bowler Type",
    "PastZ",
    "PitchX",
    "PastY",
    "PitchY",
];

/// Loads delivery rows from a CSV file on disk.
pub struct DeliveryLoader {
    path: PathBuf,
}

impl DeliveryLoader {
    /// Creates a loader for the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads and validates all delivery rows.
    ///
    /// # Errors
    ///
    /// Returns [`SeamError::Data`] when a required column is missing or a
    /// row cannot be parsed, and [`SeamError::Csv`] / [`SeamError::Io`] for
    /// lower-level read failures.
    pub fn load(&self) -> Result<Vec<Delivery>> {
        let file = std::fs::File::open(&self.path).map_err(|e| {
            SeamError::Data(format!("cannot open {}: {}", self.path.display(), e))
        })?;
        let deliveries = read_deliveries(file)?;
        debug!(
            path = %self.path.display(),
            rows = deliveries.len(),
            "loaded delivery table"
        );
        Ok(deliveries)
    }
}

/// Reads delivery rows from any CSV source.
///
/// # Errors
///
/// Returns [`SeamError::Data`] when a required column is absent or a row
/// fails to deserialize.
pub fn read_deliveries<R: Read>(source: R) -> Result<Vec<Delivery>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    validate_headers(reader.headers()?)?;

    let mut deliveries = Vec::new();
    for (index, record) in reader.deserialize::<Delivery>().enumerate() {
        // Header is line 1, so data rows start at line 2.
        let row = record
            .map_err(|e| SeamError::Data(format!("row {}: {}", index + 2, e)))?;
        deliveries.push(row);
    }

    Ok(deliveries)
}

fn validate_headers(headers: &csv::StringRecord) -> Result<()> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == **required))
        .copied()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SeamError::Data(format!(
            "missing required column(s): {}",
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Date,Match,Innings,Bowler,Bowler Type,PastZ,PitchX,PastY,PitchY";

    #[test]
    fn test_reads_valid_rows() {
        let input = format!(
            "{HEADER}\n\
             2023-06-01,M1,1,J Smith,RF,1.5,7.5,0.4,0.1\n\
             2023-06-01,M1,1,K Jones,LM,1.2,6.0,0.6,0.2\n"
        );

        let rows = read_deliveries(input.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].bowler, "J Smith");
        assert_eq!(rows[1].bowler_type, "LM");
        assert!((rows[1].pitch_x - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_column_is_data_error() {
        // No "Bowler Type" column.
        let input = "Date,Match,Innings,Bowler,PastZ,PitchX,PastY,PitchY\n\
                     2023-06-01,M1,1,J Smith,1.5,7.5,0.4,0.1\n";

        let err = read_deliveries(input.as_bytes()).unwrap_err();
        match err {
            SeamError::Data(message) => assert!(message.contains("Bowler Type")),
            other => panic!("expected Data error, got {other:?}"),
        }
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let input = format!(
            "{HEADER},Speed\n\
             2023-06-01,M1,1,J Smith,RF,1.5,7.5,0.4,0.1,84.2\n"
        );

        let rows = read_deliveries(input.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_unparseable_metric_reports_row() {
        let input = format!(
            "{HEADER}\n\
             2023-06-01,M1,1,J Smith,RF,1.5,7.5,0.4,0.1\n\
             2023-06-01,M1,1,K Jones,LM,not-a-number,6.0,0.6,0.2\n"
        );

        let err = read_deliveries(input.as_bytes()).unwrap_err();
        match err {
            SeamError::Data(message) => assert!(message.contains("row 3")),
            other => panic!("expected Data error, got {other:?}"),
        }
    }

    #[test]
    fn test_loader_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "2023-06-01,M1,1,J Smith,RF,1.5,7.5,0.4,0.1").unwrap();

        let loader = DeliveryLoader::new(file.path());
        let rows = loader.load().unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_loader_missing_file_is_data_error() {
        let loader = DeliveryLoader::new("/definitely/not/here.csv");
        assert!(matches!(loader.load(), Err(SeamError::Data(_))));
    }
}

//! Series acquisition from JSON documents.
//!
//! A document is an array of rows, each row an array of 16 strings using
//! the symbol text convention (`"e"`, `"^^>2"`, `"^^ascii"`). Problems
//! reading or parsing the document are [`Error::SeriesLoad`]; problems with
//! its content are [`Error::InvalidSeries`].

use crate::error::{Error, LoadError, Result};
use crate::series::Series;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

type Document = Vec<Vec<String>>;

pub fn from_json(json: &str) -> Result<Series> {
    let rows: Document = serde_json::from_str(json).map_err(LoadError::from)?;
    from_document(rows)
}

pub fn from_reader<R: io::Read>(reader: R) -> Result<Series> {
    let rows: Document = serde_json::from_reader(reader).map_err(LoadError::from)?;
    from_document(rows)
}

pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Series> {
    let path = path.as_ref();
    let file = File::open(path).map_err(LoadError::from)?;
    debug!("loading series from {}", path.display());
    from_reader(BufReader::new(file))
}

fn from_document(rows: Document) -> Result<Series> {
    let series = Series::from_text_rows(rows)?;
    debug!("loaded series of {} rows", series.len());
    Ok(series)
}

impl Series {
    /// Render the series in the document format accepted by [`from_json`].
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::SeriesLoad(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SeriesError;
    use crate::series::Symbol;
    use crate::tests::{sample_series, setup};
    use std::io::Write;

    const SAMPLE_JSON: &str = r#"[
        ["a","b","c","d","e","f","g","h","i","j","k","l","m","n","^^ascii","^^>1"],
        ["o","p","q","r","s","t","u","v","w","x","y","z"," ",".","!","?"]
    ]"#;

    #[test]
    fn test_from_json() {
        setup();
        let series = from_json(SAMPLE_JSON).unwrap();
        assert_eq!(series.rows(), sample_series().rows());
        assert_eq!(series.get(0, 14), Some(Symbol::AsciiEscape));
    }

    #[test]
    fn test_to_json_round_trips() {
        setup();
        let json = sample_series().to_json().unwrap();
        assert!(json.contains(r#""^^>1""#));
        assert!(json.contains(r#""^^ascii""#));
        assert_eq!(from_json(&json).unwrap().rows(), sample_series().rows());
    }

    #[test]
    fn test_from_path() {
        setup();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_JSON.as_bytes()).unwrap();
        let series = from_path(file.path()).unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_load_failures_are_distinct_from_content_failures() {
        setup();
        assert!(matches!(
            from_json("[[\"a\", "),
            Err(Error::SeriesLoad(LoadError::Json(_)))
        ));
        assert!(matches!(
            from_json(r#"{"rows": []}"#),
            Err(Error::SeriesLoad(LoadError::Json(_)))
        ));
        assert!(matches!(
            from_path("/nonexistent/series.json"),
            Err(Error::SeriesLoad(LoadError::Io(_)))
        ));
        assert!(matches!(
            from_json(r#"[["a","b"]]"#),
            Err(Error::InvalidSeries(SeriesError::RowLength { row: 0, len: 2 }))
        ));
    }
}

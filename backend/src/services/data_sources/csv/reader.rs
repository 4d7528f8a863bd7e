use csv::ReaderBuilder;
use std::path::Path;

/// Header row and raw values of a CSV file, stored column by column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvColumns {
    pub headers: Vec<String>,
    /// `values[i]` holds the cells of `headers[i]` in file order.
    pub values: Vec<Vec<String>>,
}

/// Reads the header row and at most `max_rows` data rows of a CSV file.
///
/// Cells are kept verbatim (no trimming). Short rows are padded with empty
/// strings and extra cells beyond the header width are ignored. Bytes that
/// are not valid UTF-8 are replaced with U+FFFD instead of failing the file.
pub fn read_columns(path: &Path, max_rows: usize) -> Result<CsvColumns, csv::Error> {
    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = reader.byte_headers()?.iter().map(lossy).collect();
    let mut values = vec![Vec::new(); headers.len()];

    for record in reader.byte_records().take(max_rows) {
        let record = record?;
        for (idx, column) in values.iter_mut().enumerate() {
            column.push(record.get(idx).map(lossy).unwrap_or_default());
        }
    }

    Ok(CsvColumns { headers, values })
}

fn lossy(cell: &[u8]) -> String {
    String::from_utf8_lossy(cell).into_owned()
}

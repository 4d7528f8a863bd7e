use super::reader::CsvColumns;
use common::model::csv::HeaderSource;
use std::collections::{HashMap, HashSet};

/// One unique header of an upload with its values from every file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogColumn {
    pub source: HeaderSource,
    pub values: Vec<String>,
}

/// Collects the headers of several files in upload order.
///
/// A header seen in more than one file is kept once and belongs to the first
/// file that contained it, which names its source and default table. Its
/// values are pooled in upload order, so inference sees the data of every
/// file carrying the header.
#[derive(Debug, Default)]
pub struct HeaderCatalog {
    columns: Vec<CatalogColumn>,
    index: HashMap<String, usize>,
}

impl HeaderCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, file_name: &str, file: CsvColumns) {
        // Repeated headers inside one file keep their first column only.
        let mut in_file = HashSet::new();
        for (header, values) in file.headers.into_iter().zip(file.values) {
            if !in_file.insert(header.clone()) {
                continue;
            }
            match self.index.get(&header) {
                Some(&idx) => self.columns[idx].values.extend(values),
                None => {
                    self.index.insert(header.clone(), self.columns.len());
                    self.columns.push(CatalogColumn {
                        source: HeaderSource {
                            header,
                            file_name: file_name.to_string(),
                        },
                        values,
                    });
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn headers(&self) -> Vec<HeaderSource> {
        self.columns.iter().map(|c| c.source.clone()).collect()
    }

    pub fn into_columns(self) -> Vec<CatalogColumn> {
        self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(headers: &[&str]) -> CsvColumns {
        CsvColumns {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            values: headers.iter().map(|h| vec![format!("{h}-value")]).collect(),
        }
    }

    #[test]
    fn headers_are_unique_in_first_seen_order() {
        let mut catalog = HeaderCatalog::new();
        catalog.add_file("a.csv", file(&["id", "name", "email"]));
        catalog.add_file("b.csv", file(&["id", "city", "name", "zip"]));

        let names: Vec<_> = catalog.headers().into_iter().map(|h| h.header).collect();
        assert_eq!(names, vec!["id", "name", "email", "city", "zip"]);
    }

    #[test]
    fn first_file_owns_shared_headers() {
        let mut catalog = HeaderCatalog::new();
        catalog.add_file("a.csv", file(&["id"]));
        catalog.add_file("b.csv", file(&["id", "city"]));

        let columns = catalog.into_columns();
        assert_eq!(columns[0].source.file_name, "a.csv");
        assert_eq!(columns[1].source.file_name, "b.csv");
    }

    #[test]
    fn shared_header_values_are_pooled_in_upload_order() {
        let mut catalog = HeaderCatalog::new();
        catalog.add_file("a.csv", file(&["id"]));
        catalog.add_file(
            "b.csv",
            CsvColumns {
                headers: vec!["city".into(), "id".into()],
                values: vec![vec!["Oslo".into()], vec!["7".into(), "8".into()]],
            },
        );

        let columns = catalog.into_columns();
        assert_eq!(columns[0].source.file_name, "a.csv");
        assert_eq!(columns[0].values, vec!["id-value", "7", "8"]);
        assert_eq!(columns[1].values, vec!["Oslo"]);
    }

    #[test]
    fn duplicate_header_within_a_file_keeps_first_column() {
        let mut catalog = HeaderCatalog::new();
        catalog.add_file(
            "a.csv",
            CsvColumns {
                headers: vec!["x".into(), "x".into()],
                values: vec![vec!["first".into()], vec!["second".into()]],
            },
        );
        let columns = catalog.into_columns();
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].values, vec!["first"]);
    }

    #[test]
    fn empty_until_a_file_with_headers_is_added() {
        let mut catalog = HeaderCatalog::new();
        assert!(catalog.is_empty());
        catalog.add_file("empty.csv", CsvColumns::default());
        assert!(catalog.is_empty());
    }
}

use common::model::wizard::UsecaseReference;
use log::error;
use std::path::Path;

/// Reads the business usecases offered on the confirm-usecase step.
///
/// The file needs `business_usecase_name` and `database_name` columns; other
/// columns are ignored. Any problem is logged and yields an empty list.
pub fn read_reference_usecases(path: &Path) -> Vec<UsecaseReference> {
    match try_read(path) {
        Ok(usecases) => usecases,
        Err(e) => {
            error!("Error reading {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

fn try_read(path: &Path) -> Result<Vec<UsecaseReference>, csv::Error> {
    let mut reader = csv::Reader::from_path(path)?;
    reader.deserialize().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_usecases_by_column_name() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "database_name,business_usecase_name,owner").unwrap();
        writeln!(file, "sales_db,Sales reporting,finance").unwrap();
        writeln!(file, "crm_db,Customer onboarding,ops").unwrap();

        let usecases = read_reference_usecases(file.path());
        assert_eq!(
            usecases,
            vec![
                UsecaseReference {
                    business_usecase_name: "Sales reporting".to_string(),
                    database_name: "sales_db".to_string(),
                },
                UsecaseReference {
                    business_usecase_name: "Customer onboarding".to_string(),
                    database_name: "crm_db".to_string(),
                },
            ]
        );
    }

    #[test]
    fn missing_column_gives_empty_list() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "business_usecase_name").unwrap();
        writeln!(file, "Sales reporting").unwrap();
        assert!(read_reference_usecases(file.path()).is_empty());
    }

    #[test]
    fn missing_file_gives_empty_list() {
        assert!(read_reference_usecases(Path::new("no/such/reference.csv")).is_empty());
    }
}

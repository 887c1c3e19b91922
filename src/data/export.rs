use super::model::Table;
use super::PipelineError;

/// Name suggested for the exported file.
pub const EXPORT_FILE_NAME: &str = "filtered_dataset.csv";

/// Serialize the table as UTF-8 comma-delimited bytes: header row, one record
/// per row, no index column. Null cells become empty fields.
pub fn to_csv_bytes(table: &Table) -> Result<Vec<u8>, PipelineError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(table.columns.iter().map(|c| c.name.as_str()))
        .map_err(|e| PipelineError::Parse(e.to_string()))?;

    for row in 0..table.n_rows() {
        let record: Vec<String> = table
            .columns
            .iter()
            .map(|c| c.values[row].to_string())
            .collect();
        writer
            .write_record(&record)
            .map_err(|e| PipelineError::Parse(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| PipelineError::Parse(e.to_string()))
}

mod csv_import;
mod export;

pub(crate) use csv_import::{parse_decimal, CsvImporter};
pub(crate) use export::export_plan;

mod csv;

pub use csv::CsvResponse;

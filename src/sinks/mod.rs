mod writers;


pub use writers::{write_csv_report, write_json_report};

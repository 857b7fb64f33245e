pub mod formatting;

pub use formatting::{format_measurement, patient_summary, pluralize, truncate};

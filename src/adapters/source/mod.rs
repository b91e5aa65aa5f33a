//! Record sources
//!
//! - [`RecordSource`] - the async seam the exchange service fetches rows through
//! - [`JsonRowsSource`] - serves rows from a JSON dump file

pub mod json_rows;
pub mod traits;

pub use json_rows::{parse_rows, JsonRowsSource};
pub use traits::RecordSource;

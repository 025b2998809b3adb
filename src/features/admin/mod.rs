pub mod csv_export;
pub mod handler;
pub mod standalone;

pub use csv_export::{CSV_HEADER, render_csv};
pub use handler::create_admin_router;
pub use standalone::create_standalone_router;

pub mod handler;
pub mod models;

pub use handler::create_checkin_router;
pub use models::{CheckinRequest, CheckinResponse};

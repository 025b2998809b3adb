pub mod handler;

pub use handler::create_qrcode_router;

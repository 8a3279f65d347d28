// Request handling module entry

pub mod page;
pub mod router;

pub use router::handle_request;

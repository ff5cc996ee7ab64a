pub mod envelope;
pub mod upload;

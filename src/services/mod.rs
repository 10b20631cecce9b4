pub mod defaults;
pub mod summary;
pub mod transfer;

pub mod context;
pub mod listener;

pub use context::ServerContext;

pub mod engine;
pub mod handlers;
pub mod locks;
pub mod processor;

pub mod categorize;
pub mod fetch;
pub mod serve;

// Re-export command functions for convenience
pub use categorize::categorize;
pub use fetch::fetch;
pub use serve::serve;

pub mod decor;
pub mod derived;
pub mod header_resolver;
pub mod loader;
pub mod locator;
pub mod normalizer;
pub mod views;

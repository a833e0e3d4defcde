// Top-level flows
pub mod fetcher;
pub mod page_loader;

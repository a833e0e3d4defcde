// External API clients
pub mod youtube;

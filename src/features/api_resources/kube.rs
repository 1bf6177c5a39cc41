mod api_resources;

pub use api_resources::*;

pub mod api_resources;
pub mod resource_table;
pub mod search;

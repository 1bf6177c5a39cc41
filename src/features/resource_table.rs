mod descriptor;
mod fetcher;
mod table;

pub use descriptor::{ResolvedDescriptor, ResourceDescriptor, DEFAULT_VERSION};
pub use fetcher::ResourceTableFetcher;
pub use table::{NormalizedTable, TableColumn, TableRow, NAMESPACE_COLUMN};

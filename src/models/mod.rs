pub mod bulk_result;
pub mod loaders;
pub mod network;
pub mod order;

pub use bulk_result::{BulkOrderResponse, BulkSummary, FailedOrder, SuccessfulOrder};
pub use loaders::{load_catalog_file, load_input_text};
pub use network::{Bundle, Network, NetworkCatalog, NetworkKey};
pub use order::{BulkOrderRequest, OrderEntry, DEFAULT_CAPACITY};

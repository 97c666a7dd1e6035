pub mod order_client;
pub mod session;

pub use order_client::OrderApiClient;
pub use session::Session;

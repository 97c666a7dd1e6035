pub mod bulk_parser;
pub mod export;
pub mod order_sheet;
pub mod phone;
pub mod pricing;

pub use bulk_parser::{parse_bulk_text, parse_csv, parse_input, InputFormat, ParseOutcome};
pub use order_sheet::OrderSheet;
pub use phone::{is_valid_ghanaian_mobile, normalize_phone};
pub use pricing::calculate_total_cost;

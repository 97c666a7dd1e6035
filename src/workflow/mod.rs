pub mod bulk_flow;
pub mod submission_ctx;

pub use bulk_flow::{check_ready, select_network, BulkOrderFlow, FlowOutcome, FlowReport};
pub use submission_ctx::SubmissionCtx;

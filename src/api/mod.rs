pub mod client;
pub mod envelope;

pub use client::QueryClient;
pub use envelope::{ApiResponse, ApiStatus, LabelSet, QueryData, ResultType, decode_envelope};

pub mod http;
pub mod json_path;
pub mod pipeline;
pub mod polling;

pub use http::{build_client, AuthScheme};
pub use pipeline::LoaderPipeline;
pub use polling::{poll_until_done, PollOutcome, PollingTranscriber, DEFAULT_POLL_INTERVAL};

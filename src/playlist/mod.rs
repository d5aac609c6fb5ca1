pub mod builder;
pub mod report;
pub mod resolver;

pub use builder::{AbortReason, PlaylistBuilder, RunOutcome};
pub use report::{FailedLookup, RunReport};
pub use resolver::TrackResolver;

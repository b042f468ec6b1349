// Remote data collaborators: the fixture feed and the weather forecast API.
//
// Nothing here knows about fatigue; callers hand the fetched records to
// travelcast-core.

pub mod error;
pub mod fixtures;
pub mod weather;

pub use error::FeedError;

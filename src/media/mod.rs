pub mod events;
pub mod media_endpoint;
pub mod media_error;
pub(crate) mod media_worker;

pub use events::{ControlCommand, WorkerReply};
pub use media_endpoint::MediaEndpoint;
pub use media_error::MediaError;

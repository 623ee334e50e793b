pub mod channel;
pub mod error;
pub mod pending;
pub mod traits;
pub mod types;

pub use channel::{DynRecordSink, RegistrationChannel};
pub use error::IngestError;
pub use pending::PendingBuffer;
pub use traits::RecordSink;
pub use types::{Delivery, DrainReport};

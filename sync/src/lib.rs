//! Client core of the class routine system: a local mirror of the server's
//! record collections, a coordinator that applies mutations optimistically
//! and reconciles them with the store, and the broadcast fan-out that keeps
//! notifications in step with class changes.

mod coordinator;
mod error;
mod fanout;
mod mirror;
mod remote;
pub mod validate;

pub use coordinator::{NewClassFields, SyncCoordinator};
pub use error::{Field, RemoteError, SyncError};
pub use fanout::{broadcast_class_event, ClassEvent, Schedule};
pub use mirror::{is_local_id, LocalMirror, MirrorData};
pub use remote::{Account, HttpRecordService, RecordService, Role, DEFAULT_API_BASE};

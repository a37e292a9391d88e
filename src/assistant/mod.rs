//! The front-end session: command routing, local features and voice glue.

pub mod backend;
pub mod context;
pub mod frontend;
pub mod plan;
pub mod router;
pub mod session;
pub mod storage;
pub mod tasks;
pub mod timer;
pub mod transcript;
pub mod voice;

pub use backend::ChatBackend;
pub use context::{Assistant, Effect, SessionSnapshot};
pub use frontend::{Frontend, NullFrontend};
pub use plan::PlanStore;
pub use router::{classify, Command, TaskCommand, TimerCommand};
pub use session::{SessionEvent, SessionHandle};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SharedStore};
pub use tasks::{Task, TaskStore};
pub use timer::{FocusTimer, TimerState};
pub use transcript::{Sender, TranscriptEntry};
pub use voice::{Listener, SilentSpeaker, Speaker};

pub mod assignment;
pub mod locks;
pub mod projector;
pub mod queue;
pub mod transition;

pub use assignment::{QueueAssignmentEngine, RECOMPUTE_SLOT_MINUTES};
pub use locks::PartitionLocks;
pub use projector::QueueInfoProjector;
pub use queue::QueueService;
pub use transition::StatusTransitionValidator;

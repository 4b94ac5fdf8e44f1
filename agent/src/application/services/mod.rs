pub mod lifecycle;
pub mod locks;

pub use lifecycle::LifecycleDriver;
pub use locks::{WorkloadGuard, WorkloadLocks};

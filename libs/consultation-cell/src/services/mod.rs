pub mod lifecycle;
pub mod store;

pub use lifecycle::ConsultationLifecycle;
pub use store::ConsultationStore;

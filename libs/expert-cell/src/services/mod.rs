pub mod directory;
pub mod availability;

pub use directory::ExpertDirectory;
pub use availability::time_slots_for;

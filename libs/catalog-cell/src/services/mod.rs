pub mod catalog;
pub mod slots;

pub use catalog::{ProviderCatalog, StaticCatalog};
pub use slots::TimeSlotService;

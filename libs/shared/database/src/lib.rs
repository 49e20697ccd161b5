pub mod file;
pub mod memory;
mod state;
pub mod store;

pub use file::JsonFileAppointmentStore;
pub use memory::InMemoryAppointmentStore;
pub use store::{AppointmentStore, StoreError};

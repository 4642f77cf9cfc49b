pub mod controller;
pub mod state;

pub use controller::{InspectionController, SubmitError};
pub use state::{SessionState, SharedSession};

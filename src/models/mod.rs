pub mod inspection;
pub mod reading;

pub use inspection::{
    generate_package_id, InspectionRecord, InspectionStats, InspectionStatus, NewInspection,
};
pub use reading::SensorReading;

pub mod person_ops;
pub mod group_ops;
pub mod homework_ops;
pub mod attendance_ops;
pub mod consultation_ops;

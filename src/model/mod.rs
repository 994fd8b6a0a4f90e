pub mod ids;
pub mod person;
pub mod group;
pub mod consultation;
pub mod homework;
pub mod attendance;

// Re-exports for convenience
pub use ids::{Id, IdFormat};
pub use person::{Nusnetid, Person};
pub use group::{Group, GroupId};
pub use consultation::{Consultation, ConsultationKey};
pub use homework::{Homework, HomeworkStatus, HomeworkTracker};
pub use attendance::{Attendance, AttendanceSheet, AttendanceStatus};

pub mod enums;
pub mod log;
pub mod report;
pub mod show;
pub mod venue;

pub use enums::{Category, Region, SeatGrade, ShowState};
pub use log::{LogEntry, LogSearch, NewLogEntry};
pub use report::{CreatedAtRange, NewReport, Report, ReportSearch};
pub use show::{
    FullShowDetail, FullShowDetailRow, HallSummary, NewPrice, NewSchedule, NewSeat, NewShowDetail,
    PriceBySeatClass, PriceEntry, ScheduleEntry, Seat, SeatEntry, ShowDetail, ShowRegistration,
    ShowSchedule,
};
pub use venue::{Hall, Theater, TheaterSearch};

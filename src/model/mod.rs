//! Types that represent the core data model, such as `DayRecord` and `MonthRecord`.
pub mod calc;
mod day;
mod month;
pub mod norms;
mod volume;

pub use day::{DayInput, DayRecord};
pub use month::{MonthId, MonthRecord};
pub use volume::{Volume, VolumeFormat};

//! Calendar helpers: ROC (Minguo) era conversion and Gregorian month arithmetic.

pub mod month;
pub mod roc;

pub use month::{days_in_month, is_leap_year, month_first_day, month_last_day, year_bounds};
pub use roc::{parse_roc_date, to_gregorian, RocDate, ROC_ERA_OFFSET};

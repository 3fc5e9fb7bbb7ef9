//! Assignment stages: home/away roles, season calendar, and weekly
//! fixture placement.

mod calendar;
mod home_away;
mod weekly;

pub use calendar::build_weeks;
pub use home_away::HomeAwayAssigner;
pub use weekly::WeeklyAssigner;

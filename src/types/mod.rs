pub mod condition;
pub mod day_section;
pub mod observation;

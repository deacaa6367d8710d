pub mod golden_section;
pub mod time_of_flight;

pub mod raw;
pub mod region;
pub mod vacancy;

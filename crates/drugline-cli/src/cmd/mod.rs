pub mod extract;
pub mod generate;
pub mod lookup;
pub mod report;

pub mod lead;
pub mod scan;

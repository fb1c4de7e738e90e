pub mod regions;
pub mod stats;

pub mod bounds;
pub mod district;
pub mod features;
pub mod regions;
pub mod stats;

pub mod analysis;
pub mod company;

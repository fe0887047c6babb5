pub mod health;
pub mod owners;
pub mod pets;
pub mod pricing;
pub mod visits;

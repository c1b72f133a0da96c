pub mod fixture;
pub mod geoportal;

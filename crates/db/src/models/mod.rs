pub mod expert;
pub mod sme;

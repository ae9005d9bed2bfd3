pub mod gdrive;
pub mod validation;

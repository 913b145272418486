pub mod dates;
pub mod error;
pub mod id;
pub mod pagination;
pub mod tax_id;
pub mod validation;

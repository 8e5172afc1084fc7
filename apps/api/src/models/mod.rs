pub mod office;
pub mod record;

pub mod column_type;
pub mod csv;
pub mod mapping;
pub mod wizard;

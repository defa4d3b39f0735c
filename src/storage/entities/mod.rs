pub mod prelude;

pub mod attendances;
pub mod employees;

pub use super::attendances::Entity as Attendances;
pub use super::employees::Entity as Employees;

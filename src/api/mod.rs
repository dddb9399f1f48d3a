pub mod adjustment;
pub mod attendance;
pub mod department;
pub mod employee;
pub mod hold;
pub mod payroll;
pub mod position;
pub mod shift;

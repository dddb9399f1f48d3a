pub mod adjustment;
pub mod attendance;
pub mod bracket;
pub mod department;
pub mod employee;
pub mod payroll;
pub mod position;
pub mod salary_hold;
pub mod shift;

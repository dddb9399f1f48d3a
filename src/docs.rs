use crate::api::adjustment::{
    AdjustmentListResponse, AdjustmentQuery, CreateAdjustment, ResolveAdjustment,
};
use crate::api::attendance::{AttendanceListResponse, AttendanceQuery, ClockRequest};
use crate::api::department::{CreateDepartment, DepartmentListResponse};
use crate::api::employee::{CreateEmployee, EmployeeListResponse, EmployeeQuery, UpdateEmployee};
use crate::api::hold::{CreateHold, HoldListResponse, HoldQuery, ReleaseHold};
use crate::api::payroll::{
    AppendPayrollNote, PaginatedPayrollResponse, PayrollQuery, PreviewPayrolls, ProcessAllPayrolls,
    ProcessPayroll,
};
use crate::api::position::{CreatePosition, PositionListResponse, UpdatePosition};
use crate::api::shift::{CreateShift, ShiftListResponse};
use crate::config::{LateDeductionMode, PayrollConfig};
use crate::model::adjustment::{AdjustmentKind, AdjustmentStatus, PayrollAdjustment};
use crate::model::attendance::{Attendance, AttendanceStatus};
use crate::model::department::Department;
use crate::model::employee::{Employee, EmployeeStatus};
use crate::model::payroll::Payroll;
use crate::model::position::Position;
use crate::model::salary_hold::{HoldStatus, SalaryHold};
use crate::model::shift::Shift;
use crate::service::payroll::{BatchSummary, PayrollBreakdown};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payroll Management System API",
        version = "1.0.0",
        description = r#"
## HR Payroll Management System

This API powers an HR system for employee records, QR-code attendance and
monthly payroll with Philippine statutory deductions.

### 🔹 Key Features
- **Employee Management**
  - Create, update, list and deactivate employee profiles with generated QR codes
- **Attendance Management**
  - QR clock-in/out with shift-aware lateness detection
- **Payroll Processing**
  - Preview (dry run) and process employee-periods with SSS, PhilHealth and
    Pag-IBIG contributions, attendance deductions and manual adjustments
- **Adjustments & Holds**
  - Pending/approved adjustment ledger and salary hold management

### 📦 Response Format
- JSON-based RESTful responses
- Pagination supported for list endpoints

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::update_employee,
        crate::api::employee::get_employee,
        crate::api::employee::deactivate_employee,
        crate::api::employee::list_employees,

        crate::api::attendance::clock_in,
        crate::api::attendance::clock_out,
        crate::api::attendance::list_attendance,

        crate::api::payroll::process_payroll,
        crate::api::payroll::process_all_payrolls,
        crate::api::payroll::preview_payrolls,
        crate::api::payroll::get_payroll,
        crate::api::payroll::list_payrolls,
        crate::api::payroll::append_payroll_note,

        crate::api::adjustment::create_adjustment,
        crate::api::adjustment::approve_adjustment,
        crate::api::adjustment::reject_adjustment,
        crate::api::adjustment::delete_adjustment,
        crate::api::adjustment::list_adjustments,

        crate::api::hold::create_hold,
        crate::api::hold::release_hold,
        crate::api::hold::delete_hold,
        crate::api::hold::list_holds,

        crate::api::shift::create_shift,
        crate::api::shift::list_shifts,

        crate::api::position::create_position,
        crate::api::position::update_position,
        crate::api::position::list_positions,

        crate::api::department::create_department,
        crate::api::department::list_departments
    ),
    components(
        schemas(
            Employee,
            EmployeeStatus,
            CreateEmployee,
            UpdateEmployee,
            EmployeeQuery,
            EmployeeListResponse,

            Attendance,
            AttendanceStatus,
            ClockRequest,
            AttendanceQuery,
            AttendanceListResponse,

            Payroll,
            PayrollBreakdown,
            BatchSummary,
            PayrollConfig,
            LateDeductionMode,
            ProcessPayroll,
            ProcessAllPayrolls,
            PreviewPayrolls,
            AppendPayrollNote,
            PayrollQuery,
            PaginatedPayrollResponse,

            PayrollAdjustment,
            AdjustmentKind,
            AdjustmentStatus,
            CreateAdjustment,
            ResolveAdjustment,
            AdjustmentQuery,
            AdjustmentListResponse,

            SalaryHold,
            HoldStatus,
            CreateHold,
            ReleaseHold,
            HoldQuery,
            HoldListResponse,

            Shift,
            CreateShift,
            ShiftListResponse,

            Position,
            CreatePosition,
            UpdatePosition,
            PositionListResponse,

            Department,
            CreateDepartment,
            DepartmentListResponse
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "QR attendance APIs"),
        (name = "Payroll", description = "Payroll processing APIs"),
        (name = "Adjustment", description = "Manual adjustment ledger APIs"),
        (name = "Salary Hold", description = "Salary hold APIs"),
        (name = "Shift", description = "Shift management APIs"),
        (name = "Position", description = "Position management APIs"),
        (name = "Department", description = "Department management APIs"),
    )
)]
pub struct ApiDoc;

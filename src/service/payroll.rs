use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::config::{LateDeductionMode, PayrollConfig};
use crate::error::{EngineError, is_unique_violation};
use crate::model::bracket::DeductionType;
use crate::model::employee::Employee;
use crate::model::payroll::Payroll;
use crate::service::{attendance, deductions};
use crate::store;
use crate::store::payrolls::PayrollDraft;
use crate::utils::{bracket_cache, round2};

/// Itemized result of one employee-period computation. `process` persists
/// it; `preview` returns it as-is for the dry run.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PayrollBreakdown {
    pub employee_id: i64,
    pub employee_name: String,
    pub month: u32,
    pub year: i32,
    pub base_salary: f64,
    pub late_count: i64,
    pub absent_count: i64,
    pub attendance_deduction: f64,
    pub sss: f64,
    pub philhealth: f64,
    pub pagibig: f64,
    pub government_total: f64,
    pub adjustment_total: f64,
    pub total_deductions: f64,
    pub net_salary: f64,
    #[schema(nullable = true)]
    pub net_before_floor: Option<f64>,
    pub held: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
    pub payrolls: Vec<Payroll>,
}

fn validate_period(month: u32, year: i32) -> Result<(), EngineError> {
    if !(2000..=2100).contains(&year) {
        return Err(EngineError::Validation(format!(
            "year {} is out of range",
            year
        )));
    }
    attendance::month_bounds(year, month).map(|_| ())
}

/// Derives the itemized pay for one employee-period without persisting
/// anything. Missing reference data degrades to a zero base with a note
/// rather than failing the whole run.
async fn compute(
    pool: &SqlitePool,
    employee: &Employee,
    month: u32,
    year: i32,
    config: &PayrollConfig,
) -> Result<PayrollBreakdown, EngineError> {
    let (from, to) = attendance::month_bounds(year, month)?;
    let mut notes: Vec<String> = Vec::new();

    let base_salary = match store::positions::get_position(pool, employee.position_id).await? {
        Some(position) => position.monthly_salary,
        None => {
            tracing::warn!(
                employee_id = employee.id,
                position_id = employee.position_id,
                "position record missing, using zero base salary"
            );
            notes.push("position record missing; base salary treated as 0".to_string());
            0.0
        }
    };

    let summary = attendance::summarize(pool, employee.id, year, month).await?;

    let attendance_deduction = round2(match config.late_deduction_mode {
        LateDeductionMode::Percent => {
            let daily_rate = base_salary / config.work_days_per_month as f64;
            daily_rate * config.late_rate * summary.late as f64
                + daily_rate * summary.absent as f64
        }
        LateDeductionMode::FixedAmount => {
            config.late_rate * summary.late as f64 + config.absent_rate * summary.absent as f64
        }
    });

    // Contributions are computed on the gross base salary, not the
    // attendance-reduced amount.
    let sss_brackets = bracket_cache::active_brackets(pool, DeductionType::Sss).await?;
    let philhealth_brackets =
        bracket_cache::active_brackets(pool, DeductionType::Philhealth).await?;
    let government = deductions::calculate(base_salary, &sss_brackets, &philhealth_brackets);

    let adjustments =
        store::adjustments::list_approved_adjustments(pool, employee.id, from, to).await?;
    let adjustment_total = round2(adjustments.iter().map(|a| a.amount).sum());

    let held = store::holds::get_active_hold(pool, employee.id).await?.is_some();

    let raw_net =
        base_salary - attendance_deduction - government.total + adjustment_total;
    let (net_salary, net_before_floor) = if raw_net < 0.0 {
        notes.push(format!("net pay floored at zero (was {:.2})", raw_net));
        (0.0, Some(round2(raw_net)))
    } else {
        (round2(raw_net), None)
    };

    Ok(PayrollBreakdown {
        employee_id: employee.id,
        employee_name: employee.full_name.clone(),
        month,
        year,
        base_salary,
        late_count: summary.late,
        absent_count: summary.absent,
        attendance_deduction,
        sss: government.sss,
        philhealth: government.philhealth,
        pagibig: government.pagibig,
        government_total: government.total,
        adjustment_total,
        total_deductions: round2(attendance_deduction + government.total),
        net_salary,
        net_before_floor,
        held,
        notes: if notes.is_empty() {
            None
        } else {
            Some(notes.join("; "))
        },
    })
}

/// Processes one employee-period into a persisted payroll record.
///
/// The pre-check keeps the common double-submission case cheap; the UNIQUE
/// constraint on (employee_id, month, year) is the authoritative guard and
/// its violation maps back to `AlreadyProcessed`.
pub async fn process(
    pool: &SqlitePool,
    employee_id: i64,
    month: u32,
    year: i32,
    config: &PayrollConfig,
    actor_id: i64,
) -> Result<Payroll, EngineError> {
    config.validate()?;
    validate_period(month, year)?;

    if store::payrolls::payroll_exists(pool, employee_id, month, year).await? {
        return Err(EngineError::AlreadyProcessed {
            employee_id,
            month,
            year,
        });
    }

    let employee = store::employees::get_employee(pool, employee_id)
        .await?
        .ok_or(EngineError::MissingReference {
            entity: "employee",
            id: employee_id,
        })?;

    if !employee.is_active() {
        return Err(EngineError::InactiveEmployee(employee_id));
    }

    let breakdown = compute(pool, &employee, month, year, config).await?;

    let draft = PayrollDraft {
        employee_id,
        month,
        year,
        base_salary: breakdown.base_salary,
        late_count: breakdown.late_count,
        absent_count: breakdown.absent_count,
        attendance_deduction: breakdown.attendance_deduction,
        sss: breakdown.sss,
        philhealth: breakdown.philhealth,
        pagibig: breakdown.pagibig,
        government_total: breakdown.government_total,
        adjustment_total: breakdown.adjustment_total,
        total_deductions: breakdown.total_deductions,
        net_salary: breakdown.net_salary,
        net_before_floor: breakdown.net_before_floor,
        held: breakdown.held,
        date_processed: Utc::now(),
        processed_by: Some(actor_id),
        notes: breakdown.notes,
    };

    let payroll = match store::payrolls::insert_payroll(pool, &draft).await {
        Ok(payroll) => payroll,
        Err(e) if is_unique_violation(&e) => {
            return Err(EngineError::AlreadyProcessed {
                employee_id,
                month,
                year,
            });
        }
        Err(e) => return Err(e.into()),
    };

    let (from, to) = attendance::month_bounds(year, month)?;
    store::adjustments::bind_adjustments_to_payroll(pool, payroll.id, employee_id, from, to)
        .await?;

    tracing::info!(
        employee_id,
        month,
        year,
        net_salary = payroll.net_salary,
        held = payroll.held,
        "payroll processed"
    );

    Ok(payroll)
}

/// Dry run for the review step before processing: computes every breakdown,
/// persists nothing. Unknown and inactive employees are skipped with a log
/// line rather than failing the batch.
pub async fn preview(
    pool: &SqlitePool,
    employee_ids: &[i64],
    month: u32,
    year: i32,
    config: &PayrollConfig,
) -> Result<Vec<PayrollBreakdown>, EngineError> {
    config.validate()?;
    validate_period(month, year)?;

    let computations = employee_ids
        .iter()
        .map(|&employee_id| preview_one(pool, employee_id, month, year, config));

    futures::future::join_all(computations)
        .await
        .into_iter()
        .filter_map(Result::transpose)
        .collect()
}

async fn preview_one(
    pool: &SqlitePool,
    employee_id: i64,
    month: u32,
    year: i32,
    config: &PayrollConfig,
) -> Result<Option<PayrollBreakdown>, EngineError> {
    let Some(employee) = store::employees::get_employee(pool, employee_id).await? else {
        tracing::warn!(employee_id, "unknown employee skipped in preview");
        return Ok(None);
    };

    if !employee.is_active() {
        tracing::warn!(employee_id, "inactive employee skipped in preview");
        return Ok(None);
    }

    compute(pool, &employee, month, year, config).await.map(Some)
}

/// Processes every active employee for the period. Employees whose period
/// was already processed are counted as skipped, not errors.
pub async fn process_all(
    pool: &SqlitePool,
    month: u32,
    year: i32,
    config: &PayrollConfig,
    actor_id: i64,
) -> Result<BatchSummary, EngineError> {
    config.validate()?;
    validate_period(month, year)?;

    let employees = store::employees::list_active_employees(pool).await?;

    let mut payrolls = Vec::new();
    let mut skipped = 0usize;

    for employee in &employees {
        match process(pool, employee.id, month, year, config, actor_id).await {
            Ok(payroll) => payrolls.push(payroll),
            Err(EngineError::AlreadyProcessed { .. }) => {
                tracing::info!(employee_id = employee.id, month, year, "already processed, skipping");
                skipped += 1;
            }
            Err(EngineError::InactiveEmployee(_)) => {
                // deactivated between the listing and the processing loop
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(BatchSummary {
        processed: payrolls.len(),
        skipped,
        payrolls,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::adjustment::AdjustmentKind;
    use crate::service::ledger;
    use crate::service::testutil::*;
    use chrono::{Datelike, NaiveDate};

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn approx(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 0.005
    }

    /// Base salary 16,000, June 2024 (20 working days), 19 days attended of
    /// which 2 late: late_count = 2, absent_count = 1.
    async fn seed_standard_employee(pool: &sqlx::SqlitePool, qr: &str) -> i64 {
        let dept = seed_department(pool, &format!("Dept {}", qr)).await;
        let position = seed_position(pool, dept, 16000.0).await;
        let employee = seed_employee(pool, dept, position, None, qr, "active").await;

        let mut attended = 0;
        let mut day = d(2024, 6, 1);
        while day <= d(2024, 6, 30) && attended < 19 {
            if !crate::service::attendance::REST_DAYS.contains(&day.weekday()) {
                let status = if attended < 2 { "late" } else { "ontime" };
                seed_attendance(pool, employee, day, status).await;
                attended += 1;
            }
            day = day.succ_opt().unwrap();
        }

        employee
    }

    #[actix_web::test]
    async fn percent_mode_end_to_end() {
        let pool = test_pool().await;
        let employee = seed_standard_employee(&pool, "QR-E2E").await;

        let payroll = process(&pool, employee, 6, 2024, &PayrollConfig::default(), 99)
            .await
            .unwrap();

        assert_eq!(payroll.base_salary, 16000.0);
        assert_eq!(payroll.late_count, 2);
        assert_eq!(payroll.absent_count, 1);

        // daily = 16000/22 = 727.27..; 2 lates at 5% of a day + 1 full day
        let daily = 16000.0 / 22.0;
        let expected_attendance = daily * 0.05 * 2.0 + daily * 1.0;
        assert!(approx(payroll.attendance_deduction, round2(expected_attendance)));
        assert!(approx(payroll.attendance_deduction, 800.0));

        // seeded brackets: SSS 675, PhilHealth 2% formula, Pag-IBIG capped
        assert_eq!(payroll.sss, 675.0);
        assert_eq!(payroll.philhealth, 320.0);
        assert_eq!(payroll.pagibig, 100.0);
        assert_eq!(payroll.government_total, 1095.0);

        let expected_net = 16000.0 - payroll.attendance_deduction - 1095.0;
        assert!(approx(payroll.net_salary, round2(expected_net)));
        assert_eq!(payroll.net_before_floor, None);
        assert!(!payroll.held);
        assert_eq!(payroll.processed_by, Some(99));
    }

    #[actix_web::test]
    async fn fixed_amount_mode_uses_flat_rates() {
        let pool = test_pool().await;
        let employee = seed_standard_employee(&pool, "QR-FIXED").await;

        let config = PayrollConfig {
            late_deduction_mode: LateDeductionMode::FixedAmount,
            late_rate: 50.0,
            absent_rate: 200.0,
            work_days_per_month: 22,
        };

        let payroll = process(&pool, employee, 6, 2024, &config, 99).await.unwrap();

        // 2 lates at 50 + 1 absence at 200
        assert_eq!(payroll.attendance_deduction, 300.0);
    }

    #[actix_web::test]
    async fn processing_twice_is_rejected_and_inserts_once() {
        let pool = test_pool().await;
        let employee = seed_standard_employee(&pool, "QR-IDEM").await;
        let config = PayrollConfig::default();

        process(&pool, employee, 6, 2024, &config, 99).await.unwrap();

        let second = process(&pool, employee, 6, 2024, &config, 99).await;
        assert!(matches!(second, Err(EngineError::AlreadyProcessed { .. })));

        let rows = store::payrolls::count_payrolls_for_period(&pool, employee, 6, 2024)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[actix_web::test]
    async fn inactive_employee_is_a_hard_error() {
        let pool = test_pool().await;
        let dept = seed_department(&pool, "Operations").await;
        let position = seed_position(&pool, dept, 16000.0).await;
        let employee = seed_employee(&pool, dept, position, None, "QR-INACTIVE", "inactive").await;

        let result = process(&pool, employee, 6, 2024, &PayrollConfig::default(), 99).await;
        assert!(matches!(result, Err(EngineError::InactiveEmployee(_))));
    }

    #[actix_web::test]
    async fn unknown_employee_is_missing_reference() {
        let pool = test_pool().await;
        let result = process(&pool, 4242, 6, 2024, &PayrollConfig::default(), 99).await;
        assert!(matches!(
            result,
            Err(EngineError::MissingReference { entity: "employee", .. })
        ));
    }

    #[actix_web::test]
    async fn approved_adjustments_net_against_each_other() {
        let pool = test_pool().await;
        let dept = seed_department(&pool, "Adjustment Dept").await;
        let position = seed_position(&pool, dept, 16000.0).await;
        let employee = seed_employee(&pool, dept, position, None, "QR-ADJ", "active").await;

        // adjustments are stamped with the current time, so the processed
        // period must be the current month for the window to pick them up
        let today = Utc::now();
        let (month, year) = (today.month(), today.year());

        let bonus = ledger::apply_adjustment(
            &pool,
            ledger::NewAdjustment {
                employee_id: employee,
                kind: AdjustmentKind::Bonus,
                amount: 1000.0,
                reason: "Quarterly performance bonus".to_string(),
                actor_id: 1,
            },
        )
        .await
        .unwrap();
        ledger::approve_adjustment(&pool, bonus.id, 2).await.unwrap();

        let deduction = ledger::apply_adjustment(
            &pool,
            ledger::NewAdjustment {
                employee_id: employee,
                kind: AdjustmentKind::Deduction,
                amount: 500.0,
                reason: "Uniform damage".to_string(),
                actor_id: 1,
            },
        )
        .await
        .unwrap();
        ledger::approve_adjustment(&pool, deduction.id, 2).await.unwrap();

        // pending entries contribute nothing
        ledger::apply_adjustment(
            &pool,
            ledger::NewAdjustment {
                employee_id: employee,
                kind: AdjustmentKind::Bonus,
                amount: 99999.0,
                reason: "Should not count".to_string(),
                actor_id: 1,
            },
        )
        .await
        .unwrap();

        let without = preview(&pool, &[employee], month, year, &PayrollConfig::default())
            .await
            .unwrap();
        assert_eq!(without[0].adjustment_total, 500.0);

        let payroll = process(&pool, employee, month, year, &PayrollConfig::default(), 99)
            .await
            .unwrap();
        assert_eq!(payroll.adjustment_total, 500.0);

        // approved entries are now linked to the payroll record
        let linked = store::adjustments::get_adjustment(&pool, bonus.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(linked.payroll_id, Some(payroll.id));
    }

    #[actix_web::test]
    async fn active_hold_flags_without_changing_net() {
        let pool = test_pool().await;
        let held_employee = seed_standard_employee(&pool, "QR-HELD").await;
        let free_employee = seed_standard_employee(&pool, "QR-FREE").await;

        ledger::hold_salary(&pool, held_employee, "Pending clearance", 1)
            .await
            .unwrap();

        let config = PayrollConfig::default();
        let held = process(&pool, held_employee, 6, 2024, &config, 99).await.unwrap();
        let free = process(&pool, free_employee, 6, 2024, &config, 99).await.unwrap();

        assert!(held.held);
        assert!(!free.held);
        assert_eq!(held.net_salary, free.net_salary);
    }

    #[actix_web::test]
    async fn net_pay_floors_at_zero_and_records_the_overflow() {
        let pool = test_pool().await;
        let dept = seed_department(&pool, "Operations").await;
        let position = seed_position(&pool, dept, 1000.0).await;
        let employee = seed_employee(&pool, dept, position, None, "QR-FLOOR", "active").await;

        let adjustment = ledger::apply_adjustment(
            &pool,
            ledger::NewAdjustment {
                employee_id: employee,
                kind: AdjustmentKind::Deduction,
                amount: 5000.0,
                reason: "Equipment loss recovery".to_string(),
                actor_id: 1,
            },
        )
        .await
        .unwrap();
        ledger::approve_adjustment(&pool, adjustment.id, 2).await.unwrap();

        // current period so the freshly stamped adjustment falls in window
        let today = Utc::now();
        let payroll = process(
            &pool,
            employee,
            today.month(),
            today.year(),
            &PayrollConfig::default(),
            99,
        )
        .await
        .unwrap();

        assert_eq!(payroll.net_salary, 0.0);
        let before = payroll.net_before_floor.expect("pre-floor net recorded");
        assert!(before < 0.0);
        assert!(payroll.notes.unwrap_or_default().contains("floored"));
    }

    #[actix_web::test]
    async fn missing_position_degrades_to_zero_base() {
        let pool = test_pool().await;
        let dept = seed_department(&pool, "Operations").await;
        // dangling position reference: relax FK enforcement (single pooled
        // connection) just long enough to seed the orphaned row.
        sqlx::query("PRAGMA foreign_keys = OFF")
            .execute(&pool)
            .await
            .unwrap();
        let employee = seed_employee(&pool, dept, 4242, None, "QR-NOPOS", "active").await;
        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await
            .unwrap();

        let payroll = process(&pool, employee, 6, 2024, &PayrollConfig::default(), 99)
            .await
            .unwrap();

        assert_eq!(payroll.base_salary, 0.0);
        assert_eq!(payroll.net_salary, 0.0);
        assert!(payroll.notes.unwrap_or_default().contains("position"));
    }

    #[actix_web::test]
    async fn preview_persists_nothing_and_skips_inactive() {
        let pool = test_pool().await;
        let active = seed_standard_employee(&pool, "QR-PRE-A").await;
        let dept = seed_department(&pool, "Preview Dept").await;
        let position = seed_position(&pool, dept, 16000.0).await;
        let inactive =
            seed_employee(&pool, dept, position, None, "QR-PRE-I", "inactive").await;

        let previews = preview(
            &pool,
            &[active, inactive, 4242],
            6,
            2024,
            &PayrollConfig::default(),
        )
        .await
        .unwrap();

        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].employee_id, active);

        let rows = store::payrolls::count_payrolls_for_period(&pool, active, 6, 2024)
            .await
            .unwrap();
        assert_eq!(rows, 0);
    }

    #[actix_web::test]
    async fn process_all_skips_processed_periods() {
        let pool = test_pool().await;
        let first = seed_standard_employee(&pool, "QR-ALL-1").await;
        let _second = seed_standard_employee(&pool, "QR-ALL-2").await;
        let config = PayrollConfig::default();

        process(&pool, first, 6, 2024, &config, 99).await.unwrap();

        let summary = process_all(&pool, 6, 2024, &config, 99).await.unwrap();
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped, 1);
    }

    #[actix_web::test]
    async fn invalid_period_and_config_are_rejected() {
        let pool = test_pool().await;
        let employee = seed_standard_employee(&pool, "QR-VAL").await;

        let bad_month = process(&pool, employee, 13, 2024, &PayrollConfig::default(), 99).await;
        assert!(matches!(bad_month, Err(EngineError::Validation(_))));

        let bad_config = PayrollConfig {
            work_days_per_month: 0,
            ..Default::default()
        };
        let result = process(&pool, employee, 6, 2024, &bad_config, 99).await;
        assert!(matches!(result, Err(EngineError::Validation(_))));
    }
}

use chrono::{Datelike, Utc};
use sqlx::SqlitePool;

use crate::error::{EngineError, is_unique_violation};
use crate::model::adjustment::{AdjustmentKind, AdjustmentStatus, PayrollAdjustment};
use crate::model::salary_hold::{HoldStatus, SalaryHold};
use crate::store;

#[derive(Debug, Clone)]
pub struct NewAdjustment {
    pub employee_id: i64,
    pub kind: AdjustmentKind,
    pub amount: f64,
    pub reason: String,
    pub actor_id: i64,
}

/// Records a pending adjustment. The entered amount is normalized to the
/// ledger sign convention (deductions negative) regardless of input sign.
pub async fn apply_adjustment(
    pool: &SqlitePool,
    new: NewAdjustment,
) -> Result<PayrollAdjustment, EngineError> {
    if new.amount == 0.0 || !new.amount.is_finite() {
        return Err(EngineError::Validation(
            "adjustment amount must be a non-zero number".to_string(),
        ));
    }
    let reason = new.reason.trim();
    if reason.is_empty() {
        return Err(EngineError::Validation(
            "adjustment reason is required".to_string(),
        ));
    }

    let employee = store::employees::get_employee(pool, new.employee_id)
        .await?
        .ok_or(EngineError::MissingReference {
            entity: "employee",
            id: new.employee_id,
        })?;

    let amount = new.kind.signed_amount(new.amount);

    let adjustment = store::adjustments::insert_adjustment(
        pool,
        employee.id,
        new.kind,
        amount,
        reason,
        new.actor_id,
        Utc::now(),
    )
    .await?;

    tracing::info!(
        adjustment_id = adjustment.id,
        employee_id = employee.id,
        kind = %new.kind,
        amount,
        "adjustment recorded"
    );

    Ok(adjustment)
}

/// `pending -> approved`. The approver must differ from the creator. If the
/// period was already processed, the entry is linked to that payroll record.
pub async fn approve_adjustment(
    pool: &SqlitePool,
    id: i64,
    approver_id: i64,
) -> Result<PayrollAdjustment, EngineError> {
    let adjustment = store::adjustments::get_adjustment(pool, id)
        .await?
        .ok_or(EngineError::MissingReference {
            entity: "adjustment",
            id,
        })?;

    if adjustment.status != AdjustmentStatus::Pending {
        return Err(EngineError::Validation(format!(
            "adjustment {} is already {}",
            id, adjustment.status
        )));
    }
    if adjustment.added_by == approver_id {
        return Err(EngineError::Validation(
            "adjustments must be approved by someone other than the creator".to_string(),
        ));
    }

    let now = Utc::now();
    let affected =
        store::adjustments::resolve_adjustment(pool, id, AdjustmentStatus::Approved, approver_id, now)
            .await?;
    if affected == 0 {
        return Err(EngineError::Validation(format!(
            "adjustment {} is no longer pending",
            id
        )));
    }

    let mut payroll_id = None;
    let period = adjustment.date_added;
    if let Some(payroll) = store::payrolls::get_payroll_for_period(
        pool,
        adjustment.employee_id,
        period.month(),
        period.year(),
    )
    .await?
    {
        store::adjustments::set_payroll_link(pool, id, payroll.id).await?;
        payroll_id = Some(payroll.id);
    }

    Ok(PayrollAdjustment {
        status: AdjustmentStatus::Approved,
        approved_by: Some(approver_id),
        date_resolved: Some(now),
        payroll_id,
        ..adjustment
    })
}

/// `pending -> rejected`. Rejected entries never contribute to net pay.
pub async fn reject_adjustment(
    pool: &SqlitePool,
    id: i64,
    actor_id: i64,
) -> Result<PayrollAdjustment, EngineError> {
    let adjustment = store::adjustments::get_adjustment(pool, id)
        .await?
        .ok_or(EngineError::MissingReference {
            entity: "adjustment",
            id,
        })?;

    if adjustment.status != AdjustmentStatus::Pending {
        return Err(EngineError::Validation(format!(
            "adjustment {} is already {}",
            id, adjustment.status
        )));
    }

    let now = Utc::now();
    let affected =
        store::adjustments::resolve_adjustment(pool, id, AdjustmentStatus::Rejected, actor_id, now)
            .await?;
    if affected == 0 {
        return Err(EngineError::Validation(format!(
            "adjustment {} is no longer pending",
            id
        )));
    }

    Ok(PayrollAdjustment {
        status: AdjustmentStatus::Rejected,
        approved_by: Some(actor_id),
        date_resolved: Some(now),
        ..adjustment
    })
}

/// Terminal entries stay in the ledger; only pending ones may be deleted.
pub async fn delete_adjustment(pool: &SqlitePool, id: i64) -> Result<(), EngineError> {
    let adjustment = store::adjustments::get_adjustment(pool, id)
        .await?
        .ok_or(EngineError::MissingReference {
            entity: "adjustment",
            id,
        })?;

    if adjustment.status != AdjustmentStatus::Pending {
        return Err(EngineError::Validation(
            "only pending adjustments can be deleted".to_string(),
        ));
    }

    store::adjustments::delete_pending_adjustment(pool, id).await?;
    Ok(())
}

/// Places an active hold. The application check keeps the common path clean;
/// the partial unique index catches the double-submission race.
pub async fn hold_salary(
    pool: &SqlitePool,
    employee_id: i64,
    reason: &str,
    actor_id: i64,
) -> Result<SalaryHold, EngineError> {
    if reason.trim().is_empty() {
        return Err(EngineError::Validation("hold reason is required".to_string()));
    }

    let employee = store::employees::get_employee(pool, employee_id)
        .await?
        .ok_or(EngineError::MissingReference {
            entity: "employee",
            id: employee_id,
        })?;

    if store::holds::get_active_hold(pool, employee.id).await?.is_some() {
        return Err(EngineError::DuplicateHold(employee.id));
    }

    match store::holds::insert_hold(pool, employee.id, reason.trim(), actor_id, Utc::now()).await {
        Ok(hold) => {
            tracing::info!(hold_id = hold.id, employee_id, "salary hold placed");
            Ok(hold)
        }
        Err(e) if is_unique_violation(&e) => Err(EngineError::DuplicateHold(employee.id)),
        Err(e) => Err(e.into()),
    }
}

/// `active -> released`.
pub async fn release_hold(
    pool: &SqlitePool,
    hold_id: i64,
    actor_id: i64,
) -> Result<SalaryHold, EngineError> {
    let hold = store::holds::get_hold(pool, hold_id)
        .await?
        .ok_or(EngineError::MissingReference {
            entity: "salary hold",
            id: hold_id,
        })?;

    if hold.status != HoldStatus::Active {
        return Err(EngineError::Validation(format!(
            "hold {} is already released",
            hold_id
        )));
    }

    let now = Utc::now();
    let affected = store::holds::release_hold(pool, hold_id, actor_id, now).await?;
    if affected == 0 {
        return Err(EngineError::Validation(format!(
            "hold {} is no longer active",
            hold_id
        )));
    }

    tracing::info!(hold_id, employee_id = hold.employee_id, "salary hold released");

    Ok(SalaryHold {
        status: HoldStatus::Released,
        released_by: Some(actor_id),
        release_date: Some(now),
        ..hold
    })
}

/// Active holds may be removed, but only within the grace window after
/// creation; anything older must be released instead to keep the trail.
pub async fn delete_hold(pool: &SqlitePool, hold_id: i64) -> Result<(), EngineError> {
    let hold = store::holds::get_hold(pool, hold_id)
        .await?
        .ok_or(EngineError::MissingReference {
            entity: "salary hold",
            id: hold_id,
        })?;

    if hold.status != HoldStatus::Active {
        return Err(EngineError::Validation(
            "only active holds can be deleted".to_string(),
        ));
    }
    if !hold.within_deletion_grace(Utc::now()) {
        return Err(EngineError::Validation(
            "the deletion window for this hold has passed; release it instead".to_string(),
        ));
    }

    store::holds::delete_hold(pool, hold_id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testutil::*;
    use chrono::Duration;

    async fn seed_one_employee(pool: &SqlitePool, qr: &str) -> i64 {
        let dept = seed_department(pool, &format!("Dept {}", qr)).await;
        let position = seed_position(pool, dept, 16000.0).await;
        seed_employee(pool, dept, position, None, qr, "active").await
    }

    fn bonus(employee_id: i64, amount: f64, actor_id: i64) -> NewAdjustment {
        NewAdjustment {
            employee_id,
            kind: AdjustmentKind::Bonus,
            amount,
            reason: "Performance bonus".to_string(),
            actor_id,
        }
    }

    #[actix_web::test]
    async fn deduction_amount_is_normalized_negative() {
        let pool = test_pool().await;
        let employee = seed_one_employee(&pool, "QR-1").await;

        let adjustment = apply_adjustment(
            &pool,
            NewAdjustment {
                employee_id: employee,
                kind: AdjustmentKind::Deduction,
                amount: 500.0,
                reason: "Uniform damage".to_string(),
                actor_id: 1,
            },
        )
        .await
        .unwrap();

        assert_eq!(adjustment.amount, -500.0);
        assert_eq!(adjustment.status, AdjustmentStatus::Pending);
    }

    #[actix_web::test]
    async fn zero_amount_and_blank_reason_are_rejected() {
        let pool = test_pool().await;
        let employee = seed_one_employee(&pool, "QR-1").await;

        let zero = apply_adjustment(&pool, bonus(employee, 0.0, 1)).await;
        assert!(matches!(zero, Err(EngineError::Validation(_))));

        let blank = apply_adjustment(
            &pool,
            NewAdjustment {
                employee_id: employee,
                kind: AdjustmentKind::Bonus,
                amount: 100.0,
                reason: "   ".to_string(),
                actor_id: 1,
            },
        )
        .await;
        assert!(matches!(blank, Err(EngineError::Validation(_))));
    }

    #[actix_web::test]
    async fn creator_cannot_approve_own_adjustment() {
        let pool = test_pool().await;
        let employee = seed_one_employee(&pool, "QR-1").await;

        let adjustment = apply_adjustment(&pool, bonus(employee, 1000.0, 7)).await.unwrap();

        let self_approve = approve_adjustment(&pool, adjustment.id, 7).await;
        assert!(matches!(self_approve, Err(EngineError::Validation(_))));

        let approved = approve_adjustment(&pool, adjustment.id, 8).await.unwrap();
        assert_eq!(approved.status, AdjustmentStatus::Approved);
        assert_eq!(approved.approved_by, Some(8));
    }

    #[actix_web::test]
    async fn terminal_adjustments_are_immutable() {
        let pool = test_pool().await;
        let employee = seed_one_employee(&pool, "QR-1").await;

        let adjustment = apply_adjustment(&pool, bonus(employee, 1000.0, 7)).await.unwrap();
        approve_adjustment(&pool, adjustment.id, 8).await.unwrap();

        let again = approve_adjustment(&pool, adjustment.id, 9).await;
        assert!(matches!(again, Err(EngineError::Validation(_))));

        let reject = reject_adjustment(&pool, adjustment.id, 9).await;
        assert!(matches!(reject, Err(EngineError::Validation(_))));

        let delete = delete_adjustment(&pool, adjustment.id).await;
        assert!(matches!(delete, Err(EngineError::Validation(_))));
    }

    #[actix_web::test]
    async fn pending_adjustments_can_be_deleted() {
        let pool = test_pool().await;
        let employee = seed_one_employee(&pool, "QR-1").await;

        let adjustment = apply_adjustment(&pool, bonus(employee, 1000.0, 7)).await.unwrap();
        delete_adjustment(&pool, adjustment.id).await.unwrap();

        let gone = store::adjustments::get_adjustment(&pool, adjustment.id)
            .await
            .unwrap();
        assert!(gone.is_none());
    }

    #[actix_web::test]
    async fn rejected_adjustments_keep_their_row() {
        let pool = test_pool().await;
        let employee = seed_one_employee(&pool, "QR-1").await;

        let adjustment = apply_adjustment(&pool, bonus(employee, 1000.0, 7)).await.unwrap();
        let rejected = reject_adjustment(&pool, adjustment.id, 8).await.unwrap();
        assert_eq!(rejected.status, AdjustmentStatus::Rejected);

        let row = store::adjustments::get_adjustment(&pool, adjustment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.status, AdjustmentStatus::Rejected);
    }

    #[actix_web::test]
    async fn second_active_hold_is_rejected() {
        let pool = test_pool().await;
        let employee = seed_one_employee(&pool, "QR-1").await;

        hold_salary(&pool, employee, "Pending clearance", 1).await.unwrap();

        let duplicate = hold_salary(&pool, employee, "Another reason", 2).await;
        assert!(matches!(duplicate, Err(EngineError::DuplicateHold(_))));
    }

    #[actix_web::test]
    async fn released_hold_allows_a_new_one() {
        let pool = test_pool().await;
        let employee = seed_one_employee(&pool, "QR-1").await;

        let hold = hold_salary(&pool, employee, "Pending clearance", 1).await.unwrap();
        let released = release_hold(&pool, hold.id, 2).await.unwrap();
        assert_eq!(released.status, HoldStatus::Released);
        assert_eq!(released.released_by, Some(2));

        let again = release_hold(&pool, hold.id, 2).await;
        assert!(matches!(again, Err(EngineError::Validation(_))));

        hold_salary(&pool, employee, "New issue", 1).await.unwrap();
    }

    #[actix_web::test]
    async fn fresh_hold_deletes_within_grace_window() {
        let pool = test_pool().await;
        let employee = seed_one_employee(&pool, "QR-1").await;

        let hold = hold_salary(&pool, employee, "Mistaken entry", 1).await.unwrap();
        delete_hold(&pool, hold.id).await.unwrap();

        let gone = store::holds::get_hold(&pool, hold.id).await.unwrap();
        assert!(gone.is_none());
    }

    #[actix_web::test]
    async fn stale_hold_cannot_be_deleted() {
        let pool = test_pool().await;
        let employee = seed_one_employee(&pool, "QR-1").await;

        // created 25 hours ago, outside the 24-hour grace window
        let stale = store::holds::insert_hold(
            &pool,
            employee,
            "Old hold",
            1,
            Utc::now() - Duration::hours(25),
        )
        .await
        .unwrap();

        let result = delete_hold(&pool, stale.id).await;
        assert!(matches!(result, Err(EngineError::Validation(_))));

        // still releasable
        release_hold(&pool, stale.id, 2).await.unwrap();
    }
}

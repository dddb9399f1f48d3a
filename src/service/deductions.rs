use serde::Serialize;
use utoipa::ToSchema;

use crate::model::bracket::DeductionBracket;
use crate::utils::round2;

/// PhilHealth fallback when the matched bracket carries no fixed share:
/// 2% of salary, capped at the premium ceiling.
pub const PHILHEALTH_RATE: f64 = 0.02;
pub const PHILHEALTH_CEILING: f64 = 1800.0;

/// Pag-IBIG: 1% up to the low-income cutoff, 2% above it, capped at 100.
pub const PAGIBIG_LOW_CUTOFF: f64 = 1500.0;
pub const PAGIBIG_LOW_RATE: f64 = 0.01;
pub const PAGIBIG_RATE: f64 = 0.02;
pub const PAGIBIG_CAP: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct GovernmentDeductions {
    pub sss: f64,
    pub philhealth: f64,
    pub pagibig: f64,
    pub total: f64,
}

impl GovernmentDeductions {
    pub const ZERO: GovernmentDeductions = GovernmentDeductions {
        sss: 0.0,
        philhealth: 0.0,
        pagibig: 0.0,
        total: 0.0,
    };
}

fn sss_share(salary: f64, brackets: &[DeductionBracket]) -> f64 {
    if let Some(bracket) = brackets.iter().find(|b| b.covers(salary)) {
        return bracket.employee_share;
    }

    // salary above every band: charge the top bracket
    match brackets.last() {
        Some(top) if salary >= top.salary_min => top.employee_share,
        _ => 0.0,
    }
}

fn philhealth_share(salary: f64, brackets: &[DeductionBracket]) -> f64 {
    let fixed = brackets
        .iter()
        .find(|b| b.covers(salary))
        .map(|b| b.employee_share)
        .unwrap_or(0.0);

    if fixed > 0.0 {
        fixed
    } else {
        (salary * PHILHEALTH_RATE).min(PHILHEALTH_CEILING)
    }
}

fn pagibig_share(salary: f64) -> f64 {
    let share = if salary <= PAGIBIG_LOW_CUTOFF {
        salary * PAGIBIG_LOW_RATE
    } else {
        salary * PAGIBIG_RATE
    };
    share.min(PAGIBIG_CAP)
}

/// Employee contributions for one monthly salary.
///
/// If the raw shares would exceed the salary itself, all three are scaled
/// down proportionally so their sum equals the salary, then rounded to
/// centavos. The reported total is the sum of the rounded components, so it
/// can differ from the salary by a rounding epsilon; that discrepancy is
/// intentional and not corrected further.
pub fn calculate(
    monthly_salary: f64,
    sss_brackets: &[DeductionBracket],
    philhealth_brackets: &[DeductionBracket],
) -> GovernmentDeductions {
    if monthly_salary <= 0.0 {
        return GovernmentDeductions::ZERO;
    }

    let mut sss = sss_share(monthly_salary, sss_brackets);
    let mut philhealth = philhealth_share(monthly_salary, philhealth_brackets);
    let mut pagibig = pagibig_share(monthly_salary);

    let raw_total = sss + philhealth + pagibig;
    if raw_total > monthly_salary {
        let factor = monthly_salary / raw_total;
        sss *= factor;
        philhealth *= factor;
        pagibig *= factor;
    }

    let sss = round2(sss);
    let philhealth = round2(philhealth);
    let pagibig = round2(pagibig);

    GovernmentDeductions {
        sss,
        philhealth,
        pagibig,
        total: round2(sss + philhealth + pagibig),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::bracket::DeductionType;

    fn bracket(
        deduction_type: DeductionType,
        min: f64,
        max: Option<f64>,
        share: f64,
    ) -> DeductionBracket {
        DeductionBracket {
            id: 0,
            deduction_type,
            salary_min: min,
            salary_max: max,
            employee_share: share,
            active: true,
        }
    }

    /// Mirrors the seeded reference tables.
    fn sss_table() -> Vec<DeductionBracket> {
        let bands: [(f64, f64); 13] = [
            (0.0, 180.0),
            (4250.0, 225.0),
            (6250.0, 315.0),
            (8250.0, 405.0),
            (10250.0, 495.0),
            (12250.0, 585.0),
            (14250.0, 675.0),
            (16250.0, 765.0),
            (18250.0, 855.0),
            (20250.0, 945.0),
            (22250.0, 1035.0),
            (24250.0, 1125.0),
            (26250.0, 1215.0),
        ];

        let mut table: Vec<DeductionBracket> = bands
            .windows(2)
            .map(|pair| {
                bracket(
                    DeductionType::Sss,
                    pair[0].0,
                    Some(pair[1].0),
                    pair[0].1,
                )
            })
            .collect();
        table.push(bracket(DeductionType::Sss, 26250.0, Some(28250.0), 1215.0));
        table.push(bracket(DeductionType::Sss, 28250.0, None, 1350.0));
        table
    }

    fn philhealth_table() -> Vec<DeductionBracket> {
        vec![
            bracket(DeductionType::Philhealth, 0.0, Some(10000.0), 200.0),
            bracket(DeductionType::Philhealth, 10000.0, Some(90000.0), 0.0),
            bracket(DeductionType::Philhealth, 90000.0, None, 1800.0),
        ]
    }

    #[test]
    fn zero_and_negative_salaries_deduct_nothing() {
        for salary in [0.0, -1.0, -16000.0] {
            let result = calculate(salary, &sss_table(), &philhealth_table());
            assert_eq!(result, GovernmentDeductions::ZERO, "salary {salary}");
        }
    }

    #[test]
    fn mid_range_salary_uses_bracket_and_formulas() {
        let result = calculate(16000.0, &sss_table(), &philhealth_table());

        assert_eq!(result.sss, 675.0);
        // zero-share band falls back to the 2% formula
        assert_eq!(result.philhealth, 320.0);
        // 2% of 16,000 capped at 100
        assert_eq!(result.pagibig, 100.0);
        assert_eq!(result.total, 1095.0);
    }

    #[test]
    fn salary_above_all_brackets_charges_the_top_band() {
        let result = calculate(250_000.0, &sss_table(), &philhealth_table());

        assert_eq!(result.sss, 1350.0);
        assert_eq!(result.philhealth, 1800.0);
        assert_eq!(result.pagibig, 100.0);
    }

    #[test]
    fn pagibig_low_income_rate_and_cap() {
        // 1% applies at and below the cutoff
        let low = calculate(1500.0, &sss_table(), &philhealth_table());
        assert_eq!(low.pagibig, 15.0);

        // just above the cutoff the 2% rate applies, still under the cap
        let above = calculate(4000.0, &sss_table(), &philhealth_table());
        assert_eq!(above.pagibig, 80.0);

        // the cap engages at 5,000 and up
        let capped = calculate(5000.0, &sss_table(), &philhealth_table());
        assert_eq!(capped.pagibig, 100.0);
    }

    #[test]
    fn tiny_salary_scales_down_to_gross() {
        let salary = 100.0;
        let result = calculate(salary, &sss_table(), &philhealth_table());

        // raw shares (180 + 200 + 1) dwarf the salary; the scaled sum must
        // land on the salary up to rounding
        assert!((result.total - salary).abs() <= 0.02, "total {}", result.total);
        assert!(result.sss > 0.0 && result.philhealth > 0.0 && result.pagibig > 0.0);
    }

    // Post-scaling invariant over a wide salary sweep, including every
    // bracket boundary.
    #[test]
    fn deductions_never_exceed_salary() {
        let sss = sss_table();
        let philhealth = philhealth_table();

        let mut salaries: Vec<f64> = (1..=2400).map(|n| n as f64 * 50.0).collect();
        for boundary in [
            1500.0, 4250.0, 6250.0, 8250.0, 10000.0, 10250.0, 14250.0, 16250.0, 28250.0, 90000.0,
        ] {
            salaries.extend([boundary - 0.01, boundary, boundary + 0.01]);
        }

        for salary in salaries {
            let result = calculate(salary, &sss, &philhealth);
            let sum = result.sss + result.philhealth + result.pagibig;

            assert!(
                sum <= salary + 0.02,
                "deductions {sum} exceed salary {salary}"
            );
            assert!(result.sss >= 0.0 && result.philhealth >= 0.0 && result.pagibig >= 0.0);
            assert!((result.total - sum).abs() < 1e-9);
        }
    }
}

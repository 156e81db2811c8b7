//! The first-order linear recurrence `D_n = beta_0 + beta_1 * D_{n-1}` from the
//! determinant derivation, evaluated both step by step and in closed form.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ExperimentError, Result};
use crate::table::Table;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearRecurrence {
    pub beta_0: f64,
    pub beta_1: f64,
    pub d_1: f64,
}

impl Default for LinearRecurrence {
    fn default() -> Self {
        LinearRecurrence {
            beta_0: 1.0,
            beta_1: 3.5,
            d_1: 12.0,
        }
    }
}

fn check_index(n: u32) -> Result<()> {
    if n < 1 {
        return Err(ExperimentError::invalid("recurrence index must be >= 1"));
    }
    Ok(())
}

impl LinearRecurrence {
    pub fn new(beta_0: f64, beta_1: f64, d_1: f64) -> Self {
        LinearRecurrence {
            beta_0,
            beta_1,
            d_1,
        }
    }

    /// `D_n` by applying the recurrence `n - 1` times to `D_1`.
    pub fn recursive(&self, n: u32) -> Result<f64> {
        check_index(n)?;
        Ok((2..=n).fold(self.d_1, |d, _| self.beta_0 + self.beta_1 * d))
    }

    /// `D_n = D_1 beta_1^(n-1) + beta_0 (beta_1^(n-1) - 1) / (beta_1 - 1)`.
    ///
    /// At `beta_1 == 1` the geometric sum degenerates to `n - 1` terms of `beta_0`,
    /// which is used instead of dividing by zero.
    pub fn closed_form(&self, n: u32) -> Result<f64> {
        check_index(n)?;
        // every u32 is exact in f64, so the exponent cannot wrap
        let steps = f64::from(n - 1);
        if self.beta_1 == 1.0 {
            return Ok(self.d_1 + self.beta_0 * steps);
        }
        let growth = self.beta_1.powf(steps);
        Ok(self.d_1 * growth + (growth - 1.0) * self.beta_0 / (self.beta_1 - 1.0))
    }

    pub fn cross_check(&self, range: std::ops::RangeInclusive<u32>) -> Result<CrossCheck> {
        let rows = range
            .map(|n| -> Result<RecurrenceRow> {
                let recursive = self.recursive(n)?;
                let closed_form = self.closed_form(n)?;
                Ok(RecurrenceRow {
                    n,
                    recursive,
                    closed_form,
                    diff: recursive - closed_form,
                })
            })
            .collect::<Result<Vec<RecurrenceRow>>>()?;
        debug!(rows = rows.len(), "recurrence cross-check evaluated");
        Ok(CrossCheck { rows })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct RecurrenceRow {
    pub n: u32,
    pub recursive: f64,
    pub closed_form: f64,
    pub diff: f64,
}

impl RecurrenceRow {
    /// Whether both evaluations agree to within `tolerance`, relative to their size.
    pub fn agrees(&self, tolerance: f64) -> bool {
        let scale = self.recursive.abs().max(self.closed_form.abs()).max(1.0);
        self.diff.abs() <= tolerance * scale
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CrossCheck {
    pub rows: Vec<RecurrenceRow>,
}

impl CrossCheck {
    pub fn all_agree(&self, tolerance: f64) -> bool {
        self.rows.iter().all(|row| row.agrees(tolerance))
    }
}

impl Table for CrossCheck {
    fn header(&self) -> Vec<String> {
        ["n", "recursive", "closed_form", "diff"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| {
                vec![
                    r.n.to_string(),
                    r.recursive.to_string(),
                    r.closed_form.to_string(),
                    r.diff.to_string(),
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_terms() {
        let rec = LinearRecurrence::new(1.0, 3.5, 12.0);
        assert_eq!(rec.recursive(1).unwrap(), 12.0);
        assert_eq!(rec.closed_form(1).unwrap(), 12.0);
        assert_eq!(rec.recursive(2).unwrap(), 43.0);
        assert_relative_eq!(rec.closed_form(2).unwrap(), 43.0);
    }

    #[test]
    fn test_forms_agree_up_to_twenty() {
        let rec = LinearRecurrence::default();
        let check = rec.cross_check(1..=20).unwrap();
        assert_eq!(check.rows.len(), 20);
        for row in &check.rows {
            assert_relative_eq!(row.recursive, row.closed_form, max_relative = 1e-9);
        }
        assert!(check.all_agree(1e-9));
    }

    #[test]
    fn test_index_zero_is_rejected() {
        let rec = LinearRecurrence::default();
        assert!(matches!(rec.recursive(0), Err(ExperimentError::InvalidArgument(_))));
        assert!(matches!(rec.closed_form(0), Err(ExperimentError::InvalidArgument(_))));
        assert!(rec.cross_check(0..=3).is_err());
    }

    #[test]
    fn test_unit_growth_is_arithmetic() {
        let rec = LinearRecurrence::new(2.0, 1.0, 5.0);
        for n in 1..=30 {
            let closed = rec.closed_form(n).unwrap();
            assert!(closed.is_finite());
            assert_relative_eq!(closed, rec.recursive(n).unwrap());
            assert_relative_eq!(closed, 5.0 + 2.0 * (n - 1) as f64);
        }
    }

    #[test]
    fn test_shrinking_and_negative_growth() {
        for &beta_1 in &[0.5, -0.75, -2.0, 0.0] {
            let rec = LinearRecurrence::new(-1.5, beta_1, 4.0);
            assert!(rec.cross_check(1..=25).unwrap().all_agree(1e-9), "{}", beta_1);
        }
    }

    #[test]
    fn test_closed_form_past_i32_exponents() {
        let rec = LinearRecurrence::default();
        // the recursion overflows to +inf long before these indices
        assert_eq!(rec.recursive(1000).unwrap(), f64::INFINITY);
        for &n in &[1000, (1u32 << 31) + 1, u32::MAX] {
            assert_eq!(rec.closed_form(n).unwrap(), f64::INFINITY, "{}", n);
        }

        // a contracting recurrence settles on beta_0 / (1 - beta_1)
        let rec = LinearRecurrence::new(1.0, 0.5, 12.0);
        let settled = rec.recursive(200).unwrap();
        assert_relative_eq!(settled, 2.0);
        for &n in &[(1u32 << 31) + 1, u32::MAX] {
            assert_relative_eq!(rec.closed_form(n).unwrap(), settled);
        }

        let rec = LinearRecurrence::new(2.0, 1.0, 5.0);
        assert_eq!(rec.closed_form(u32::MAX).unwrap(), 5.0 + 2.0 * f64::from(u32::MAX - 1));
    }
}

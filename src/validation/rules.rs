//! Save rules evaluated against a grid using Validation.

use crate::core::{Grid, Row, MAX_PRODUCTS_PER_ROW};
use crate::validation::builder::SaveRulesBuilder;
use crate::validation::violations::RowViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Type alias for per-row check functions
pub type RowCheck = Box<dyn Fn(&Row) -> Validation<(), NonEmptyVec<RowViolation>> + Send + Sync>;

/// Rules a grid must satisfy before it may be persisted.
/// Uses Validation to accumulate every violation of every row.
pub struct SaveRules {
    pub(crate) min_products: Option<usize>,
    pub(crate) max_products: Option<usize>,
    pub(crate) require_template: bool,
    pub(crate) checks: Vec<RowCheck>,
}

impl SaveRules {
    /// 1 to [`MAX_PRODUCTS_PER_ROW`] products and a template on every row.
    pub fn standard() -> Self {
        SaveRulesBuilder::new()
            .min_products(1)
            .max_products(MAX_PRODUCTS_PER_ROW)
            .require_template()
            .build()
    }

    /// Check a single row against every rule.
    pub fn enforce_row(&self, row: &Row) -> Validation<(), NonEmptyVec<RowViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<RowViolation>>> = Vec::new();

        if let Some(min) = self.min_products {
            let check = match row.len() {
                n if n >= min => Validation::success(()),
                0 => Validation::fail(RowViolation::EmptyRow {
                    row_id: row.id.clone(),
                }),
                count => Validation::fail(RowViolation::TooFewProducts {
                    row_id: row.id.clone(),
                    count,
                    min,
                }),
            };
            checks.push(check);
        }

        if let Some(max) = self.max_products {
            let check = if row.len() > max {
                Validation::fail(RowViolation::TooManyProducts {
                    row_id: row.id.clone(),
                    count: row.len(),
                    max,
                })
            } else {
                Validation::success(())
            };
            checks.push(check);
        }

        if self.require_template {
            let check = if row.template_id.is_none() {
                Validation::fail(RowViolation::MissingTemplate {
                    row_id: row.id.clone(),
                })
            } else {
                Validation::success(())
            };
            checks.push(check);
        }

        for check_fn in &self.checks {
            checks.push(check_fn(row));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Check every row, accumulating all violations across the grid.
    pub fn enforce(&self, grid: &Grid) -> Validation<(), NonEmptyVec<RowViolation>> {
        let checks: Vec<Validation<(), NonEmptyVec<RowViolation>>> =
            grid.rows.iter().map(|row| self.enforce_row(row)).collect();
        Validation::all_vec(checks).map(|_| ())
    }

    /// Like [`enforce`](Self::enforce), flattened into a `Result`.
    pub fn check(&self, grid: &Grid) -> Result<(), Vec<RowViolation>> {
        match self.enforce(grid) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => Err(errors.iter().cloned().collect()),
        }
    }
}

impl Default for SaveRules {
    fn default() -> Self {
        Self::standard()
    }
}

//! Builder API for assembling save rules.

use crate::core::Row;
use crate::validation::rules::{RowCheck, SaveRules};
use crate::validation::violations::RowViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for [`SaveRules`].
pub struct SaveRulesBuilder {
    min_products: Option<usize>,
    max_products: Option<usize>,
    require_template: bool,
    checks: Vec<RowCheck>,
}

impl SaveRulesBuilder {
    pub fn new() -> Self {
        Self {
            min_products: None,
            max_products: None,
            require_template: false,
            checks: Vec::new(),
        }
    }

    /// Require at least `n` products per row
    pub fn min_products(mut self, n: usize) -> Self {
        self.min_products = Some(n);
        self
    }

    /// Allow at most `n` products per row
    pub fn max_products(mut self, n: usize) -> Self {
        self.max_products = Some(n);
        self
    }

    /// Require every row to carry a template id
    pub fn require_template(mut self) -> Self {
        self.require_template = true;
        self
    }

    /// Add a custom validation check
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&Row) -> Validation<(), NonEmptyVec<RowViolation>> + Send + Sync + 'static,
    {
        self.checks.push(Box::new(check));
        self
    }

    /// Add a simple predicate check with error message
    pub fn require_pred<F>(mut self, predicate: F, message: String) -> Self
    where
        F: Fn(&Row) -> bool + Send + Sync + 'static,
    {
        let check = move |row: &Row| {
            if predicate(row) {
                Validation::success(())
            } else {
                Validation::fail(RowViolation::Custom {
                    row_id: row.id.clone(),
                    message: message.clone(),
                })
            }
        };
        self.checks.push(Box::new(check));
        self
    }

    pub fn build(self) -> SaveRules {
        SaveRules {
            min_products: self.min_products,
            max_products: self.max_products,
            require_template: self.require_template,
            checks: self.checks,
        }
    }
}

impl Default for SaveRulesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

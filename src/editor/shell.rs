//! The editor shell around [`GridLayout`].

use crate::catalog::{CatalogError, CatalogProvider, SaveReceipt};
use crate::config::EditorConfig;
use crate::core::{
    EditJournal, EditOp, Grid, GridLayout, LoadStatus, Outcome, Product, Row, RowFill, Status,
    Template,
};
use crate::editor::error::SaveError;
use crate::editor::zoom::Zoom;
use crate::snapshot::{Snapshot, SnapshotError};
use crate::validation::{SaveRules, LOAD_DATA_FAILED};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Owns the layout and everything the presentation layer reads.
///
/// The catalog is injected at construction; there is no ambient editor
/// instance. All mutators are synchronous; only [`load`](Self::load) and
/// [`save`](Self::save) await the catalog.
pub struct GridEditor {
    catalog: Arc<dyn CatalogProvider>,
    rules: SaveRules,
    layout: GridLayout,
    templates: Vec<Template>,
    status: LoadStatus,
    busy: bool,
    error: Option<String>,
    zoom: Zoom,
    journal: EditJournal,
}

impl GridEditor {
    pub fn new(catalog: Arc<dyn CatalogProvider>, config: &EditorConfig) -> Self {
        Self {
            catalog,
            rules: SaveRules::standard(),
            layout: GridLayout::default(),
            templates: Vec::new(),
            status: LoadStatus::Pending,
            busy: false,
            error: None,
            zoom: Zoom::new(config.zoom.clone()),
            journal: EditJournal::new(),
        }
    }

    /// Replace the standard save rules.
    pub fn with_rules(mut self, rules: SaveRules) -> Self {
        self.rules = rules;
        self
    }

    /// Fetch products and templates and start from an empty grid.
    ///
    /// With a non-empty `product_ids` only those products are fetched,
    /// otherwise the full catalog. On failure the editor keeps no data and
    /// stays in [`LoadStatus::Failed`].
    pub async fn load(&mut self, product_ids: &[String]) -> Result<(), CatalogError> {
        self.status = LoadStatus::Pending;
        self.busy = true;

        let fetched = self.fetch_initial(product_ids).await;
        self.busy = false;

        match fetched {
            Ok((products, templates)) => {
                info!(
                    products = products.len(),
                    templates = templates.len(),
                    "catalog loaded"
                );
                self.layout = GridLayout::new(products);
                self.templates = templates;
                self.journal.clear();
                self.error = None;
                self.status = LoadStatus::Ready;
                Ok(())
            }
            Err(error) => {
                warn!(error = %error, "catalog load failed");
                self.layout = GridLayout::default();
                self.templates.clear();
                self.error = Some(LOAD_DATA_FAILED.to_string());
                self.status = LoadStatus::Failed;
                Err(error)
            }
        }
    }

    async fn fetch_initial(
        &self,
        product_ids: &[String],
    ) -> Result<(Vec<Product>, Vec<Template>), CatalogError> {
        let products = if product_ids.is_empty() {
            self.catalog.fetch_all_products().await?
        } else {
            self.catalog.fetch_products_by_ids(product_ids).await?
        };
        let templates = self.catalog.fetch_templates().await?;
        Ok((products, templates))
    }

    pub fn grid(&self) -> &Grid {
        self.layout.grid()
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn available_products(&self) -> &[Product] {
        self.layout.available()
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn template(&self, template_id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == template_id)
    }

    /// Template assigned to a row, if the row exists and its id is known.
    pub fn row_template(&self, row_id: &str) -> Option<&Template> {
        let template_id = self.layout.row(row_id)?.template_id.as_deref()?;
        self.template(template_id)
    }

    pub fn row_fill(&self, row_id: &str) -> Option<RowFill> {
        self.layout.row(row_id).map(RowFill::of)
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// True while the initial load or a save is outstanding.
    pub fn is_loading(&self) -> bool {
        self.busy || self.status == LoadStatus::Pending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn journal(&self) -> &EditJournal {
        &self.journal
    }

    pub fn zoom(&self) -> &Zoom {
        &self.zoom
    }

    pub fn zoom_mut(&mut self) -> &mut Zoom {
        &mut self.zoom
    }

    pub fn add_row(&mut self) -> String {
        let row_id = self.layout.add_row();
        self.apply(
            EditOp::AddRow {
                row_id: row_id.clone(),
            },
            Outcome::Applied,
        );
        row_id
    }

    pub fn remove_row(&mut self, row_id: &str) -> Outcome {
        let outcome = self.layout.remove_row(row_id);
        self.apply(
            EditOp::RemoveRow {
                row_id: row_id.to_string(),
            },
            outcome,
        )
    }

    pub fn move_row(&mut self, from: usize, to: usize) -> Outcome {
        let outcome = self.layout.move_row(from, to);
        self.apply(EditOp::MoveRow { from, to }, outcome)
    }

    pub fn update_row_template(&mut self, row_id: &str, template_id: &str) -> Outcome {
        let outcome = self.layout.update_row_template(row_id, template_id);
        self.apply(
            EditOp::UpdateRowTemplate {
                row_id: row_id.to_string(),
                template_id: template_id.to_string(),
            },
            outcome,
        )
    }

    pub fn move_product(
        &mut self,
        source_row_id: Option<&str>,
        destination_row_id: Option<&str>,
        product_id: &str,
        destination_index: Option<usize>,
    ) -> Outcome {
        let outcome = self.layout.move_product(
            source_row_id,
            destination_row_id,
            product_id,
            destination_index,
        );
        self.apply(
            EditOp::MoveProduct {
                source_row_id: source_row_id.map(str::to_string),
                destination_row_id: destination_row_id.map(str::to_string),
                product_id: product_id.to_string(),
                destination_index,
            },
            outcome,
        )
    }

    fn apply(&mut self, op: EditOp, outcome: Outcome) -> Outcome {
        if let Outcome::Skipped(reason) = &outcome {
            debug!(op = op.name(), reason = ?reason, "edit skipped");
        }
        self.journal.record(op, outcome.clone());
        outcome
    }

    /// Validate the grid and hand it to the catalog.
    ///
    /// A rule violation fails locally without calling the catalog. On
    /// success the returned id is stored on the grid.
    pub async fn save(&mut self) -> Result<SaveReceipt, SaveError> {
        if let Err(violations) = self.rules.check(self.layout.grid()) {
            let error = SaveError::Validation(violations);
            warn!(error = %error, "save rejected");
            self.error = Some(error.user_message().to_string());
            return Err(error);
        }

        self.busy = true;
        let result = self.catalog.persist_grid(self.layout.grid()).await;
        self.busy = false;

        match result {
            Ok(receipt) => {
                info!(grid_id = %receipt.id, rows = self.layout.rows().len(), "grid saved");
                self.layout.set_grid_id(receipt.id.clone());
                self.error = None;
                Ok(receipt)
            }
            Err(error) => {
                let error = SaveError::from(error);
                warn!(error = %error, "save failed");
                self.error = Some(error.user_message().to_string());
                Err(error)
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.layout)
    }

    /// Replace the layout with a previously captured one.
    ///
    /// The snapshot must cover exactly the products the editor holds. The
    /// current layout is kept if the snapshot is unusable.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<(), SnapshotError> {
        let layout = snapshot.into_layout()?;
        let current = self.layout.product_ids();
        let incoming = layout.product_ids();
        if current != incoming {
            return Err(SnapshotError::ProductSetMismatch {
                missing: current.difference(&incoming).map(|id| id.to_string()).collect(),
                unexpected: incoming.difference(&current).map(|id| id.to_string()).collect(),
            });
        }
        debug!(
            rows = layout.rows().len(),
            available = layout.available().len(),
            "layout restored"
        );
        self.layout = layout;
        Ok(())
    }

    /// Rows that currently block saving, in display order.
    pub fn incomplete_rows(&self) -> impl Iterator<Item = &Row> {
        self.layout
            .rows()
            .iter()
            .filter(|row| RowFill::of(row).is_error() || row.template_id.is_none())
    }
}

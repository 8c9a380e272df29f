use backoffice_shared::product::{ImportOutcome, Product, ProductDraft, ProductStatus};
use egui::Button;
use egui_extras::{Column, TableBuilder};

use super::{
    data_state::{poll_in_flight, AwaitingType, DataState},
    DisplayablePage, PageAccess,
};
use crate::{
    app::wake_fn,
    displayable_page_common,
    ui_helpers::{get_text_height, ui_error_label, ui_escape_button},
};

/// Product catalogue management (list, create, edit, delete, bulk import)
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiProducts {
    is_open: bool,
    page_unique_number: usize,
    #[serde(skip)]
    should_refresh: bool,
    #[serde(skip)]
    products: DataState<Vec<Product>>,
    #[serde(skip)]
    search_query: String,
    #[serde(skip)]
    op: ProductOp,
    #[serde(skip)]
    delete_in_flight: Option<(String, AwaitingType<serde_json::Value>)>,
    #[serde(skip)]
    delete_error: Option<String>,
    #[serde(skip)]
    import: ImportSection,
}

#[derive(Debug, Default)]
enum ProductOp {
    #[default]
    None,
    New(ProductForm),
    Edit { id: String, form: ProductForm },
}

#[derive(Debug, Default)]
struct ProductForm {
    draft: ProductDraft,
    error: Option<String>,
    in_flight: Option<AwaitingType<Product>>,
}

#[derive(Debug, Default)]
struct ImportSection {
    path: String,
    error: Option<String>,
    in_flight: Option<AwaitingType<ImportOutcome>>,
    outcome: Option<ImportOutcome>,
}

impl ProductForm {
    fn for_edit(product: &Product) -> Self {
        Self {
            draft: ProductDraft::from_product(product),
            error: None,
            in_flight: None,
        }
    }

    fn validation_error(&self) -> Option<String> {
        if self.draft.name.trim().is_empty() {
            return Some("Name is required".to_string());
        }
        if self.draft.category.trim().is_empty() {
            return Some("Category is required".to_string());
        }
        None
    }
}

impl DisplayablePage for UiProducts {
    displayable_page_common!("Products", PageAccess::Employees);

    fn reset_to_default(&mut self, _: super::private::Token) {
        self.should_refresh = Default::default();
        self.products = Default::default();
        self.search_query = Default::default();
        self.op = Default::default();
        self.delete_in_flight = Default::default();
        self.delete_error = Default::default();
        self.import = Default::default();
    }

    fn show(&mut self, ui: &mut eframe::egui::Ui, data_shared: &mut crate::DataShared) {
        if self.should_refresh {
            self.reset_to_default(super::private::Token {});
        }

        let DataState::Present(products) = &self.products else {
            let ctx = ui.ctx().clone();
            self.products.get(Some(ui), None, || {
                AwaitingType(data_shared.client.list_products(wake_fn(ctx)))
            });
            return;
        };
        let products = products.clone();

        if self.poll_delete() {
            self.should_refresh = true;
        }

        match &mut self.op {
            ProductOp::None => {}
            ProductOp::New(form) => {
                ui.heading("New Product");
                if ui_show_product_form(ui, form, None, data_shared) == OpResult::ResetPage {
                    self.should_refresh = true;
                }
                ui.separator();
            }
            ProductOp::Edit { id, form } => {
                ui.heading("Edit Product");
                if ui_show_product_form(ui, form, Some(id.as_str()), data_shared)
                    == OpResult::ResetPage
                {
                    self.should_refresh = true;
                }
                ui.separator();
            }
        }

        ui.horizontal(|ui| {
            if ui.button("Refresh").clicked() {
                self.should_refresh = true;
            }
            if matches!(self.op, ProductOp::None) && ui.button("Add New Product").clicked() {
                self.op = ProductOp::New(ProductForm::default());
            }
            ui.label("Search:");
            ui.text_edit_singleline(&mut self.search_query);
        });
        if let Some(e) = &self.delete_error {
            ui_error_label(ui, e);
        }
        ui.separator();

        let visible: Vec<Product> = filter_products(&products, &self.search_query)
            .into_iter()
            .cloned()
            .collect();
        self.ui_show_product_list(ui, &visible, data_shared);

        #[cfg(not(target_arch = "wasm32"))]
        {
            ui.separator();
            self.ui_show_import(ui, data_shared);
        }
    }
}

#[must_use]
#[derive(Debug, PartialEq, Eq)]
enum OpResult {
    NoAction,
    ResetPage,
}

impl UiProducts {
    /// Returns true when a delete finished successfully
    fn poll_delete(&mut self) -> bool {
        let Some((id, rx)) = &mut self.delete_in_flight else {
            return false;
        };
        match rx.0.try_recv() {
            Ok(Some(Ok(_))) => {
                tracing::info!("deleted product {id}");
                self.delete_in_flight = None;
                true
            }
            Ok(Some(Err(e))) => {
                self.delete_error = Some(e.to_string());
                self.delete_in_flight = None;
                false
            }
            Ok(None) => false, // Still waiting
            Err(e) => {
                tracing::error!("Error receiving on channel. Canceled: {e:?}");
                self.delete_error = Some("Request was cancelled, please retry".to_string());
                self.delete_in_flight = None;
                false
            }
        }
    }

    fn ui_show_product_list(
        &mut self,
        ui: &mut egui::Ui,
        products: &[Product],
        data_shared: &mut crate::DataShared,
    ) {
        if products.is_empty() {
            ui.label("No matching products");
            return;
        }
        let text_height = get_text_height(ui);
        let table = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::LEFT))
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::remainder())
            .min_scrolled_height(0.0)
            .header(text_height, |mut header| {
                header.col(|ui| {
                    ui.strong("Name");
                });
                header.col(|ui| {
                    ui.strong("Category");
                });
                header.col(|ui| {
                    ui.strong("B2C Price");
                });
                header.col(|ui| {
                    ui.strong("B2B Price");
                });
                header.col(|ui| {
                    ui.strong("Stock");
                });
                header.col(|ui| {
                    ui.strong("Status");
                });
                header.col(|ui| {
                    ui.strong("Actions");
                });
            });

        let mut edit_request = None;
        let mut delete_request = None;
        table.body(|body| {
            body.rows(text_height, products.len(), |mut row| {
                let product = &products[row.index()];
                row.col(|ui| {
                    ui.label(&product.name);
                });
                row.col(|ui| {
                    ui.label(&product.category);
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", product.b2c_price));
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", product.b2b_price));
                });
                row.col(|ui| {
                    ui.label(product.stock.to_string());
                });
                row.col(|ui| {
                    ui.label(product.status.as_str());
                });
                row.col(|ui| {
                    if ui.button("Edit").clicked() {
                        edit_request = Some(product.clone());
                    }
                    if self.delete_in_flight.is_none() && ui.button("Delete").clicked() {
                        delete_request = Some(product.id.clone());
                    }
                });
            });
        });

        if let Some(product) = edit_request {
            self.op = ProductOp::Edit {
                id: product.id.clone(),
                form: ProductForm::for_edit(&product),
            };
        }
        if let Some(id) = delete_request {
            self.delete_error = None;
            let rx = data_shared
                .client
                .delete_product(&id, wake_fn(ui.ctx().clone()));
            self.delete_in_flight = Some((id, AwaitingType(rx)));
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn ui_show_import(&mut self, ui: &mut egui::Ui, data_shared: &mut crate::DataShared) {
        ui.heading("Bulk Import");
        ui.horizontal(|ui| {
            ui.label("Spreadsheet path:");
            ui.text_edit_singleline(&mut self.import.path);
        });

        if let Some(outcome) = poll_in_flight(&mut self.import.in_flight) {
            match outcome {
                Ok(outcome) => {
                    self.import.outcome = Some(outcome);
                    self.import.error = None;
                    // Reload just the list so the summary stays visible
                    self.products = DataState::None;
                }
                Err(e) => self.import.error = Some(e.to_string()),
            }
        }
        if self.import.in_flight.is_some() {
            ui.spinner();
        }
        if let Some(e) = &self.import.error {
            ui_error_label(ui, e);
        }
        if let Some(outcome) = &self.import.outcome {
            ui.label(format!(
                "Imported {} products, {} failed",
                outcome.success, outcome.failed
            ));
            for row_error in &outcome.errors {
                ui.weak(row_error);
            }
        }

        let can_send = !self.import.path.trim().is_empty() && self.import.in_flight.is_none();
        if ui.add_enabled(can_send, Button::new("Import")).clicked() {
            let path = std::path::PathBuf::from(self.import.path.trim());
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "import.xlsx".to_string());
            match std::fs::read(&path) {
                Ok(bytes) => {
                    self.import.error = None;
                    self.import.outcome = None;
                    let rx = data_shared.client.import_products(
                        file_name,
                        bytes,
                        wake_fn(ui.ctx().clone()),
                    );
                    self.import.in_flight = Some(AwaitingType(rx));
                }
                Err(e) => self.import.error = Some(format!("Failed to read {path:?}: {e}")),
            }
        }
    }
}

fn ui_show_product_form(
    ui: &mut egui::Ui,
    form: &mut ProductForm,
    edit_id: Option<&str>,
    data_shared: &mut crate::DataShared,
) -> OpResult {
    if let Some(outcome) = poll_in_flight(&mut form.in_flight) {
        match outcome {
            Ok(product) => {
                tracing::info!("saved product {}", product.id);
                return OpResult::ResetPage;
            }
            Err(e) => form.error = Some(e.to_string()),
        }
    }

    egui::Grid::new("Product Grid").num_columns(2).show(ui, |ui| {
        ui.label("Name");
        ui.text_edit_singleline(&mut form.draft.name);
        ui.end_row();

        ui.label("Category");
        ui.text_edit_singleline(&mut form.draft.category);
        ui.end_row();

        ui.label("B2C Price");
        ui.add(egui::DragValue::new(&mut form.draft.b2c_price).speed(0.1).range(0.0..=f64::MAX));
        ui.end_row();

        ui.label("B2B Price");
        ui.add(egui::DragValue::new(&mut form.draft.b2b_price).speed(0.1).range(0.0..=f64::MAX));
        ui.end_row();

        ui.label("Compare At Price");
        ui.add(
            egui::DragValue::new(&mut form.draft.compare_at_price)
                .speed(0.1)
                .range(0.0..=f64::MAX),
        );
        ui.end_row();

        ui.label("Stock");
        ui.add(egui::DragValue::new(&mut form.draft.stock).range(0..=i64::MAX));
        ui.end_row();

        ui.label("Description");
        let mut description = form.draft.description.clone().unwrap_or_default();
        ui.text_edit_multiline(&mut description);
        form.draft.description = (!description.is_empty()).then_some(description);
        ui.end_row();

        ui.label("Status");
        egui::ComboBox::from_id_salt("product status")
            .selected_text(form.draft.status.as_str())
            .show_ui(ui, |ui| {
                for status in ProductStatus::selectable() {
                    let label = status.as_str().to_string();
                    ui.selectable_value(&mut form.draft.status, status, label);
                }
            });
        ui.end_row();
    });

    if form.in_flight.is_some() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Saving...");
        });
    }
    if let Some(e) = &form.error {
        ui_error_label(ui, e);
    }

    if ui
        .add_enabled(form.in_flight.is_none(), Button::new("Save"))
        .clicked()
    {
        match form.validation_error() {
            Some(e) => form.error = Some(e),
            None => {
                form.error = None;
                let ctx = ui.ctx().clone();
                let rx = match edit_id {
                    Some(id) => data_shared
                        .client
                        .update_product(id, form.draft.clone(), wake_fn(ctx)),
                    None => data_shared
                        .client
                        .create_product(form.draft.clone(), wake_fn(ctx)),
                };
                form.in_flight = Some(AwaitingType(rx));
            }
        }
    }

    if ui_escape_button(ui, "Cancel") {
        return OpResult::ResetPage;
    }

    OpResult::NoAction
}

/// Case-insensitive filter over name, category and id
fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let query = query.trim().to_lowercase();
    products
        .iter()
        .filter(|product| {
            query.is_empty()
                || product.name.to_lowercase().contains(&query)
                || product.category.to_lowercase().contains(&query)
                || product.id.to_lowercase().contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, category: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            b2c_price: 10.0,
            b2b_price: 8.0,
            compare_at_price: 12.0,
            stock: 5,
            description: None,
            status: ProductStatus::active(),
        }
    }

    #[test]
    fn filter_matches_name_category_and_id() {
        let products = vec![
            product("p-1", "Blue Mug", "Kitchen"),
            product("p-2", "Desk Lamp", "Office"),
        ];

        assert_eq!(filter_products(&products, "").len(), 2);
        assert_eq!(filter_products(&products, "mug")[0].id, "p-1");
        assert_eq!(filter_products(&products, "OFFICE")[0].id, "p-2");
        assert_eq!(filter_products(&products, "p-2")[0].id, "p-2");
        assert!(filter_products(&products, "couch").is_empty());
    }

    #[test]
    fn form_requires_name_and_category() {
        let mut form = ProductForm::default();
        assert_eq!(form.validation_error().as_deref(), Some("Name is required"));

        form.draft.name = "Blue Mug".to_string();
        assert_eq!(
            form.validation_error().as_deref(),
            Some("Category is required")
        );

        form.draft.category = "Kitchen".to_string();
        assert!(form.validation_error().is_none());
    }

    #[test]
    fn edit_form_starts_from_the_existing_product() {
        let existing = product("p-1", "Blue Mug", "Kitchen");

        let form = ProductForm::for_edit(&existing);

        assert_eq!(form.draft, ProductDraft::from_product(&existing));
        assert!(form.error.is_none());
    }
}

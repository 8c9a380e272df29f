use backoffice_shared::{
    const_config::path::{
        PATH_PRODUCTS, PATH_PRODUCTS_CREATE, PATH_PRODUCTS_IMPORT, PATH_PRODUCTS_ITEM_BASE,
    },
    product::{ImportOutcome, Product, ProductDraft},
};
use futures::channel::oneshot;
use reqwest::Method;

use crate::{
    client::{process_json_body, UiCallBack, DUMMY_ARGUMENT},
    Client,
};

/// Substituted when the import endpoint returns a non-JSON error body
const IMPORT_FALLBACK_ERROR_DETAIL: &str = "An error occurred during import";

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_products<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<Product>>> {
        self.send_request_expect_json(PATH_PRODUCTS, &DUMMY_ARGUMENT, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn create_product<F: UiCallBack>(
        &self,
        draft: ProductDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Product>> {
        self.send_request_expect_json(PATH_PRODUCTS_CREATE, &draft, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn update_product<F: UiCallBack>(
        &self,
        id: &str,
        draft: ProductDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Product>> {
        let path = format!("{PATH_PRODUCTS_ITEM_BASE}/{id}");
        self.send_request_expect_json_at(Method::PUT, &path, &draft, ui_notify)
    }

    /// Success body is caller-irrelevant, only the status matters
    #[tracing::instrument(skip(ui_notify))]
    pub fn delete_product<F: UiCallBack>(
        &self,
        id: &str,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<serde_json::Value>> {
        let path = format!("{PATH_PRODUCTS_ITEM_BASE}/{id}");
        self.send_request_expect_json_at(Method::DELETE, &path, &"", ui_notify)
    }

    /// Bulk import from a spreadsheet, sent as `multipart/form-data` with a
    /// single `file` field
    ///
    /// No explicit content type is set, the transport generates the multipart
    /// boundary itself
    #[tracing::instrument(skip(bytes, ui_notify))]
    pub fn import_products<F: UiCallBack>(
        &self,
        file_name: String,
        bytes: Vec<u8>,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<ImportOutcome>> {
        let (tx, rx) = oneshot::channel();
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);
        let request = self.import_request(form);
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_json_body(resp, IMPORT_FALLBACK_ERROR_DETAIL).await;
            tx.send(msg).expect("failed to send oneshot msg");
            ui_notify();
        };
        reqwest_cross::fetch(request, on_done);
        rx
    }

    fn import_request(&self, form: reqwest::multipart::Form) -> reqwest::RequestBuilder {
        let mut request = self
            .api_client
            .request(
                PATH_PRODUCTS_IMPORT.method,
                self.path_to_url(PATH_PRODUCTS_IMPORT.path),
            )
            .multipart(form);
        if let Some(token) = self.bearer_token() {
            request = request.bearer_auth(token);
        }
        request
    }
}

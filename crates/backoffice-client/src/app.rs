use backoffice_client_core::UiCallBack;
use backoffice_time::Timestamp;
use egui::ScrollArea;
use tracing::{debug, error, info, warn};

use crate::pages::{
    data_state::{poll_in_flight, AwaitingType},
    password_reset::UiPasswordReset,
    products::UiProducts,
    users::UiUsers,
    UiLogin, UiPage, UiTokenReset,
};
use crate::DisplayablePage;

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct BackofficeApp {
    #[serde(skip)]
    login_page: Option<UiLogin>,
    #[serde(skip)]
    token_reset_page: Option<UiTokenReset>,
    data_shared: DataShared,
    active_pages: Vec<UiPage>,
    /// Validates a restored token against the server on startup
    #[serde(skip)]
    session_check: Option<AwaitingType<backoffice_shared::account::UserProfile>>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct DataShared {
    /// Shared between the login flow and the password reset views
    pub email: String,

    /// Bridges the client's in-memory session across restarts, written on
    /// save and consumed on startup
    saved_session: Option<backoffice_client_core::Session>,

    #[serde(skip)]
    pub client: backoffice_client_core::Client,
}

impl DataShared {
    pub fn is_logged_in(&self) -> bool {
        self.client.is_logged_in()
    }

    fn has_access<T: DisplayablePage>(&self) -> bool {
        let Some(user) = self.client.session_user() else {
            error!("Attempt to check page access when no user is logged in");
            debug_assert!(false, "access checks should only happen after login");
            return false;
        };
        T::is_allowed(&user.role)
    }
}

impl eframe::App for BackofficeApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.data_shared.saved_session = self.data_shared.client.session_snapshot();
        info!("Saving with key: {}", eframe::APP_KEY);
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per
    /// second. Put your widgets into a `SidePanel`, `TopPanel`,
    /// `CentralPanel`, `Window` or `Area`.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_session_check();

        // A reset link takes over the whole screen until it is finished
        if let Some(page) = &mut self.token_reset_page {
            page.show(ctx, &mut self.data_shared);
            if page.is_finished() {
                self.token_reset_page = None;
            }
            ctx.request_repaint_after(std::time::Duration::from_secs(1));
            return;
        }

        self.top_panel(ctx);
        self.bottom_panel(ctx);
        self.show_pages(ctx);

        // Request repaint after 1 second so countdowns keep moving
        ctx.request_repaint_after(std::time::Duration::from_secs(1));
    }
}

impl BackofficeApp {
    /// Called once before the first frame.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        server_url: String,
        reset_token: Option<String>,
    ) -> Self {
        // Load previous app state (if any).
        // Note that you must enable the `persistence` feature for this to work.
        let mut app: BackofficeApp = if let Some(storage) = cc.storage {
            info!("Storage found. Loading...");
            match eframe::get_value(storage, eframe::APP_KEY) {
                Some(value) => {
                    info!("Loaded succeeded");
                    value
                }
                None => {
                    warn!("Load failed");
                    Default::default()
                }
            }
        } else {
            info!("No storage found");
            Default::default()
        };

        app.data_shared.client = backoffice_client_core::Client::new(server_url);
        if let Some(session) = app.data_shared.saved_session.take() {
            debug!("Restoring saved session for {}", session.user.email);
            app.data_shared.client.restore_session(session);
            // The token may have expired while the app was closed
            let rx = app
                .data_shared
                .client
                .current_user(wake_fn(cc.egui_ctx.clone()));
            app.session_check = Some(AwaitingType(rx));
        }
        app.token_reset_page = reset_token.map(UiTokenReset::new);
        app
    }

    fn poll_session_check(&mut self) {
        if let Some(outcome) = poll_in_flight(&mut self.session_check) {
            match outcome {
                Ok(user) => {
                    self.data_shared.email = user.email.as_str().to_string();
                    if let Some(mut session) = self.data_shared.client.session_snapshot() {
                        session.user = user;
                        self.data_shared.client.restore_session(session);
                    }
                }
                Err(e) => {
                    warn!("Stored session rejected by the server: {e}");
                    self.data_shared.client.logout();
                }
            }
        }
    }

    fn is_logged_in(&self) -> bool {
        self.data_shared.is_logged_in()
    }

    fn menu(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.style_mut().wrap_mode = Some(egui::TextWrapMode::Extend);
        self.ui_menu_file(ui, ctx);
        self.ui_menu_pages(ui);
    }

    fn ui_menu_pages(&mut self, ui: &mut egui::Ui) {
        ui.menu_button("Pages", |ui| {
            self.ui_menu_page_btn::<UiProducts>(ui);
            self.ui_menu_page_btn::<UiUsers>(ui);
            self.ui_menu_page_btn::<UiPasswordReset>(ui);

            ui.separator();
            if ui.button("Open All Pages").clicked() {
                self.open_all_pages();
                ui.close_menu();
            }
            if ui.button("Close All Pages").clicked() {
                self.close_all_pages();
                ui.close_menu();
            }
            if ui.button("Deactivate All Pages").clicked() {
                self.deactivate_all_pages();
                ui.close_menu();
            }
            if ui.button("Sort Pages By Name").clicked() {
                self.sort_pages_by_name();
                ui.close_menu();
            }
            if ui.button("Organize Pages").clicked() {
                do_organize_pages(ui);
                ui.close_menu();
            }
        });
    }

    fn top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);
                if self.is_logged_in() {
                    ui.separator();
                    self.menu(ui, ctx);
                }
            });
        });
    }

    fn bottom_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::BOTTOM), |ui| {
                ui.label(self.current_time());
                if self.is_logged_in() {
                    if ui.button("Logout").clicked() {
                        self.logout();
                    }
                    ui.label(format!("Logged in as {}", self.data_shared.email));
                }
                egui::warn_if_debug_build(ui);
            });
        });
    }

    fn show_pages(&mut self, ctx: &egui::Context) {
        if !self.is_logged_in() {
            self.login_page
                .get_or_insert(Default::default())
                .show(ctx, &mut self.data_shared);
        } else {
            self.ui_active_pages_panel(ctx);
            self.login_page = None; // Clear out login page once we are logged in
            for page in self.active_pages.iter_mut() {
                page.display_page(ctx, &mut self.data_shared);
            }
        }
    }

    fn current_time(&self) -> String {
        Timestamp::now().display_as_locale_datetime()
    }

    fn logout(&mut self) {
        self.data_shared.client.logout();
        self.data_shared.saved_session = None;

        // Convert pages to json and back to remove state that should only stay when
        // logged in
        let pages =
            serde_json::to_string(&self.active_pages).expect("failed to parse pages to json");
        self.active_pages =
            serde_json::from_str(&pages).expect("failed to convert back into pages from json");
    }

    fn ui_menu_page_btn<T: DisplayablePage>(&mut self, ui: &mut egui::Ui) {
        if !self.data_shared.has_access::<T>() {
            return;
        }
        let base_title = T::title_base();
        if ui.button(base_title).clicked() {
            let mut max_id_found = None;
            for page in self.active_pages.iter_mut() {
                if page.title_base() == base_title {
                    max_id_found = max_id_found.max(Some(page.page_unique_number()))
                }
            }
            let new_num = if let Some(val) = max_id_found {
                val + 1
            } else {
                0
            };
            self.active_pages
                .push(UiPage::new_page_with_unique_number::<T>(new_num));
            ui.close_menu();
        }
    }

    #[cfg_attr(target_arch = "wasm32", allow(unused_variables))]
    fn ui_menu_file(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.menu_button("File", |ui| {
            // On the web the browser controls the zoom
            #[cfg(not(target_arch = "wasm32"))]
            {
                egui::gui_zoom::zoom_menu_buttons(ui);
                ui.weak(format!(
                    "Current zoom: {:.0}%",
                    100.0 * ui.ctx().zoom_factor()
                ))
                .on_hover_text("The UI zoom level, on top of the operating system's default value");
                ui.separator();
            }

            if ui.button("Logout").clicked() {
                self.logout();
                ui.close_menu();
            }

            #[cfg(not(target_arch = "wasm32"))] // no File->Quit on web pages!
            if ui.button("Quit").clicked() {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }

    fn ui_active_pages_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("side_panel")
            .resizable(false)
            .default_width(200.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("Active Pages");
                });

                ui.separator();

                self.ui_pages_list(ui);
            });
    }

    fn ui_pages_list(&mut self, ui: &mut egui::Ui) {
        ScrollArea::vertical().show(ui, |ui| {
            ui.with_layout(egui::Layout::top_down_justified(egui::Align::LEFT), |ui| {
                if self.active_pages.is_empty() {
                    ui.label("NO PAGES ARE ACTIVE.\nUse top menu to activate a page");
                }
                let mut to_deactivate = Vec::new();
                for (i, page) in self.active_pages.iter_mut().enumerate() {
                    let mut is_open = page.is_page_open();
                    ui.horizontal(|ui| {
                        let is_open_before = is_open;
                        if ui.button("x").clicked() {
                            to_deactivate.push(i); // Mark page for removal
                        }
                        if ui.toggle_value(&mut is_open, page.title()).middle_clicked() {
                            to_deactivate.push(i); // Mark page for removal
                        };
                        if is_open != is_open_before {
                            if is_open {
                                page.open_page();
                            } else {
                                page.close_page();
                            }
                        }
                    });
                }

                // Deactivate marked pages
                to_deactivate.sort_unstable(); // Should already be sorted but put here because it is assumed in following loop
                while let Some(marked_index) = to_deactivate.pop() {
                    self.active_pages.remove(marked_index);
                }

                ui.separator();

                if ui.button("Open All Pages").clicked() {
                    self.open_all_pages();
                }
                if ui.button("Close All Pages").clicked() {
                    self.close_all_pages();
                }
                if ui.button("Deactivate All Pages").clicked() {
                    self.deactivate_all_pages();
                }
                if ui.button("Sort Pages by Name").clicked() {
                    self.sort_pages_by_name();
                }
                if ui.button("Organize Pages").clicked() {
                    do_organize_pages(ui);
                }
            });
        });
    }

    fn deactivate_all_pages(&mut self) {
        self.active_pages.clear();
    }

    fn close_all_pages(&mut self) {
        self.active_pages
            .iter_mut()
            .for_each(|page| page.close_page())
    }

    fn open_all_pages(&mut self) {
        self.active_pages
            .iter_mut()
            .for_each(|page| page.open_page())
    }

    fn sort_pages_by_name(&mut self) {
        self.active_pages.sort_by_key(|x| x.title());
    }
}

fn do_organize_pages(ui: &mut egui::Ui) {
    ui.ctx().memory_mut(|mem| mem.reset_areas());
}

#[inline]
pub fn wake_fn(ctx: egui::Context) -> impl UiCallBack {
    move || ctx.request_repaint()
}

use secrecy::{ExposeSecret as _, SecretString};

pub fn get_text_height(ui: &mut egui::Ui) -> f32 {
    egui::TextStyle::Body
        .resolve(ui.style())
        .size
        .max(ui.spacing().interact_size.y)
}

pub fn ui_password_edit(
    ui: &mut egui::Ui,
    password: &mut SecretString,
    hint_text: &str,
) -> egui::Response {
    let mut temp = password.expose_secret().to_owned();
    let result = ui.add(
        egui::TextEdit::singleline(&mut temp)
            .password(true)
            .hint_text(hint_text),
    );
    *password = SecretString::from(temp);
    result
}

/// Shows an inline error message in the theme's error color
pub fn ui_error_label(ui: &mut egui::Ui, msg: &str) {
    ui.colored_label(ui.visuals().error_fg_color, msg);
}

/// Convenience function to create cancel buttons that also react to Escape
pub fn ui_escape_button(ui: &mut egui::Ui, caption: impl Into<egui::WidgetText>) -> bool {
    ui.button(caption).clicked() || ui.input(|i| i.key_pressed(egui::Key::Escape))
}

// crates/autovid-ui/src/helpers/dialog.rs
//
// Blocking native message boxes. rfd runs them modally on the UI thread,
// which is exactly the "blocking dialog" behaviour the panel wants.

use rfd::{MessageButtons, MessageDialog, MessageLevel};

fn show(level: MessageLevel, title: &str, body: &str) {
    let _ = MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(body)
        .set_buttons(MessageButtons::Ok)
        .show();
}

pub fn info(title: &str, body: &str) {
    show(MessageLevel::Info, title, body);
}

pub fn warning(title: &str, body: &str) {
    show(MessageLevel::Warning, title, body);
}

pub fn error(title: &str, body: &str) {
    show(MessageLevel::Error, title, body);
}

use discovery::landing::Host;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::files;

/// `Host` backed by the real browser window.
///
/// The result container and the contact form are captured as node refs when
/// the page is built, so lookups never go through ambient globals.
pub(super) struct BrowserHost {
    result: NodeRef<html::Div>,
    form: NodeRef<html::Form>,
}

impl BrowserHost {
    pub(super) fn new(result: NodeRef<html::Div>, form: NodeRef<html::Form>) -> Self {
        Self { result, form }
    }
}

impl Host for BrowserHost {
    type File = web_sys::File;
    type SubmitEvent = web_sys::SubmitEvent;

    fn alert(&self, message: &str) {
        if let Some(w) = web_sys::window() {
            let _ = w.alert_with_message(message);
        }
    }

    fn read_as_data_url(&self, file: web_sys::File, on_load: Box<dyn FnOnce(String)>) {
        if let Err(e) = files::read_as_data_url(&file, on_load) {
            files::warn(&e);
        }
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        let Some(window) = web_sys::window() else {
            files::warn("timer: no window");
            return;
        };
        let cb = Closure::once_into_js(move || callback());
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        if window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay)
            .is_err()
        {
            files::warn("timer: setTimeout failed");
        }
    }

    fn set_result_html(&self, html: &str) {
        match self.result.get_untracked() {
            Some(el) => el.set_inner_html(html),
            None => files::warn("result container is not mounted"),
        }
    }

    fn prevent_default(&self, event: &web_sys::SubmitEvent) {
        event.prevent_default();
    }

    fn reset_contact_form(&self) {
        if let Some(form) = self.form.get_untracked() {
            form.reset();
        }
    }
}

//! Landing page controller.
//!
//! The page has two interactive pieces: an upload button that produces a
//! simulated product discovery, and a contact form that only acknowledges
//! the submission. Both handlers talk to the platform through [`Host`], so the
//! same controller drives the browser build and the deterministic [`SimHost`]
//! used in tests.
//!
//! [`SimHost`]: crate::sim::SimHost

use std::rc::Rc;

use tracing::debug;

/// Clickable control that starts the simulated discovery.
pub const UPLOAD_BUTTON_ID: &str = "upload-btn";
/// File picker read by the upload handler.
pub const UPLOAD_INPUT_ID: &str = "upload";
/// Container whose inner markup is replaced with the discovery result.
pub const RESULT_ID: &str = "result";
/// Contact form bound to the submit handler.
pub const CONTACT_FORM_ID: &str = "contact-form";

pub const MISSING_FILE_NOTICE: &str = "Please upload an image file.";
pub const MESSAGE_SENT_NOTICE: &str = "Message sent!";

/// Delay between a completed read and the result being shown.
pub const DISCOVERY_DELAY_MS: u32 = 2000;

/// Markup written into the result container. Independent of the file content.
pub const DISCOVERY_MARKUP: &str = "<p>Product discovered: Example Product</p>";

/// Platform facilities the controller needs.
///
/// Every callback is single-shot and fire-and-forget: the host keeps no handle
/// the controller could use to cancel it. Hosts run on one thread, so handlers
/// and callbacks never overlap.
pub trait Host {
    /// Opaque blob reference handed out by the file picker.
    type File;
    /// Default submission event of the contact form.
    type SubmitEvent;

    /// Blocking, user-facing notice.
    fn alert(&self, message: &str);

    /// Starts reading `file` as a data URI. `on_load` runs once when the read
    /// succeeds and is dropped without running if it fails.
    fn read_as_data_url(&self, file: Self::File, on_load: Box<dyn FnOnce(String)>);

    /// Runs `callback` once after `delay_ms`.
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>);

    /// Replaces the inner markup of the result container.
    fn set_result_html(&self, html: &str);

    fn prevent_default(&self, event: &Self::SubmitEvent);

    /// Returns every contact form field to its default value.
    fn reset_contact_form(&self);
}

/// What a click on the upload button did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Nothing was selected; the missing-file notice was shown.
    MissingFile,
    /// A read of the first selected file is in flight.
    ReadStarted,
}

/// Event handlers for the landing page, bound to one host.
pub struct LandingController<H> {
    host: Rc<H>,
}

impl<H> Clone for LandingController<H> {
    fn clone(&self) -> Self {
        Self {
            host: Rc::clone(&self.host),
        }
    }
}

impl<H: Host + 'static> LandingController<H> {
    pub fn new(host: Rc<H>) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Upload button handler.
    ///
    /// Only the first file of `selection` is considered. A successful read
    /// schedules the result update after [`DISCOVERY_DELAY_MS`]; earlier
    /// pending updates are left alone, so the last one to fire wins.
    pub fn on_upload_click<I>(&self, selection: I) -> UploadOutcome
    where
        I: IntoIterator<Item = H::File>,
    {
        let Some(file) = selection.into_iter().next() else {
            debug!("upload clicked without a file");
            self.host.alert(MISSING_FILE_NOTICE);
            return UploadOutcome::MissingFile;
        };

        debug!("upload clicked; reading file as data URI");
        let host = Rc::clone(&self.host);
        self.host.read_as_data_url(
            file,
            Box::new(move |data_url: String| {
                // The payload only stands in for an upload; it is never sent.
                debug!(len = data_url.len(), "file read complete; scheduling discovery");
                let target = Rc::clone(&host);
                host.set_timeout(
                    DISCOVERY_DELAY_MS,
                    Box::new(move || {
                        debug!("discovery delay elapsed; updating result");
                        target.set_result_html(DISCOVERY_MARKUP);
                    }),
                );
            }),
        );
        UploadOutcome::ReadStarted
    }

    /// Contact form submit handler. Nothing is transmitted.
    pub fn on_contact_submit(&self, event: &H::SubmitEvent) {
        self.host.prevent_default(event);
        debug!("contact form submitted");
        self.host.alert(MESSAGE_SENT_NOTICE);
        self.host.reset_contact_form();
    }
}

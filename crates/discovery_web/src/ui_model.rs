//! Page inventory and copy that should be available on both wasm and native.
//!
//! Keeping these out of the wasm-only `web` module allows us to unit-test the
//! section and form layout on the host.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSection {
    #[default]
    Hero,
    Discover,
    Contact,
}

impl PageSection {
    pub fn label(self) -> &'static str {
        match self {
            PageSection::Hero => "Home",
            PageSection::Discover => "Discover",
            PageSection::Contact => "Contact",
        }
    }

    /// Anchor id of the `<section>`. Must not collide with the controller's element ids.
    pub fn anchor(self) -> &'static str {
        match self {
            PageSection::Hero => "home",
            PageSection::Discover => "discover",
            PageSection::Contact => "contact",
        }
    }

    pub fn href(self) -> String {
        format!("#{}", self.anchor())
    }

    pub fn heading(self) -> &'static str {
        match self {
            PageSection::Hero => "Find any product from a photo",
            PageSection::Discover => "Upload a picture",
            PageSection::Contact => "Get in touch",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            PageSection::Hero => "Snap a picture of something you like and we'll tell you what it is.",
            PageSection::Discover => "Choose an image file and press Discover. Results show up below in a couple of seconds.",
            PageSection::Contact => "Questions, feedback or partnership ideas? Drop us a line.",
        }
    }

    pub fn all() -> &'static [PageSection] {
        &[PageSection::Hero, PageSection::Discover, PageSection::Contact]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    /// Form control `name` attribute.
    pub fn name(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Message => "message",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContactField::Name => "Name",
            ContactField::Email => "Email",
            ContactField::Message => "Message",
        }
    }

    pub fn input_type(self) -> &'static str {
        match self {
            ContactField::Name => "text",
            ContactField::Email => "email",
            ContactField::Message => "text",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            ContactField::Name => "Your name",
            ContactField::Email => "you@example.com",
            ContactField::Message => "How can we help?",
        }
    }

    /// Rendered as a `<textarea>` instead of an `<input>`.
    pub fn multiline(self) -> bool {
        matches!(self, ContactField::Message)
    }

    pub fn all() -> &'static [ContactField] {
        &[ContactField::Name, ContactField::Email, ContactField::Message]
    }
}

pub const UPLOAD_BUTTON_LABEL: &str = "Discover";
pub const CONTACT_SUBMIT_LABEL: &str = "Send";
pub const UPLOAD_ACCEPT: &str = "image/*";

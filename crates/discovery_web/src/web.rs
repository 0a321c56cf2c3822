use std::rc::Rc;

use discovery::landing::{self, LandingController};
use leptos::html;
use leptos::prelude::*;

use crate::ui_model::{
    ContactField, PageSection, CONTACT_SUBMIT_LABEL, UPLOAD_ACCEPT, UPLOAD_BUTTON_LABEL,
};

mod files;
mod host;

use host::BrowserHost;

pub fn start() {
    mount_to_body(|| view! { <App /> });
}

#[component]
fn App() -> impl IntoView {
    let upload_ref: NodeRef<html::Input> = NodeRef::new();
    let result_ref: NodeRef<html::Div> = NodeRef::new();
    let form_ref: NodeRef<html::Form> = NodeRef::new();

    let controller = LandingController::new(Rc::new(BrowserHost::new(result_ref, form_ref)));

    let on_upload = {
        let controller = controller.clone();
        move |_ev: leptos::ev::MouseEvent| {
            let selection = upload_ref
                .get_untracked()
                .and_then(|input| files::first_selected_file(&input));
            controller.on_upload_click(selection);
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        controller.on_contact_submit(&ev);
    };

    view! {
        <header class="topbar">
            <span class="brand">"Product Discovery"</span>
            <nav>
                {PageSection::all()
                    .iter()
                    .map(|s| view! { <a href=s.href()>{s.label()}</a> })
                    .collect_view()}
            </nav>
        </header>
        <main>
            <SectionIntro section=PageSection::Hero />

            <section id=PageSection::Discover.anchor() class="card">
                <h2>{PageSection::Discover.heading()}</h2>
                <p class="subtle">{PageSection::Discover.blurb()}</p>
                <div class="row">
                    <input
                        type="file"
                        id=landing::UPLOAD_INPUT_ID
                        accept=UPLOAD_ACCEPT
                        node_ref=upload_ref
                    />
                    <button id=landing::UPLOAD_BUTTON_ID class="btn" on:click=on_upload>
                        {UPLOAD_BUTTON_LABEL}
                    </button>
                </div>
                <div id=landing::RESULT_ID class="result" node_ref=result_ref></div>
            </section>

            <section id=PageSection::Contact.anchor() class="card">
                <h2>{PageSection::Contact.heading()}</h2>
                <p class="subtle">{PageSection::Contact.blurb()}</p>
                <form id=landing::CONTACT_FORM_ID node_ref=form_ref on:submit=on_submit>
                    {ContactField::all().iter().copied().map(contact_field).collect_view()}
                    <button type="submit" class="btn">{CONTACT_SUBMIT_LABEL}</button>
                </form>
            </section>
        </main>
    }
}

#[component]
fn SectionIntro(section: PageSection) -> impl IntoView {
    view! {
        <section id=section.anchor() class="hero">
            <h1>{section.heading()}</h1>
            <p>{section.blurb()}</p>
            <a class="btn" href=PageSection::Discover.href()>"Try it"</a>
        </section>
    }
}

fn contact_field(field: ContactField) -> impl IntoView {
    // Fields stay uncontrolled so a native form reset clears them.
    let control = if field.multiline() {
        view! {
            <textarea name=field.name() placeholder=field.placeholder() rows="4"></textarea>
        }
        .into_any()
    } else {
        view! {
            <input
                type=field.input_type()
                name=field.name()
                placeholder=field.placeholder()
            />
        }
        .into_any()
    };

    view! {
        <label class="field">
            <span>{field.label()}</span>
            {control}
        </label>
    }
}

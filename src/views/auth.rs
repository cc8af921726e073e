// ============================================================================
// AUTH VIEWS - Login y registro
// ============================================================================
// Los valores del formulario viven en `AuthFields` para sobrevivir a los
// re-renders (el #app se reconstruye entero en cada cambio de estado).
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{on_input, on_submit, ElementBuilder};
use crate::router::Route;
use crate::viewmodels::AuthViewModel;
use super::common::{form_group, link};

#[derive(Clone, Default)]
pub struct AuthFields {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub type SharedFields = Rc<RefCell<AuthFields>>;

fn text_input(
    id: &str,
    input_type: &str,
    value: &str,
    fields: &SharedFields,
    apply: fn(&mut AuthFields, String),
) -> Result<Element, JsValue> {
    let input = ElementBuilder::new("input")?
        .id(id)?
        .class("form-input")
        .attr("type", input_type)?
        .attr("value", value)?
        .attr("required", "")?
        .build();
    let fields = fields.clone();
    on_input(&input, move |v| apply(&mut fields.borrow_mut(), v))?;
    Ok(input)
}

fn submit_button(label: &str, busy_label: &str, busy: bool) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .class("btn btn-primary btn-block")
        .attr("type", "submit")?
        .flag("disabled", busy)?
        .text(if busy { busy_label } else { label })
        .build())
}

fn error_box(vm: &AuthViewModel) -> Result<Option<Element>, JsValue> {
    match vm.error() {
        Some(message) => Ok(Some(ElementBuilder::new("div")?.class("form-error").text(&message).build())),
        None => Ok(None),
    }
}

fn auth_card(title: &str, form: Element, footer: Element) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("div")?
        .class("auth-card")
        .child(ElementBuilder::new("h1")?.class("auth-title").text(title).build())?
        .child(form)?
        .child(footer)?
        .build();
    ElementBuilder::new("div")?.class("auth-page").child(card).map(ElementBuilder::build)
}

pub fn render_login(vm: &AuthViewModel, fields: &SharedFields) -> Result<Element, JsValue> {
    let current = fields.borrow().clone();
    let form = ElementBuilder::new("form")?.class("auth-form").build();
    if let Some(error) = error_box(vm)? {
        form.append_child(&error)?;
    }
    form.append_child(&form_group(
        "Email",
        "login-email",
        text_input("login-email", "email", &current.email, fields, |f, v| f.email = v)?,
    )?)?;
    form.append_child(&form_group(
        "Password",
        "login-password",
        text_input("login-password", "password", &current.password, fields, |f, v| f.password = v)?,
    )?)?;
    form.append_child(&submit_button("Login", "Signing in...", vm.is_submitting())?)?;

    {
        let vm = vm.clone();
        let fields = fields.clone();
        on_submit(&form, move || {
            if vm.is_submitting() {
                return;
            }
            let AuthFields { email, password, .. } = fields.borrow().clone();
            let vm = vm.clone();
            spawn_local(async move {
                // El error ya queda en el viewmodel y en el aviso
                let _ = vm.login(&email, &password).await;
            });
        })?;
    }

    let footer = ElementBuilder::new("p")?
        .class("auth-footer")
        .text("Don't have an account? ")
        .child(link("Sign up", Route::Register, "")?)?
        .build();
    auth_card("Login", form, footer)
}

pub fn render_register(vm: &AuthViewModel, fields: &SharedFields) -> Result<Element, JsValue> {
    let current = fields.borrow().clone();
    let form = ElementBuilder::new("form")?.class("auth-form").build();
    if let Some(error) = error_box(vm)? {
        form.append_child(&error)?;
    }
    form.append_child(&form_group(
        "Name",
        "register-name",
        text_input("register-name", "text", &current.name, fields, |f, v| f.name = v)?,
    )?)?;
    form.append_child(&form_group(
        "Email",
        "register-email",
        text_input("register-email", "email", &current.email, fields, |f, v| f.email = v)?,
    )?)?;
    form.append_child(&form_group(
        "Password",
        "register-password",
        text_input("register-password", "password", &current.password, fields, |f, v| f.password = v)?,
    )?)?;
    form.append_child(&submit_button("Create account", "Creating account...", vm.is_submitting())?)?;

    {
        let vm = vm.clone();
        let fields = fields.clone();
        on_submit(&form, move || {
            if vm.is_submitting() {
                return;
            }
            let AuthFields { name, email, password } = fields.borrow().clone();
            let vm = vm.clone();
            spawn_local(async move {
                let _ = vm.register(&name, &email, &password).await;
            });
        })?;
    }

    let footer = ElementBuilder::new("p")?
        .class("auth-footer")
        .text("Already have an account? ")
        .child(link("Login", Route::Login, "")?)?
        .build();
    auth_card("Create an account", form, footer)
}

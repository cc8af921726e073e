// ============================================================================
// REPORT VIEW - Formulario de nuevo issue con selector en el mapa
// ============================================================================

use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Element, File, HtmlInputElement};
use crate::dom::{get_element_by_id, on_change, on_input, on_submit, set_text_content, ElementBuilder};
use crate::models::{Coordinates, ImageUpload, IssueCategory};
use crate::viewmodels::ReportViewModel;
use super::common::{category_select, form_group, page_title};
use super::map_widgets;

const PICKER_MAP_ID: &str = "report-map";
const LOCATION_TEXT_ID: &str = "report-location";

fn location_text(location: Option<Coordinates>) -> String {
    match location {
        Some(p) => format!("Selected: {:.5}, {:.5}", p.latitude, p.longitude),
        None => "Click on the map to mark the location".to_string(),
    }
}

pub fn render_report(vm: &ReportViewModel) -> Result<Element, JsValue> {
    let form_values = vm.form();
    let busy = vm.is_submitting();
    let form = ElementBuilder::new("form")?.class("report-form card").build();

    // Título
    let title = ElementBuilder::new("input")?
        .id("report-title")?
        .class("form-input")
        .attr("type", "text")?
        .attr("placeholder", "Brief summary of the issue")?
        .attr("value", &form_values.title)?
        .build();
    {
        let vm = vm.clone();
        on_input(&title, move |v| vm.set_title(v))?;
    }
    form.append_child(&form_group("Title", "report-title", title)?)?;

    // Descripción
    let description = ElementBuilder::new("textarea")?
        .id("report-description")?
        .class("form-input")
        .attr("rows", "5")?
        .attr("placeholder", "Describe the issue in detail")?
        .text(&form_values.description)
        .build();
    {
        let vm = vm.clone();
        on_input(&description, move |v| vm.set_description(v))?;
    }
    form.append_child(&form_group("Description", "report-description", description)?)?;

    // Categoría
    let category = category_select("report-category", Some(form_values.category), None)?;
    {
        let vm = vm.clone();
        on_change(&category, move |v| {
            if let Ok(category) = v.parse::<IssueCategory>() {
                vm.set_category(category);
            }
        })?;
    }
    form.append_child(&form_group("Category", "report-category", category)?)?;

    // Ubicación
    let map = ElementBuilder::new("div")?.id(PICKER_MAP_ID)?.class("map-container").build();
    let location = ElementBuilder::new("p")?
        .id(LOCATION_TEXT_ID)?
        .class("form-hint")
        .text(&location_text(form_values.location))
        .build();
    let location_group = ElementBuilder::new("div")?
        .class("form-group")
        .child(ElementBuilder::new("label")?.text("Location").build())?
        .child(map)?
        .child(location)?
        .build();
    form.append_child(&location_group)?;
    {
        let vm = vm.clone();
        map_widgets::schedule_picker(PICKER_MAP_ID, form_values.location, move |point| {
            vm.set_location(point);
            if let Some(text) = get_element_by_id(LOCATION_TEXT_ID) {
                set_text_content(&text, &location_text(Some(point)));
            }
        });
    }

    // Imagen opcional
    let image = ElementBuilder::new("input")?
        .id("report-image")?
        .class("form-input")
        .attr("type", "file")?
        .attr("accept", "image/*")?
        .build();
    {
        let vm = vm.clone();
        let input = image.clone();
        on_change(&image, move |_| {
            let file = input
                .dyn_ref::<HtmlInputElement>()
                .and_then(|i| i.files())
                .and_then(|files| files.get(0));
            let vm = vm.clone();
            match file {
                Some(file) => spawn_local(async move {
                    match read_upload(file).await {
                        Ok(upload) => vm.set_image(Some(upload)),
                        Err(e) => log::error!("❌ [REPORT] No se pudo leer la imagen: {:?}", e),
                    }
                }),
                None => vm.set_image(None),
            }
        })?;
    }
    let image_group = form_group("Image (optional)", "report-image", image)?;
    if let Some(upload) = &form_values.image {
        let current = ElementBuilder::new("p")?
            .class("form-hint")
            .text(&format!("Attached: {}", upload.file_name))
            .build();
        image_group.append_child(&current)?;
    }
    form.append_child(&image_group)?;

    let submit = ElementBuilder::new("button")?
        .class("btn btn-primary btn-block")
        .attr("type", "submit")?
        .flag("disabled", busy)?
        .text(if busy { "Submitting..." } else { "Submit Report" })
        .build();
    form.append_child(&submit)?;

    {
        let vm = vm.clone();
        on_submit(&form, move || {
            if vm.is_submitting() {
                return;
            }
            let vm = vm.clone();
            spawn_local(async move {
                // El error ya se muestra como aviso
                let _ = vm.submit().await;
            });
        })?;
    }

    ElementBuilder::new("div")?
        .class("report-page")
        .child(page_title("Report an Issue")?)?
        .child(form)
        .map(ElementBuilder::build)
}

/// Bytes del fichero elegido (File -> ArrayBuffer -> Vec<u8>)
async fn read_upload(file: File) -> Result<ImageUpload, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    let content_type = if file.type_().is_empty() {
        "application/octet-stream".to_string()
    } else {
        file.type_()
    };
    log::debug!("🖼️ [REPORT] Imagen {} ({} bytes)", file.name(), bytes.len());
    Ok(ImageUpload {
        file_name: file.name(),
        content_type,
        bytes,
    })
}

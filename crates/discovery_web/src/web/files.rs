use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub(super) fn first_selected_file(input: &web_sys::HtmlInputElement) -> Option<web_sys::File> {
    input.files()?.get(0)
}

/// Reads `file` as a data URI and hands the result to `on_load`.
///
/// `on_load` is dropped without running if the read fails; the failure is only
/// reported to the console.
pub(super) fn read_as_data_url(
    file: &web_sys::File,
    on_load: Box<dyn FnOnce(String)>,
) -> Result<(), String> {
    let reader =
        web_sys::FileReader::new().map_err(|_| "file: FileReader::new failed".to_string())?;

    let reader_ok = reader.clone();
    let onload = Closure::once_into_js(move |_ev: web_sys::ProgressEvent| {
        match reader_ok.result() {
            Ok(v) => match v.as_string() {
                Some(url) => on_load(url),
                None => warn("file: result is not a data url"),
            },
            Err(_) => warn("file: result() threw"),
        }
    });
    reader.set_onload(Some(onload.unchecked_ref()));

    let onerror = Closure::once_into_js(move |_ev: web_sys::ProgressEvent| {
        warn("file: read error");
    });
    reader.set_onerror(Some(onerror.unchecked_ref()));

    reader
        .read_as_data_url(file)
        .map_err(|_| "file: read_as_data_url failed".to_string())
}

pub(super) fn warn(msg: &str) {
    web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(msg));
}

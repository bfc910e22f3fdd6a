//! Thin wrappers over the browser APIs the views need. Outside the browser
//! (unit tests, tooling) every call degrades to a log line.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

/// Client-side navigation by replacing the current location.
pub fn redirect(path: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!("redirect to {} skipped outside the browser", path);
    }
}

/// Blocking message box.
pub fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::info!("alert: {}", message);
    }
}

/// Blocking ok/cancel prompt. Answers false outside the browser.
pub fn confirm(message: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!("confirm \"{}\" answered false outside the browser", message);
        false
    }
}

#[cfg(target_arch = "wasm32")]
fn anchor_click(url: &str, file_name: &str, new_tab: bool) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let Ok(element) = document.create_element("a") else {
        return;
    };
    let Ok(anchor) = element.dyn_into::<web_sys::HtmlAnchorElement>() else {
        return;
    };
    anchor.set_href(url);
    anchor.set_download(file_name);
    if new_tab {
        anchor.set_target("_blank");
    }
    if let Some(body) = document.body() {
        let _ = body.append_child(&anchor);
        anchor.click();
        anchor.remove();
    }
}

/// Download a file that carries a direct URL via a transient anchor click.
pub fn download_url(url: &str, file_name: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        anchor_click(url, file_name, true);
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!("download of {} ({}) skipped outside the browser", file_name, url);
    }
}

/// Download fetched bytes by synthesizing an object URL, revoked as soon as
/// the click has been dispatched.
pub fn download_bytes(bytes: &[u8], file_name: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let array = js_sys::Uint8Array::from(bytes);
        let parts = js_sys::Array::of1(&array.into());
        let Ok(blob) = web_sys::Blob::new_with_u8_array_sequence(&parts) else {
            return;
        };
        let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) else {
            return;
        };
        anchor_click(&url, file_name, false);
        let _ = web_sys::Url::revoke_object_url(&url);
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!(
            "download of {} ({} bytes) skipped outside the browser",
            file_name,
            bytes.len()
        );
    }
}

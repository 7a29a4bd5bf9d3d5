use shared::{Downloader, ObjectUrls, RenderError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlAnchorElement, Url};

fn describe(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// `URL.createObjectURL` plus an `<a download>` click.
pub struct BrowserUrls;

impl ObjectUrls for BrowserUrls {
    type Blob = web_sys::Blob;

    fn create(&self, blob: &web_sys::Blob) -> Result<String, RenderError> {
        Url::create_object_url_with_blob(blob).map_err(|e| RenderError::ObjectUrl(describe(e)))
    }

    fn revoke(&self, url: &str) {
        if let Err(e) = Url::revoke_object_url(url) {
            log::warn!("Failed to revoke {}: {}", url, describe(e));
        }
    }
}

impl Downloader for BrowserUrls {
    fn download(&self, url: &str, filename: &str) -> Result<(), RenderError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| RenderError::Download("no document available".into()))?;

        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|e| RenderError::Download(describe(e)))?
            .dyn_into()
            .map_err(|_| RenderError::Download("created element is not an anchor".into()))?;

        anchor.set_href(url);
        anchor.set_download(filename);
        anchor.click();
        Ok(())
    }
}

/// Blocking browser alert, used for validation failures.
pub fn alert(message: &str) {
    match web_sys::window() {
        Some(window) => {
            if window.alert_with_message(message).is_err() {
                log::warn!("Alert suppressed: {}", message);
            }
        }
        None => log::warn!("No window for alert: {}", message),
    }
}

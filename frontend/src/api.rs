use gloo_console::error;
use gloo_file::{Blob as GlooBlob, ObjectUrl};
use gloo_net::http::{Request, Response};
use shared::{download_blob, EncodedImage, Endpoint, ResponseKind, UploadRequest, DOWNLOAD_FILENAME};
use wasm_bindgen_futures::spawn_local;
use yew::html::Scope;

use super::browser::BrowserUrls;
use super::config::api_base;
use super::{BlobMode, Model, Msg, PickedFile, RenderedImage};

/// A successful reply, already read off the wire.
enum Reply {
    Encoded(EncodedImage),
    Blob { bytes: Vec<u8>, mime: Option<String> },
}

fn js_error(value: wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

async fn post_form(request: &UploadRequest<PickedFile>) -> Result<Response, String> {
    let form_data = web_sys::FormData::new().map_err(js_error)?;
    for (name, value) in request.text_fields() {
        form_data.append_with_str(name, &value).map_err(js_error)?;
    }
    let file = &request.file.0;
    form_data
        .append_with_blob_and_filename(shared::FIELD_FILE, file.as_ref(), &file.name())
        .map_err(js_error)?;

    let url = request.endpoint.url(api_base());
    let response = Request::post(&url)
        .body(form_data)
        .map_err(|e| format!("Failed to build request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let status = response.status();
        let status_text = response.status_text();
        let body = response.text().await.unwrap_or_default();
        return Err(format!("Server error: {} {} - {}", status, status_text, body));
    }

    Ok(response)
}

async fn read_reply(response: Response, kind: ResponseKind) -> Result<Reply, String> {
    match kind {
        ResponseKind::EncodedJson => {
            let text = response
                .text()
                .await
                .map_err(|e| format!("Failed to read response: {}", e))?;
            let encoded = serde_json::from_str::<EncodedImage>(&text)
                .map_err(|e| format!("Failed to parse response: {}", e))?;
            Ok(Reply::Encoded(encoded))
        }
        ResponseKind::RawBlob => {
            let mime = response.headers().get("content-type");
            let bytes = response
                .binary()
                .await
                .map_err(|e| format!("Failed to read response: {}", e))?;
            Ok(Reply::Blob { bytes, mime })
        }
    }
}

fn render_reply(reply: Reply, blob_mode: BlobMode) -> Result<Msg, String> {
    match reply {
        Reply::Encoded(encoded) => Ok(Msg::ImageReady(RenderedImage::Inline(encoded.data_uri()))),
        Reply::Blob { bytes, mime } => {
            let blob = GlooBlob::new_with_options(bytes.as_slice(), mime.as_deref());
            match blob_mode {
                BlobMode::Download => {
                    download_blob(&BrowserUrls, blob.as_ref(), DOWNLOAD_FILENAME)
                        .map_err(|e| e.to_string())?;
                    Ok(Msg::Downloaded)
                }
                BlobMode::Display => Ok(Msg::ImageReady(RenderedImage::Blob(ObjectUrl::from(blob)))),
            }
        }
    }
}

/// Sends one validated submission. Every call issues its own request; there
/// is no de-duplication of overlapping submissions.
pub fn send_upload(link: Scope<Model>, request: UploadRequest<PickedFile>, blob_mode: BlobMode) {
    let endpoint: Endpoint = request.endpoint;
    log::info!(
        "Uploading {} to {} with h = {}",
        request.file.0.name(),
        endpoint.path(),
        request.threshold
    );

    spawn_local(async move {
        let outcome = match post_form(&request).await {
            Ok(response) => read_reply(response, endpoint.response_kind())
                .await
                .and_then(|reply| render_reply(reply, blob_mode)),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(msg) => link.send_message(msg),
            Err(message) => {
                error!(format!("Error fetching data: {}", message));
                link.send_message(Msg::RequestFailed(endpoint, message));
            }
        }
    });
}

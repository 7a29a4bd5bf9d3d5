mod api;
mod browser;
mod components;
mod config;

use components::{gallery, handlers, header, results, upload_section, utils};
use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{Endpoint, ResultSlot, UploadFile};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

// Models
#[derive(Clone)]
struct PickedFile(GlooFile);

impl UploadFile for PickedFile {
    fn file_name(&self) -> String {
        self.0.name()
    }
}

/// What the blob endpoint does with the returned image.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
enum BlobMode {
    #[default]
    Download,
    Display,
}

/// The image currently shown in the result slot. A blob URL is revoked
/// when this value is replaced or dropped.
enum RenderedImage {
    Inline(String),
    Blob(ObjectUrl),
}

impl RenderedImage {
    fn src(&self) -> String {
        match self {
            RenderedImage::Inline(data_uri) => data_uri.clone(),
            RenderedImage::Blob(url) => url.to_string(),
        }
    }
}

// Yew msg components
enum Msg {
    // Form fields
    SetThreshold(String),
    FileChosen(GlooFile),
    SetEndpoint(Endpoint),
    SetBlobMode(BlobMode),

    // Upload lifecycle
    Submit,
    ImageReady(RenderedImage),
    Downloaded,
    RequestFailed(Endpoint, String),

    // UI states
    SetError(Option<String>),
    SetDragging(bool),

    // Input events
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

// Main component
struct Model {
    h_input: String,
    file: Option<PickedFile>,
    endpoint: Endpoint,
    blob_mode: BlobMode,
    slot: ResultSlot<RenderedImage>,
    is_dragging: bool,
    paste_listener: Option<EventListener>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut model = Self {
            h_input: String::new(),
            file: None,
            endpoint: Endpoint::default(),
            blob_mode: BlobMode::default(),
            slot: ResultSlot::default(),
            is_dragging: false,
            paste_listener: None,
        };

        let link = ctx.link().clone();
        if let Some(window) = web_sys::window() {
            let listener = EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            });
            model.paste_listener = Some(listener);
        }

        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // Form fields
            Msg::SetThreshold(value) => handlers::handle_threshold_input(self, value),
            Msg::FileChosen(file) => handlers::handle_file_chosen(self, file),
            Msg::SetEndpoint(endpoint) => handlers::handle_endpoint_changed(self, endpoint),
            Msg::SetBlobMode(mode) => {
                self.blob_mode = mode;
                true
            }

            // Upload lifecycle
            Msg::Submit => handlers::handle_submit(self, ctx),
            Msg::ImageReady(image) => handlers::handle_image_ready(self, image),
            Msg::Downloaded => handlers::handle_downloaded(self),
            Msg::RequestFailed(endpoint, message) => {
                handlers::handle_request_failed(self, endpoint, message)
            }

            // UI states
            Msg::SetError(error) => {
                self.slot.set_error(error);
                true
            }
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }

            // Input events
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(self, ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { header::render_header() }

                <main class="main-content">
                    <section class="upload-row">
                        { upload_section::render_upload_section(self, ctx) }
                        { results::render_results(self) }
                    </section>
                    { utils::render_error_message(self) }
                    { gallery::render_gallery() }
                </main>

                <footer class="app-footer">
                    <small>{"Reflection Remover | Fullstack Rust WASM"}</small>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting against {}", config::api_base());
    yew::Renderer::<Model>::new().render();
}

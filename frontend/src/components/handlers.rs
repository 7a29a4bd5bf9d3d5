use super::super::{Model, Msg, PickedFile, RenderedImage};
use super::utils::first_image_file;
use crate::api::send_upload;
use crate::browser::alert;
use gloo_file::File as GlooFile;
use shared::{Endpoint, FormInput};
use web_sys::{ClipboardEvent, DragEvent, FileList};
use yew::prelude::*;

const UPLOAD_FAILED_ALERT: &str = "An error occurred while uploading the image";

pub fn handle_threshold_input(model: &mut Model, value: String) -> bool {
    model.h_input = value;
    true
}

pub fn handle_file_chosen(model: &mut Model, file: GlooFile) -> bool {
    log::info!("Selected {} ({} bytes)", file.name(), file.size());
    model.file = Some(PickedFile(file));
    model.slot.set_error(None);
    true
}

pub fn handle_endpoint_changed(model: &mut Model, endpoint: Endpoint) -> bool {
    model.endpoint = endpoint;
    model.slot.set_error(None);
    true
}

/// Validates the form and, only if it passes, sends one request.
pub fn handle_submit(model: &mut Model, ctx: &Context<Model>) -> bool {
    let input = FormInput {
        h: Some(model.h_input.clone()),
        file: model.file.clone(),
    };

    match model.slot.submit(&input, model.endpoint) {
        Ok(request) => send_upload(ctx.link().clone(), request, model.blob_mode),
        Err(e) => {
            log::warn!("Submission blocked: {}", e);
            alert(&e.to_string());
        }
    }
    true
}

pub fn handle_image_ready(model: &mut Model, image: RenderedImage) -> bool {
    model.slot.succeed(image);
    true
}

pub fn handle_downloaded(model: &mut Model) -> bool {
    model.slot.complete();
    log::info!("Processed image downloaded");
    true
}

pub fn handle_request_failed(model: &mut Model, endpoint: Endpoint, message: String) -> bool {
    if endpoint == Endpoint::Upload {
        alert(UPLOAD_FAILED_ALERT);
    }
    model.slot.fail(message);
    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(data_transfer) = event.data_transfer() {
        if let Some(file_list) = data_transfer.files() {
            process_file_list(ctx, file_list);
        }
    }

    true
}

pub fn handle_paste(_model: &mut Model, ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if let Some(data_transfer) = event.clipboard_data() {
        if let Some(file_list) = data_transfer.files() {
            if file_list.length() > 0 {
                event.prevent_default();
                process_file_list(ctx, file_list);
                return true;
            }
        }
    }
    false
}

pub fn process_file_list(ctx: &Context<Model>, file_list: FileList) {
    match first_image_file(&file_list) {
        Some(file) => ctx.link().send_message(Msg::FileChosen(file)),
        None => {
            log::warn!("Skipping drop/paste without an image file");
            ctx.link().send_message(Msg::SetError(Some("Only image files can be uploaded.".into())));
        }
    }
}

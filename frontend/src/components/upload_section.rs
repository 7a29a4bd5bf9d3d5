use super::super::{BlobMode, Model, Msg};
use super::utils::{debounce, first_image_file};
use shared::Endpoint;
use strum::IntoEnumIterator;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let on_submit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });
    let on_threshold = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SetThreshold(input.value())
    });

    html! {
        <div class="upload-card">
            <h2>{"Upload Image"}</h2>
            <p class="subtitle">{"Set the params and remove reflections!"}</p>
            <form id="uploadForm" onsubmit={on_submit}>
                <label for="h">{"H Value"}</label>
                <input
                    id="h"
                    name="h"
                    value={model.h_input.clone()}
                    placeholder="Enter a threshold value between 0 and 1"
                    oninput={on_threshold}
                />

                <label for="file">{"Picture"}</label>
                { render_file_input_area(model, ctx) }

                { render_endpoint_select(model, ctx) }
            </form>
            <button form="uploadForm" type="submit" class="analyze-btn">
                {"✨ Remove Reflections"}
            </button>
        </div>
    }
}

fn render_file_input_area(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let handle_change = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().as_ref().and_then(first_image_file);

        input.set_value("");

        match file {
            Some(file) => Msg::FileChosen(file),
            None => Msg::SetError(Some("No valid image file selected.".into())),
        }
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);
    let trigger_file_input = Callback::from(|_| {
        if let Some(input) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("file"))
        {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    });

    let chosen = model
        .file
        .as_ref()
        .map(|file| file.0.name())
        .unwrap_or_else(|| "Drag & drop, paste, or click to choose an image".to_string());

    html! {
        <>
            <input
                type="file"
                id="file"
                name="file"
                accept="image/*"
                style="display: none;"
                onchange={handle_change}
            />

            <div
                id="drop-zone"
                class={classes!("upload-area", model.is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || trigger_file_input.emit(())
                })}
            >
                <p>{ chosen }</p>
            </div>
        </>
    }
}

fn render_endpoint_select(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let on_endpoint = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::SetEndpoint(select.value().parse().unwrap_or_default())
    });
    let on_blob_mode = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        if select.value() == "display" {
            Msg::SetBlobMode(BlobMode::Display)
        } else {
            Msg::SetBlobMode(BlobMode::Download)
        }
    });

    html! {
        <>
            <label for="endpoint">{"Result"}</label>
            <select id="endpoint" onchange={on_endpoint}>
                { for Endpoint::iter().map(|endpoint| html! {
                    <option value={endpoint.to_string()} selected={model.endpoint == endpoint}>
                        { endpoint.label() }
                    </option>
                })}
            </select>
            {
                if model.endpoint == Endpoint::ProcessImage {
                    html! {
                        <select id="blob-mode" onchange={on_blob_mode}>
                            <option value="download" selected={model.blob_mode == BlobMode::Download}>
                                {"Save as processed_image.png"}
                            </option>
                            <option value="display" selected={model.blob_mode == BlobMode::Display}>
                                {"Show on page"}
                            </option>
                        </select>
                    }
                } else {
                    html! {}
                }
            }
        </>
    }
}

use super::super::Model;
use yew::prelude::*;

const PLACEHOLDER_SRC: &str = "no-image.svg";

pub fn render_results(model: &Model) -> Html {
    let src = model
        .slot
        .image()
        .map(|image| image.src())
        .unwrap_or_else(|| PLACEHOLDER_SRC.to_string());

    html! {
        <div class="results-container">
            <img class="result-image" src={src} alt="image" width="300" height="300" />
            {
                if model.slot.in_flight() > 0 {
                    html! { <p class="pending">{format!("Removing reflections... ({} pending)", model.slot.in_flight())}</p> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

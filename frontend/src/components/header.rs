use yew::prelude::*;

const PAPER_URL: &str = "https://arxiv.org/pdf/1903.03889";

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1>{"🔎 Reflection Remover"}</h1>
            <p class="subtitle">
                {"A code based implementation of "}
                <a href={PAPER_URL}>
                    {"Fast Single Image Reflection Suppression via Convex Optimization"}
                </a>
                {". Upload an image below and try it!"}
            </p>
        </header>
    }
}

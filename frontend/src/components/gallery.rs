use shared::gallery::{ExamplePair, EXAMPLES};
use yew::prelude::*;

fn render_pair(pair: &ExamplePair) -> Html {
    let caption = pair.caption();
    html! {
        <figure class="demo-image">
            <div class="demo-pair">
                <img src={pair.original} alt={caption.clone()} width="300" height="300" />
                <img src={pair.processed} alt={caption.clone()} width="300" height="300" />
            </div>
            <figcaption>{ caption }</figcaption>
        </figure>
    }
}

pub fn render_gallery() -> Html {
    html! {
        <section class="gallery">
            <h2>{"Example Images"}</h2>
            <p>
                {"Below are a few examples of images from the white paper, depicting synthetically \
                  generated reflections on images and the corresponding h value which was used to \
                  remove them"}
            </p>
            <div class="demo-grid">
                { for EXAMPLES.iter().map(render_pair) }
            </div>
        </section>
    }
}

use crate::components::upload::PdfUploadComponent;
use yew::{html, Component, Context, Html};

pub struct App;

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="app-root">
                <nav class="top-nav">
                    <span class="material-icons">{"upload_file"}</span>
                    <span class="top-nav-title">{"PDF Upload"}</span>
                </nav>
                <main class="app-content">
                    <PdfUploadComponent />
                </main>
            </div>
        }
    }
}

use yew::prelude::*;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="not-found-page p-6">
            <h1 class="text-2xl font-bold">{"404 - Page Not Found"}</h1>
            <p class="text-gray-600">{"The page you're looking for doesn't exist."}</p>
        </div>
    }
}

use leptos::prelude::*;

#[component]
pub fn Loader(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center gap-3 py-12 text-gray-500" role="status">
            <div class="h-6 w-6 border-2 border-gray-300 border-t-blue-600 rounded-full animate-spin"></div>
            <span>{label.unwrap_or_else(|| "Loading...".to_string())}</span>
        </div>
    }
}

use leptos::prelude::*;

/// Delete confirmation. Rendered while `message` is set.
#[component]
pub fn ConfirmDialog(
    /// Heading, e.g. "Delete User"
    #[prop(into)]
    title: Signal<String>,
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(into)] busy: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50">
                <div class="bg-white rounded-lg p-6 max-w-sm w-full mx-4" role="alertdialog" aria-modal="true">
                    <h3 class="text-lg font-semibold mb-4">{move || title.get()}</h3>
                    <p class="text-gray-600 mb-6">{move || message.get().unwrap_or_default()}</p>
                    <div class="flex justify-end gap-3">
                        <button
                            class="px-4 py-2 text-gray-600 hover:bg-gray-100 rounded disabled:opacity-50"
                            disabled=move || busy.get()
                            on:click=move |_| on_cancel.run(())
                        >
                            "Cancel"
                        </button>
                        <button
                            class="px-4 py-2 bg-red-600 text-white rounded hover:bg-red-700 disabled:opacity-50"
                            disabled=move || busy.get()
                            on:click=move |_| on_confirm.run(())
                        >
                            {move || if busy.get() { "Deleting..." } else { "Delete" }}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

use leptos::prelude::*;

/// Overlay dialog. Clicking the backdrop closes it; Escape is handled by the app.
#[component]
pub fn Modal(
    #[prop(into)] open: Signal<bool>,
    on_close: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div
                class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-40"
                on:click=move |_| on_close.run(())
            >
                <div
                    class="max-w-2xl w-full mx-4"
                    role="dialog"
                    aria-modal="true"
                    on:click=|ev| ev.stop_propagation()
                >
                    {children()}
                </div>
            </div>
        </Show>
    }
}

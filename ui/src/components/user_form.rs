//! Schema-driven form
//!
//! Renders one input per field of a [`FormView`]. The field list is fixed for
//! the lifetime of the component; values, errors and the busy flag are read
//! reactively so inputs keep focus while the user types.

use leptos::prelude::*;
use userdesk::form::FormView;

#[component]
pub fn UserForm(
    /// Current projection of the form engine
    #[prop(into)]
    form: Signal<FormView>,
    /// (field name, new value) on every keystroke
    on_change: Callback<(String, String)>,
    /// Field name when focus leaves an input
    on_blur: Callback<String>,
    on_submit: Callback<()>,
    #[prop(optional)] on_cancel: Option<Callback<()>>,
) -> impl IntoView {
    let fields = form.with_untracked(|f| f.fields.clone());
    let disabled = move || form.with(|f| f.disabled);

    let inputs = fields
        .into_iter()
        .enumerate()
        .map(|(i, field)| {
            let value = move || form.with(|f| f.fields.get(i).map(|x| x.value.clone()).unwrap_or_default());
            let error = move || form.with(|f| f.fields.get(i).and_then(|x| x.error.clone()));
            let input_id = format!("field-{}", field.name);
            let label_for = input_id.clone();
            let name_for_change = field.name.clone();
            let name_for_blur = field.name.clone();

            view! {
                <div>
                    <label for=label_for class="block text-sm font-medium text-gray-700 mb-1">
                        {field.label}
                        {field.required.then(|| view! { <span class="text-red-500">" *"</span> })}
                    </label>
                    <input
                        id=input_id
                        name=field.name
                        type=field.input_kind.as_html()
                        placeholder=field.placeholder
                        class=move || format!(
                            "w-full px-3 py-2 border rounded-lg focus:ring-blue-500 focus:border-blue-500 disabled:bg-gray-100 {}",
                            if error().is_some() { "border-red-500" } else { "border-gray-300" }
                        )
                        prop:value=value
                        disabled=disabled
                        on:input=move |ev| on_change.run((name_for_change.clone(), event_target_value(&ev)))
                        on:blur=move |_| on_blur.run(name_for_blur.clone())
                    />
                    {move || error().map(|e| view! {
                        <p class="mt-1 text-sm text-red-600">{e}</p>
                    })}
                </div>
            }
        })
        .collect_view();

    view! {
        <form
            class="bg-white p-6 rounded-lg shadow"
            novalidate=true
            on:submit=move |ev| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <h2 class="text-xl font-semibold text-gray-900 mb-4">{move || form.with(|f| f.title.clone())}</h2>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                {inputs}
            </div>
            <div class="flex justify-end gap-3 mt-6">
                {move || {
                    let show = form.with(|f| f.show_cancel);
                    on_cancel.filter(|_| show).map(|cancel| view! {
                        <button
                            type="button"
                            class="px-4 py-2 text-gray-600 hover:bg-gray-100 rounded disabled:opacity-50"
                            disabled=disabled
                            on:click=move |_| cancel.run(())
                        >
                            "Cancel"
                        </button>
                    })
                }}
                <button
                    type="submit"
                    class="px-4 py-2 bg-blue-600 text-white rounded hover:bg-blue-700 disabled:opacity-50"
                    disabled=disabled
                >
                    {move || form.with(|f| f.submit_label.clone())}
                </button>
            </div>
        </form>
    }
}

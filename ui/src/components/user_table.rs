//! User list: a table on wide screens, cards on narrow ones

use leptos::prelude::*;
use userdesk::table::{RowIntent, TableView};

#[component]
pub fn UserTable(
    #[prop(into)] table: Signal<TableView>,
    on_intent: Callback<RowIntent>,
) -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg shadow">
            <h2 class="text-xl font-semibold text-gray-900 p-4 border-b">
                {move || table.with(|t| t.title.clone())}
            </h2>
            {move || {
                let projection = table.get();
                match projection.empty.clone() {
                    Some(empty) => view! {
                        <div class="text-center py-12">
                            <h3 class="text-sm font-medium text-gray-900">{empty.heading}</h3>
                            <p class="mt-1 text-sm text-gray-500">{empty.hint}</p>
                        </div>
                    }.into_any(),
                    None => view! {
                        <div>
                            <Rows table=projection.clone() on_intent=on_intent />
                            <Cards table=projection on_intent=on_intent />
                        </div>
                    }.into_any(),
                }
            }}
        </div>
    }
}

#[component]
fn Rows(table: TableView, on_intent: Callback<RowIntent>) -> impl IntoView {
    view! {
        <table class="hidden md:table min-w-full divide-y divide-gray-200">
            <thead class="bg-gray-50">
                <tr>
                    {table.columns.into_iter().map(|c| view! {
                        <th class="px-4 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">
                            {c.label}
                        </th>
                    }).collect_view()}
                    <th class="px-4 py-3 text-right text-xs font-medium text-gray-500 uppercase tracking-wider">
                        "Actions"
                    </th>
                </tr>
            </thead>
            <tbody class="divide-y divide-gray-200">
                {table.rows.into_iter().map(|row| {
                    let edit = row.edit();
                    let delete = row.delete();
                    view! {
                        <tr class="hover:bg-gray-50">
                            {row.cells.into_iter().map(|cell| view! {
                                <td class="px-4 py-3 text-sm text-gray-900">{cell}</td>
                            }).collect_view()}
                            <td class="px-4 py-3 text-right text-sm space-x-2">
                                <button
                                    class="text-blue-600 hover:text-blue-800"
                                    aria-label=row.edit_label
                                    on:click=move |_| on_intent.run(edit.clone())
                                >
                                    "Edit"
                                </button>
                                <button
                                    class="text-red-600 hover:text-red-800"
                                    aria-label=row.delete_label
                                    on:click=move |_| on_intent.run(delete.clone())
                                >
                                    "Delete"
                                </button>
                            </td>
                        </tr>
                    }
                }).collect_view()}
            </tbody>
        </table>
    }
}

#[component]
fn Cards(table: TableView, on_intent: Callback<RowIntent>) -> impl IntoView {
    view! {
        <div class="md:hidden divide-y divide-gray-200">
            {table.cards.into_iter().map(|card| {
                let edit = RowIntent::Edit(card.id.clone());
                let delete = RowIntent::Delete(card.id.clone());
                view! {
                    <div class="p-4">
                        {card.fields.into_iter().map(|f| view! {
                            <div class="flex justify-between text-sm py-0.5">
                                <span class="text-gray-500">{f.label}</span>
                                <span class="text-gray-900">{f.value}</span>
                            </div>
                        }).collect_view()}
                        <div class="flex justify-end gap-3 mt-2 text-sm">
                            <button class="text-blue-600" on:click=move |_| on_intent.run(edit.clone())>
                                "Edit"
                            </button>
                            <button class="text-red-600" on:click=move |_| on_intent.run(delete.clone())>
                                "Delete"
                            </button>
                        </div>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use userdesk::clock::Clock;
use userdesk::form::Submission;
use userdesk::gateway::RecordGateway;
use userdesk::notify::NotificationId;
use userdesk::orchestrator::{LoadState, Orchestrator};
use userdesk::schema::user_schema;
use userdesk::table::RowIntent;
use wasm_bindgen_futures::spawn_local;

mod api;
mod components;

use api::{api_base_url, FetchGateway};
use components::confirm_dialog::ConfirmDialog;
use components::loader::Loader;
use components::modal::Modal;
use components::toast::ToastStack;
use components::user_form::UserForm;
use components::user_table::UserTable;

/// `Date.now()`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}

#[component]
pub fn App() -> impl IntoView {
    let app = RwSignal::new(Orchestrator::new(user_schema(), Arc::new(BrowserClock)));
    let gateway = StoredValue::new(FetchGateway::new(api_base_url()));

    let load = move || {
        if !app.try_update(|o| o.begin_load()).unwrap_or(false) {
            return;
        }
        let gateway = gateway.get_value();
        spawn_local(async move {
            let result = gateway.list().await;
            app.update(|o| o.finish_load(result));
        });
    };

    // Load on mount
    Effect::new(move || load());

    // One timer per live notification. Dropping a Timeout cancels it, so a
    // dismissed notification never fires.
    let timers = StoredValue::new_local(HashMap::<NotificationId, Timeout>::new());
    Effect::new(move || {
        let live: Vec<(NotificationId, u64)> =
            app.with(|o| o.notifications().iter().map(|n| (n.id, n.expires_at_ms)).collect());
        let now = BrowserClock.now_ms();
        timers.update_value(|timers| {
            timers.retain(|id, _| live.iter().any(|(live_id, _)| live_id == id));
            for (id, expires_at) in live {
                timers.entry(id).or_insert_with(|| {
                    let delay = u32::try_from(expires_at.saturating_sub(now)).unwrap_or(u32::MAX);
                    Timeout::new(delay, move || {
                        app.update(|o| {
                            o.dismiss(id);
                        });
                    })
                });
            }
        });
    });

    // Escape closes the confirmation first, then the edit modal; ignored
    // while that surface is busy
    let _escape = window_event_listener(leptos::ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            app.update(|o| {
                o.escape();
            });
        }
    });

    let on_create = Callback::new(move |_| {
        let Some(Submission::Accepted(draft)) = app.try_update(|o| o.submit_create()) else {
            return;
        };
        let gateway = gateway.get_value();
        spawn_local(async move {
            let result = gateway.create(&draft).await;
            app.update(|o| o.finish_create(result));
        });
    });

    let on_update = Callback::new(move |_| {
        let Some(Some((id, draft))) = app.try_update(|o| match o.submit_edit() {
            Submission::Accepted(draft) => o.edit_session().map(|s| (s.target.id.clone(), draft)),
            _ => None,
        }) else {
            return;
        };
        let gateway = gateway.get_value();
        spawn_local(async move {
            let result = gateway.update(&id, &draft).await;
            app.update(|o| o.finish_update(&id, result));
        });
    });

    let on_delete = Callback::new(move |_| {
        let Some(Some(id)) = app.try_update(|o| o.begin_delete()) else {
            return;
        };
        let gateway = gateway.get_value();
        spawn_local(async move {
            let result = gateway.delete(&id).await;
            app.update(|o| o.finish_delete(&id, result));
        });
    });

    let on_intent = Callback::new(move |intent: RowIntent| {
        app.update(|o| {
            match intent {
                RowIntent::Edit(id) => o.open_edit(&id),
                RowIntent::Delete(id) => o.open_delete(&id),
            };
        });
    });

    let load_state = Memo::new(move |_| app.with(|o| o.load_state().clone()));
    let create_view = Signal::derive(move || app.with(|o| o.create_form().view()));
    let edit_open = Memo::new(move |_| app.with(|o| o.edit_session().is_some()));

    view! {
        <div class="min-h-screen bg-gray-100">
            <header class="bg-gray-800 text-white p-4">
                <h1 class="text-2xl font-bold">"User Management"</h1>
            </header>

            <main class="max-w-6xl mx-auto p-6 space-y-6">
                <UserForm
                    form=create_view
                    on_change=Callback::new(move |(name, value): (String, String)| {
                        app.update(|o| {
                            o.create_form_mut().change(&name, value);
                        });
                    })
                    on_blur=Callback::new(move |name: String| {
                        app.update(|o| {
                            o.create_form_mut().blur(&name);
                        });
                    })
                    on_submit=on_create
                />

                {move || match load_state.get() {
                    LoadState::Idle | LoadState::Loading => view! { <Loader label="Loading users..." /> }.into_any(),
                    LoadState::Failed { message } => view! {
                        <div class="bg-red-50 border border-red-200 rounded-lg p-4 flex items-center justify-between">
                            <p class="text-red-800">{message}</p>
                            <button
                                class="px-4 py-2 bg-red-600 text-white rounded hover:bg-red-700"
                                on:click=move |_| load()
                            >
                                "Retry"
                            </button>
                        </div>
                    }.into_any(),
                    LoadState::Loaded => view! {
                        <UserTable
                            table=Signal::derive(move || app.with(|o| o.table()))
                            on_intent=on_intent
                        />
                    }.into_any(),
                }}
            </main>

            <Modal
                open=edit_open
                on_close=Callback::new(move |_| app.update(|o| {
                    o.cancel_edit();
                }))
            >
                {move || edit_open.get().then(|| {
                    // Rebuilt each time the modal opens
                    let form = Signal::derive(move || {
                        app.with(|o| o.edit_session().map(|s| s.form.view()))
                            .unwrap_or_else(|| app.with_untracked(|o| o.create_form().view()))
                    });
                    view! {
                        <UserForm
                            form=form
                            on_change=Callback::new(move |(name, value): (String, String)| {
                                app.update(|o| {
                                    if let Some(form) = o.edit_form_mut() {
                                        form.change(&name, value);
                                    }
                                });
                            })
                            on_blur=Callback::new(move |name: String| {
                                app.update(|o| {
                                    if let Some(form) = o.edit_form_mut() {
                                        form.blur(&name);
                                    }
                                });
                            })
                            on_submit=on_update
                            on_cancel=Callback::new(move |_| app.update(|o| {
                                o.cancel_edit();
                            }))
                        />
                    }
                })}
            </Modal>

            <ConfirmDialog
                title=app.with_untracked(|o| o.delete_title())
                message=Signal::derive(move || app.with(|o| o.delete_prompt()))
                busy=Signal::derive(move || app.with(|o| o.delete_session().is_some_and(|s| s.busy)))
                on_confirm=on_delete
                on_cancel=Callback::new(move |_| app.update(|o| {
                    o.cancel_delete();
                }))
            />

            <ToastStack
                items=Signal::derive(move || app.with(|o| o.notifications().iter().cloned().collect::<Vec<_>>()))
                on_dismiss=Callback::new(move |id| app.update(|o| {
                    o.dismiss(id);
                }))
            />
        </div>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(App);
}

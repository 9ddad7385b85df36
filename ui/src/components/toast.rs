use leptos::prelude::*;
use userdesk::notify::{Notification, NotificationId, NotificationKind};

fn kind_class(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "bg-green-50 border-green-200 text-green-800",
        NotificationKind::Error => "bg-red-50 border-red-200 text-red-800",
        NotificationKind::Info => "bg-blue-50 border-blue-200 text-blue-800",
    }
}

/// Notification area, oldest on top
#[component]
pub fn ToastStack(
    #[prop(into)] items: Signal<Vec<Notification>>,
    on_dismiss: Callback<NotificationId>,
) -> impl IntoView {
    view! {
        <div class="fixed top-4 right-4 z-50 space-y-2 w-80" aria-live="polite">
            <For
                each=move || items.get()
                key=|n| n.id
                let:notification
            >
                <div
                    class=format!("flex items-start gap-2 p-3 border rounded-lg shadow {}", kind_class(notification.kind))
                    role="status"
                >
                    <p class="flex-1 text-sm">{notification.text.clone()}</p>
                    <button
                        class="text-sm opacity-60 hover:opacity-100"
                        aria-label="Dismiss"
                        on:click=move |_| on_dismiss.run(notification.id)
                    >
                        "x"
                    </button>
                </div>
            </For>
        </div>
    }
}

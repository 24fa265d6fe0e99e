//! Price alerts list.

use leptos::prelude::*;

use crate::auth::provider::use_auth;
use crate::net::resources::AlertsApi;
use crate::net::types::Alert;

#[component]
pub fn AlertsPage() -> impl IntoView {
    let auth = use_auth();
    let alerts = RwSignal::new(Vec::<Alert>::new());
    let error = RwSignal::new(None::<String>);

    let api = AlertsApi::new(auth.api());
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(async move {
            match api.list().await {
                Ok(items) => {
                    alerts.try_set(items);
                }
                Err(e) => {
                    error.try_set(Some(e.message()));
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = api;
    }

    view! {
        <section class="page page--alerts">
            <h1>"Alerts"</h1>
            <Show when=move || error.get().is_some()>
                <p class="page__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <ul class="alert-list">
                <For each=move || alerts.get() key=|a| a.id.clone() let:alert>
                    <li class="alert-list__item">
                        {format!("{} below {:.2}", alert.product_id, alert.target_price)}
                        {if alert.is_active { " (active)" } else { " (paused)" }}
                    </li>
                </For>
            </ul>
        </section>
    }
}

//! Tracked products list.

use leptos::prelude::*;

use crate::auth::provider::use_auth;
use crate::net::resources::ProductsApi;
use crate::net::types::Product;

#[component]
pub fn ProductsPage() -> impl IntoView {
    let auth = use_auth();
    let products = RwSignal::new(Vec::<Product>::new());
    let error = RwSignal::new(None::<String>);

    let api = ProductsApi::new(auth.api());
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(async move {
            match api.list().await {
                Ok(items) => {
                    products.try_set(items);
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
        <section class="page page--products">
            <h1>"Products"</h1>
            <Show when=move || error.get().is_some()>
                <p class="page__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <ul class="product-list">
                <For each=move || products.get() key=|p| p.id.clone() let:product>
                    <li class="product-list__item">
                        <span>{product.name.clone()}</span>
                        " "
                        <span>{format!("{:.2} {}", product.current_price, product.currency)}</span>
                    </li>
                </For>
            </ul>
        </section>
    }
}

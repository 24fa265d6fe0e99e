//! Root application component with routing and the auth provider.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::auth::guard::RequireAuth;
use crate::auth::provider::AuthProvider;
use crate::pages::{
    alerts::AlertsPage, dashboard::DashboardPage, login::LoginPage, products::ProductsPage,
    settings::SettingsPage,
};

/// HTML shell for server-rendered deployments.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// `AuthProvider` sits inside `Router` so it can navigate on invalidation.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/pricewatch-web.css"/>
        <Title text="PriceWatcher"/>

        <Router>
            <AuthProvider>
                <Routes fallback=|| view! { <Redirect path="/"/> }>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route
                        path=StaticSegment("")
                        view=|| view! { <RequireAuth><DashboardPage/></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("products")
                        view=|| view! { <RequireAuth><ProductsPage/></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("alerts")
                        view=|| view! { <RequireAuth><AlertsPage/></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("settings")
                        view=|| view! { <RequireAuth><SettingsPage/></RequireAuth> }
                    />
                </Routes>
            </AuthProvider>
        </Router>
    }
}

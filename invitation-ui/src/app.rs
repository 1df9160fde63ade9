use crate::bridge;
use crate::components::gallery::GallerySection;
use crate::components::intro::{Hero, LoadingScreen};
use crate::components::messages::GuestMessages;
use crate::components::story::Narrative;
use invitation_core::intro::IntroStage;
use invitation_core::site::SiteContent;
use invitation_core::supervisor::{self, Fault, FaultOrigin, Supervisor, FALLBACK};
use invitation_core::GalleryScan;
use leptos::*;
use std::convert::Infallible;
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

const FAULT_POLL: Duration = Duration::from_millis(500);

/// Root view. Everything below renders only while the supervisor is clean;
/// the first fault replaces the whole page with a reload prompt.
#[component]
pub fn App() -> impl IntoView {
    let supervisor = create_rw_signal(Supervisor::new());
    watch_faults(supervisor);
    listen_for_window_errors();

    let fault = create_memo(move |_| supervisor.with(|s| s.fault().cloned()));

    move || {
        // Subscribe to fault changes; `render` decides what to show.
        fault.with(|_| ());
        supervisor.try_update_untracked(|s| {
            s.render(
                || Ok::<_, Infallible>(guarded_site(supervisor)),
                |fault| view! { <Fallback fault=fault.clone()/> }.into_view(),
            )
        })
    }
}

/// `Err` values rendered anywhere under the site land here and trip the
/// supervisor. The capture is deferred so it never runs mid-render.
fn guarded_site(boundary: RwSignal<Supervisor>) -> View {
    let caught = move |errors: RwSignal<Errors>| {
        let message = errors
            .get_untracked()
            .into_iter()
            .map(|(_, e)| e.to_string())
            .next()
            .unwrap_or_default();
        spawn_local(async move {
            boundary.update(|s| {
                s.capture(Fault::new(FaultOrigin::Render, message));
            });
        });
    };

    view! {
      <ErrorBoundary fallback=caught>
        <Site/>
      </ErrorBoundary>
    }
    .into_view()
}

/// Uncaught script errors and rejected promises go through the same channel
/// as panics.
fn listen_for_window_errors() {
    let on_error = window_event_listener(ev::error, |ev| {
        let ev: &web_sys::ErrorEvent = ev.unchecked_ref();
        supervisor::report(ev.message());
    });
    let on_rejection = window_event_listener(ev::unhandledrejection, |ev| {
        let ev: &web_sys::PromiseRejectionEvent = ev.unchecked_ref();
        let reason = ev.reason();
        supervisor::report(reason.as_string().unwrap_or_else(|| format!("{reason:?}")));
    });

    on_cleanup(move || {
        on_error.remove();
        on_rejection.remove();
    });
}

fn watch_faults(boundary: RwSignal<Supervisor>) {
    let channel = match supervisor::install() {
        Ok(channel) => channel,
        Err(e) => {
            logging::warn!("error reporting unavailable: {e}");
            return;
        }
    };
    // A wasm panic aborts the instance before the next poll, so the hook
    // also paints a static reload prompt straight into the document.
    let forward = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        forward(info);
        bridge::show_static_fallback();
    }));
    let channel = store_value(Some(channel));

    let handle = set_interval_with_handle(
        move || {
            let taken = channel.with_value(|c| {
                c.as_ref()
                    .and_then(|c| boundary.try_update_untracked(|s| s.absorb(c)))
                    .unwrap_or(false)
            });
            // Only wake the root view when a fault was actually recorded.
            if taken {
                boundary.update(|_| {});
            }
        },
        FAULT_POLL,
    );

    on_cleanup(move || {
        if let Ok(handle) = handle {
            handle.clear();
        }
        // Dropping the channel restores the default panic hook.
        channel.set_value(None);
    });
}

#[component]
fn Fallback(fault: Fault) -> impl IntoView {
    logging::error!("showing fallback after fault: {}", fault.message);

    view! {
      <div class="fallback">
        <div class="fallback-card">
          <h2>{FALLBACK.title}</h2>
          <p>{FALLBACK.body}</p>
          <button on:click=move |_| bridge::reload_page()>{FALLBACK.action}</button>
        </div>
      </div>
    }
}

#[component]
fn Site() -> impl IntoView {
    let stage = create_rw_signal(IntroStage::default());
    let viewport = create_rw_signal(bridge::viewport());
    let gallery = create_rw_signal(GalleryScan::default());
    let site = create_rw_signal(SiteContent::default());

    let resize = window_event_listener(ev::resize, move |_| viewport.set(bridge::viewport()));
    on_cleanup(move || resize.remove());

    spawn_local(async move {
        match bridge::fetch_gallery().await {
            Ok(scan) => gallery.set(scan),
            Err(e) => logging::warn!("gallery unavailable: {e}"),
        }
    });
    spawn_local(async move {
        match bridge::fetch_site().await {
            Ok(content) => site.set(content),
            Err(e) => logging::warn!("site content unavailable, using defaults: {e}"),
        }
    });

    let backgrounds = create_memo(move |_| {
        let category = viewport.get().category();
        gallery.with(|g| g.of(category).map(|i| i.path.clone()).collect::<Vec<_>>())
    });
    let hero_visible = Signal::derive(move || stage.get() == IntroStage::Hero);

    view! {
      <div class="site" class:mobile=move || viewport.get().is_mobile()>
        <Show when=move || stage.get() == IntroStage::Loading fallback=|| ()>
          <LoadingScreen stage=stage/>
        </Show>
        <Hero images=backgrounds visible=hero_visible stage=stage/>
        <Show when=move || stage.get() == IntroStage::Opened fallback=|| ()>
          <main class="sections">
            <GallerySection gallery=gallery site=site/>
            <Narrative site=site cards=backgrounds/>
            <GuestMessages/>
          </main>
        </Show>
      </div>
    }
}

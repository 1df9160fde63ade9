use crate::bridge;
use invitation_core::intro::{
    Carousel, IntroStage, LoadingPhase, LoadingTimeline, HERO_INTERVAL, PROGRESS_TICK,
};
use leptos::*;
use std::time::Duration;

#[component]
pub fn LoadingScreen(stage: RwSignal<IntroStage>) -> impl IntoView {
    let started = bridge::now_ms();
    let progress = create_rw_signal(0_u32);
    let phase = create_rw_signal(LoadingPhase::Loading);

    let handle = set_interval_with_handle(
        move || {
            let elapsed = (bridge::now_ms() - started).max(0.0) as u64;
            let frame = LoadingTimeline::at(Duration::from_millis(elapsed));
            progress.set(frame.progress);
            phase.set(frame.phase);
            if frame.phase == LoadingPhase::Complete {
                stage.update(|s| {
                    s.finish_loading();
                });
            }
        },
        PROGRESS_TICK,
    );
    on_cleanup(move || {
        if let Ok(handle) = handle {
            handle.clear();
        }
    });

    view! {
      <div class="loading-screen" class:fading=move || phase.get() != LoadingPhase::Loading>
        <img class="monogram" src="/monogram/monogram.png" alt=""/>
        <div class="progress">
          <div class="progress-bar" style=move || format!("width: {}%", progress.get())></div>
        </div>
        <p class="progress-label">{move || format!("{}%", progress.get())}</p>
      </div>
    }
}

#[component]
pub fn Hero(
    #[prop(into)] images: Signal<Vec<String>>,
    #[prop(into)] visible: Signal<bool>,
    stage: RwSignal<IntroStage>,
) -> impl IntoView {
    let carousel = create_rw_signal(Carousel::default());

    create_effect(move |_| {
        let len = images.with(Vec::len);
        carousel.update(|c| c.resize(len));
    });

    let handle = set_interval_with_handle(
        move || {
            if visible.get_untracked() {
                carousel.update(|c| {
                    c.advance();
                });
            }
        },
        HERO_INTERVAL,
    );
    on_cleanup(move || {
        if let Ok(handle) = handle {
            handle.clear();
        }
    });

    let slides = move || {
        images
            .get()
            .into_iter()
            .enumerate()
            .map(|(i, src)| {
                view! {
                  <img
                    class="hero-slide"
                    class:active=move || carousel.with(|c| c.index()) == i
                    src=src
                    alt=""
                  />
                }
            })
            .collect_view()
    };

    view! {
      <div class="hero" class:hidden=move || !visible.get()>
        <div class="hero-slides">{slides}</div>
        <div class="hero-content">
          <img class="monogram" src="/monogram/monogram.png" alt=""/>
          <p class="hero-kicker">"You are invited"</p>
          <button
            class="hero-open"
            on:click=move |_| {
                stage.update(|s| {
                    s.open();
                });
            }
          >
            "Open Invitation"
          </button>
        </div>
      </div>
    }
}

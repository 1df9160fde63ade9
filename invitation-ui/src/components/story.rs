use invitation_core::site::SiteContent;
use invitation_core::story::PhotoStack;
use leptos::*;

const STACK_SIZE: usize = 5;

#[component]
pub fn Narrative(
    #[prop(into)] site: Signal<SiteContent>,
    #[prop(into)] cards: Signal<Vec<String>>,
) -> impl IntoView {
    let stack = create_rw_signal(PhotoStack::new(Vec::new()));
    let drag_start = store_value(None::<(f64, f64)>);

    create_effect(move |_| {
        let picked: Vec<String> = cards.with(|c| c.iter().take(STACK_SIZE).cloned().collect());
        stack.set(PhotoStack::new(picked));
    });

    let on_down = move |ev: ev::PointerEvent| {
        drag_start.set_value(Some((f64::from(ev.client_x()), f64::from(ev.client_y()))));
    };
    let on_up = move |ev: ev::PointerEvent| {
        let Some((x0, y0)) = drag_start.get_value() else {
            return;
        };
        drag_start.set_value(None);
        let dx = f64::from(ev.client_x()) - x0;
        let dy = f64::from(ev.client_y()) - y0;
        stack.update(|s| {
            s.release(dx, dy);
        });
    };

    let paragraphs = move || {
        site.with(|s| {
            s.story
                .iter()
                .map(|p| view! { <p>{p.clone()}</p> })
                .collect_view()
        })
    };

    let photos = move || {
        let cards = stack.with(|s| s.cards().to_vec());
        let count = cards.len();
        cards
            .into_iter()
            .enumerate()
            .map(|(i, src)| {
                let top = i + 1 == count;
                view! {
                  <div class="stack-card" class:top=top style=format!("z-index: {i}")>
                    <img src=src alt="" draggable="false"/>
                  </div>
                }
            })
            .collect_view()
    };

    view! {
      <section id="narrative" class="narrative">
        <p class="kicker">"Our Journey Together"</p>
        <h2>"Love Story"</h2>
        <div class="narrative-body">
          <div class="photo-stack" on:pointerdown=on_down on:pointerup=on_up>
            {photos}
          </div>
          <div class="story">{paragraphs}</div>
        </div>
      </section>
    }
}

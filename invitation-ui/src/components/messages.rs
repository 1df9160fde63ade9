use crate::bridge;
use invitation_core::board::MessageBoard;
use invitation_core::messages::{format_timestamp, GuestMessage};
use leptos::*;
use wasm_bindgen_futures::spawn_local;

fn message_card(msg: GuestMessage) -> impl IntoView {
    let initial = msg.initial();
    let when = (!msg.timestamp.trim().is_empty()).then(|| format_timestamp(&msg.timestamp));

    view! {
      <article class="message-card">
        <header>
          <span class="avatar">{initial}</span>
          <div>
            <h3>{msg.name.clone()}</h3>
            {when.map(|w| view! { <span class="message-time">{w}</span> })}
          </div>
        </header>
        <p class="message-body">{msg.message}</p>
      </article>
    }
}

#[component]
pub fn GuestMessages() -> impl IntoView {
    let board = create_rw_signal(MessageBoard::new());
    let query = create_rw_signal(String::new());

    // Overlapping refreshes are allowed; the board keeps only the newest.
    let refresh = move || {
        let Some(ticket) = board.try_update(|b| b.begin_refresh()) else {
            return;
        };
        spawn_local(async move {
            let outcome = bridge::fetch_messages().await;
            board.update(|b| {
                b.complete(ticket, outcome);
            });
        });
    };
    refresh();

    let loading = move || board.with(MessageBoard::is_loading);

    let listing = move || {
        if loading() {
            return view! {
              <div class="panel centered">
                <h3>"Loading Messages..."</h3>
                <p>"Please wait while we fetch the messages."</p>
              </div>
            }
            .into_view();
        }

        let q = query.get();
        let visible: Vec<GuestMessage> =
            board.with(|b| b.visible(&q).into_iter().cloned().collect());
        if visible.is_empty() {
            let hint = if q.is_empty() {
                "No guests have left messages yet."
            } else {
                "No messages match your search query."
            };
            return view! {
              <div class="panel centered">
                <h3>"No Messages Found"</h3>
                <p>{hint}</p>
              </div>
            }
            .into_view();
        }

        view! {
          <div class="message-list">
            {visible.into_iter().map(message_card).collect_view()}
          </div>
        }
        .into_view()
    };

    view! {
      <section id="messages" class="guest-messages">
        <div class="messages-header">
          <h2>"Guest Messages"</h2>
          <span class="summary">{move || board.with(|b| b.summary(&query.get()))}</span>
          <button
            class="refresh"
            title="Refresh messages"
            disabled=loading
            on:click=move |_| refresh()
          >
            "Refresh"
          </button>
        </div>

        {move || board.with(|b| b.error()).map(|e| view! { <div class="error-banner">{e}</div> })}

        <input
          class="search"
          type="text"
          placeholder="Search messages by guest name or content..."
          prop:value=move || query.get()
          on:input=move |ev| query.set(event_target_value(&ev))
        />

        {listing}

        <Show when=move || board.with(|b| !b.messages().is_empty()) fallback=|| ()>
          <div class="panel stats">
            <div>
              <strong>{move || board.with(|b| b.stats().total)}</strong>
              <span>"Total Messages"</span>
            </div>
            <div>
              <strong>{move || board.with(|b| b.stats().long)}</strong>
              <span>"Long Messages (100+ chars)"</span>
            </div>
          </div>
        </Show>
      </section>
    }
}

mod app;
mod bridge;

pub mod components {
    pub mod gallery;
    pub mod intro;
    pub mod messages;
    pub mod story;
}

fn main() {
    leptos::mount_to_body(app::App);
}

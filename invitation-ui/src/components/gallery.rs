use invitation_core::site::SiteContent;
use invitation_core::{Category, GalleryScan};
use leptos::*;

fn category_class(category: Category) -> &'static str {
    match category {
        Category::Desktop => "gallery-item landscape",
        Category::Mobile => "gallery-item portrait",
    }
}

#[component]
pub fn GallerySection(
    #[prop(into)] gallery: Signal<GalleryScan>,
    #[prop(into)] site: Signal<SiteContent>,
) -> impl IntoView {
    let hashtag = move || site.with(|s| s.couple.hashtag());

    let items = move || {
        gallery.with(|g| {
            if g.is_empty() {
                return view! {
                  <p class="gallery-empty">
                    "No images found. Add files to "
                    <code>{"public/"}{Category::Desktop.dir()}</code>
                    " or "
                    <code>{"public/"}{Category::Mobile.dir()}</code>
                    "."
                  </p>
                }
                .into_view();
            }

            let images = g.images.clone();
            view! {
              <div class="gallery-grid">
                {images
                    .into_iter()
                    .map(|image| {
                        view! {
                          <figure class=category_class(image.category)>
                            <img src=image.path loading="lazy" alt=""/>
                          </figure>
                        }
                    })
                    .collect_view()}
              </div>
            }
            .into_view()
        })
    };

    view! {
      <section id="gallery" class="gallery">
        <h2>"Our Love Story Gallery"</h2>
        <p class="hashtag">{hashtag}</p>
        {items}
      </section>
    }
}

use leptos::*;

use crate::{components::common::Spinner, utils::image_cache::cached_image_url};

pub const NO_IMAGE_PLACEHOLDER: &str = "/no-image.png";

/// Image served from the local image cache, with a spinner while resolving.
#[component]
pub fn CachedImage(
    #[prop(into)] src: MaybeSignal<String>,
    #[prop(into)] alt: String,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] width: Option<String>,
    #[prop(optional, into)] height: Option<String>,
    #[prop(optional)] preview: bool,
    #[prop(optional, into)] fallback: Option<String>,
) -> impl IntoView {
    let fallback = fallback.unwrap_or_else(|| NO_IMAGE_PLACEHOLDER.to_string());
    let resolved = create_local_resource(
        move || src.get(),
        |url| async move { cached_image_url(&url).await },
    );
    let failed = create_rw_signal(false);
    let preview_open = create_rw_signal(false);
    let min_height = height.clone().unwrap_or_else(|| "50".to_string());
    let alt = store_value(alt);
    let class = store_value(class);

    let image_src = {
        let fallback = fallback.clone();
        move || {
            if failed.get() {
                Some(fallback.clone())
            } else {
                resolved.get()
            }
        }
    };
    let image_src = Signal::derive(image_src);

    view! {
        {move || match image_src.get() {
            None => view! {
                <div
                    class=format!("flex items-center justify-center {}", class.get_value())
                    style=format!("min-height: {}px", min_height)
                >
                    <Spinner class="h-8 w-8"/>
                </div>
            }
            .into_view(),
            Some(url) => view! {
                <img
                    src=url
                    alt=alt.get_value()
                    width=width.clone()
                    height=height.clone()
                    class=format!("{} {}", class.get_value(), if preview { "cursor-zoom-in" } else { "" })
                    on:error=move |_| failed.set(true)
                    on:click=move |_| {
                        if preview {
                            preview_open.set(true);
                        }
                    }
                />
            }
            .into_view(),
        }}
        <Show when=move || preview_open.get()>
            <div
                class="fixed inset-0 z-[90] flex items-center justify-center bg-overlay-backdrop p-8"
                role="dialog"
                aria-label=move || alt.get_value()
                on:click=move |_| preview_open.set(false)
            >
                <img
                    src=move || image_src.get().unwrap_or_default()
                    alt=move || alt.get_value()
                    class="max-h-full max-w-full rounded-lg shadow-xl"
                />
            </div>
        </Show>
    }
}

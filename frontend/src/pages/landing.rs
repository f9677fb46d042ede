use web_sys::Document;

use super::{before_after, effects, forms, navigation, products, reviews};
use crate::config::LandingConfig;
use crate::utils::dom::{settle, Mounted};

/// Mounts every landing page component whose markup is present.
pub fn mount(document: &Document, config: &LandingConfig) -> Vec<Mounted> {
    [
        settle("mobile menu", navigation::mount_mobile_menu(document)),
        settle("scroll state", navigation::mount_scroll_state(document, config)),
        settle("smooth scroll", navigation::mount_smooth_scroll(document, config)),
        settle("section tracking", navigation::mount_section_tracking(document, config)),
        settle("contact form", forms::mount_contact(document, config)),
        settle("subscribe form", forms::mount_subscribe(document, config)),
        settle("catalog CTA tracking", forms::mount_cta_tracking(document)),
        settle("language switcher", forms::mount_language_switcher(document, config)),
        settle("before/after slider", before_after::mount(document)),
        settle("legacy before/after slider", before_after::mount_legacy(document)),
        settle("products carousel", products::mount(document, config)),
        settle("reviews slider", reviews::mount(document, config)),
        settle("lazy images", effects::mount_lazy_images(document)),
        settle("entrance animations", effects::mount_reveal(document)),
        settle("parallax", effects::mount_parallax(document)),
        settle("counters", effects::mount_counters(document)),
        settle("progress bars", effects::mount_progress_bars(document)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

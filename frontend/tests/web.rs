#![cfg(target_arch = "wasm32")]

use frontend::LandingConfig;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Event, HtmlButtonElement, HtmlElement, HtmlTextAreaElement, MouseEvent, MouseEventInit,
};

wasm_bindgen_test_configure!(run_in_browser);

fn page(markup: &str) -> Document {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .expect("browser document");
    document.body().expect("body").set_inner_html(markup);
    document
}

fn mouse(kind: &str, client_x: i32) -> MouseEvent {
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_client_x(client_x);
    MouseEvent::new_with_mouse_event_init_dict(kind, &init).expect("mouse event")
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> T {
    document
        .get_element_by_id(id)
        .unwrap_or_else(|| panic!("#{} is rendered", id))
        .dyn_into::<T>()
        .unwrap()
}

async fn next_frame() {
    let frame = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .request_animation_frame(&resolve)
            .unwrap();
    });
    JsFuture::from(frame).await.unwrap();
}

#[wasm_bindgen_test]
fn bare_page_mounts_nothing() {
    let document = page("<p>Nothing interactive here</p>");
    assert_eq!(frontend::mount(&document, &LandingConfig::default()), 0);
    frontend::unmount();
}

#[wasm_bindgen_test]
fn section_tracking_marks_the_hero_link() {
    let document = page(
        r##"<header class="header"><a class="nav-link" href="#hero">Home</a>
           <a class="nav-link" href="#about">About</a></header>
           <section id="hero" style="height: 2000px"></section>
           <section id="about" style="height: 800px"></section>"##,
    );
    frontend::mount(&document, &LandingConfig::default());

    let links = document.query_selector_all(".nav-link").unwrap();
    let hero = links.item(0).unwrap().dyn_into::<web_sys::Element>().unwrap();
    let about = links.item(1).unwrap().dyn_into::<web_sys::Element>().unwrap();
    let header = document.query_selector(".header").unwrap().unwrap();
    assert!(hero.class_list().contains("active"));
    assert!(!about.class_list().contains("active"));
    assert!(header.class_list().contains("hero-active"));
    frontend::unmount();
}

#[wasm_bindgen_test]
fn blank_required_field_gets_an_error() {
    let document = page(
        r#"<form class="admin-form" novalidate>
             <div class="admin-form-group"><input name="title" required value="  "></div>
             <div class="admin-form-group"><input name="email" type="email" value="not-an-email"></div>
           </form>"#,
    );
    frontend::mount(&document, &LandingConfig::default());

    let form = document.query_selector(".admin-form").unwrap().unwrap();
    form.dispatch_event(&Event::new("submit").unwrap()).unwrap();

    let errors = document.query_selector_all(".admin-field-error").unwrap();
    assert_eq!(errors.length(), 2);
    frontend::unmount();
}

#[wasm_bindgen_test]
fn saved_draft_fills_an_empty_textarea() {
    let window = web_sys::window().unwrap();
    let path = window.location().pathname().unwrap();
    let storage = window.local_storage().unwrap().unwrap();
    storage
        .set_item(&format!("admin_body_{}", path), "draft from last time")
        .unwrap();

    let document = page(
        r#"<div class="admin-form-group">
             <textarea class="admin-form-textarea" name="body"></textarea>
           </div>"#,
    );
    frontend::mount(&document, &LandingConfig::default());

    let textarea = document
        .query_selector(".admin-form-textarea")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlTextAreaElement>()
        .unwrap();
    assert_eq!(textarea.value(), "draft from last time");

    storage.remove_item(&format!("admin_body_{}", path)).unwrap();
    frontend::unmount();
}

#[wasm_bindgen_test]
fn console_logger_is_installed() {
    page("<p>Logger only</p>");
    frontend::start();
    let info = log::Metadata::builder().level(log::Level::Info).build();
    assert!(log::logger().enabled(&info));
    frontend::unmount();
}

#[wasm_bindgen_test]
fn reveal_handle_stops_following_the_pointer_after_release() {
    let document = page(
        r#"<div id="auracloudSlider" style="position: absolute; left: 0; top: 0; width: 400px; height: 100px">
             <div class="after-image"></div>
             <div class="slider-handle" style="position: absolute"></div>
             <div class="slider-button"></div>
           </div>"#,
    );
    frontend::mount(&document, &LandingConfig::default());

    let handle = document
        .query_selector(".slider-handle")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    let left = || handle.style().get_property_value("left").unwrap();
    assert_eq!(left(), "50%");

    for cycle in 1..=5 {
        let x = 40 * cycle;
        handle.dispatch_event(&mouse("mousedown", x)).unwrap();
        document.dispatch_event(&mouse("mousemove", x)).unwrap();
        assert_eq!(left(), format!("{}%", 10 * cycle));

        document.dispatch_event(&mouse("mouseup", x)).unwrap();
        document.dispatch_event(&mouse("mousemove", 390)).unwrap();
        assert_eq!(left(), format!("{}%", 10 * cycle));
    }
    frontend::unmount();
}

#[wasm_bindgen_test]
async fn empty_product_strip_is_left_alone() {
    let document = page(
        r#"<div id="productsSlider"></div>
           <button id="productsPrev">prev</button>
           <button id="productsNext">next</button>
           <div id="productsDots"></div>"#,
    );
    assert_eq!(frontend::mount(&document, &LandingConfig::default()), 0);
    next_frame().await;

    let next: HtmlButtonElement = by_id(&document, "productsNext");
    next.click();
    assert!(!next.disabled());
    assert!(!by_id::<HtmlButtonElement>(&document, "productsPrev").disabled());
    assert_eq!(by_id::<web_sys::Element>(&document, "productsDots").child_element_count(), 0);
    frontend::unmount();
}

#[wasm_bindgen_test]
async fn product_buttons_disable_at_the_ends() {
    let cards = r#"<div class="product-card" style="flex: 0 0 300px; width: 300px; height: 10px"></div>"#
        .repeat(7);
    let document = page(&format!(
        r#"<div id="productsSlider" style="display: flex; gap: 20px; width: 960px; overflow: hidden">{}</div>
           <button id="productsPrev">prev</button>
           <button id="productsNext">next</button>
           <div id="productsDots"></div>"#,
        cards
    ));
    assert_eq!(frontend::mount(&document, &LandingConfig::default()), 1);
    next_frame().await;

    let prev: HtmlButtonElement = by_id(&document, "productsPrev");
    let next: HtmlButtonElement = by_id(&document, "productsNext");
    let dots: web_sys::Element = by_id(&document, "productsDots");
    assert_eq!(dots.child_element_count(), 3);
    assert!(prev.disabled());
    assert!(!next.disabled());

    next.click();
    assert!(!prev.disabled());
    assert!(!next.disabled());

    next.click();
    assert!(!prev.disabled());
    assert!(next.disabled());

    prev.click();
    assert!(!next.disabled());
    frontend::unmount();
}

#[wasm_bindgen_test]
fn catalog_click_lands_in_the_data_layer() {
    let window = web_sys::window().unwrap();
    let data_layer = js_sys::Array::new();
    js_sys::Reflect::set(&window, &JsValue::from_str("dataLayer"), &data_layer).unwrap();
    let document = page(
        r#"<a id="catalogLink" href="/catalog" data-track-event="catalog-cta" data-track-label="hero">Catalog</a>"#,
    );
    frontend::mount(&document, &LandingConfig::default());

    let link: HtmlElement = by_id(&document, "catalogLink");
    link.add_event_listener_with_callback("click", &js_sys::Function::new_with_args("e", "e.preventDefault()"))
        .unwrap();
    link.click();

    assert_eq!(data_layer.length(), 1);
    let pushed = data_layer.get(0);
    let field = |name: &str| js_sys::Reflect::get(&pushed, &JsValue::from_str(name)).unwrap();
    assert_eq!(field("event").as_string().as_deref(), Some("catalog_cta_click"));
    assert_eq!(field("label").as_string().as_deref(), Some("hero"));
    assert!(field("timestamp").as_f64().is_some());

    js_sys::Reflect::set(&window, &JsValue::from_str("dataLayer"), &JsValue::UNDEFINED).unwrap();
    frontend::unmount();
}

#[wasm_bindgen_test]
fn reveal_style_is_added_once() {
    let document = page(r#"<div data-aos="fade-up">Hello</div>"#);
    frontend::mount(&document, &LandingConfig::default());
    frontend::mount(&document, &LandingConfig::default());

    let styles = document.query_selector_all("head style#aos-revealed-style").unwrap();
    assert_eq!(styles.length(), 1);
    frontend::unmount();
}

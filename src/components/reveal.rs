use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use stylist::css;
use stylist::yew::Global;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    js_sys, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};
use yew::prelude::*;

use crate::reveal::{RevealOptions, RevealTracker, INDEX_ATTRIBUTE, PENDING_CLASS, REVEALED_CLASS};
use crate::utils::{document, js_error_message};

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

#[derive(Properties, PartialEq)]
pub struct ScrollRevealProps {
    /// Elements to fade in as they scroll into view.
    #[prop_or(AttrValue::Static("section"))]
    pub selector: AttrValue,
    #[prop_or_default]
    pub options: RevealOptions,
}

/// Fades page sections in the first time they scroll into view.
///
/// Sections only get hidden once the observer exists, so if setup fails the
/// page stays fully visible.
#[function_component(ScrollReveal)]
pub fn scroll_reveal(props: &ScrollRevealProps) -> Html {
    {
        let selector = props.selector.clone();
        let options = props.options.clone();
        use_effect_with_deps(
            move |_| {
                let observer = observe_sections(&selector, &options);
                move || {
                    if let Some((observer, _callback)) = observer {
                        observer.disconnect();
                    }
                }
            },
            (),
        );
    }

    html! {
        <Global css={css!(r#"
            .fade-in {
                opacity: 0;
                transform: translateY(20px);
                transition: opacity 0.6s ease-out, transform 0.6s ease-out;
            }
            .visible {
                opacity: 1;
                transform: translateY(0);
            }
        "#)} />
    }
}

fn observe_sections(selector: &str, options: &RevealOptions) -> Option<(IntersectionObserver, ObserverCallback)> {
    let document = document()?;
    let sections = match document.query_selector_all(selector) {
        Ok(sections) => sections,
        Err(e) => {
            warn!("Invalid reveal selector '{}': {}", selector, js_error_message(&e));
            return None;
        }
    };
    if sections.length() == 0 {
        debug!("No '{}' elements to reveal", selector);
        return None;
    }

    let tracker = Rc::new(RefCell::new(RevealTracker::default()));

    let callback: ObserverCallback = {
        let tracker = tracker.clone();
        Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(index) = target
                    .get_attribute(INDEX_ATTRIBUTE)
                    .and_then(|value| value.parse::<usize>().ok())
                else {
                    continue;
                };

                let mut tracker = tracker.borrow_mut();
                if tracker.observe_intersection(index, entry.is_intersecting()) {
                    if let Err(e) = target.class_list().add_1(REVEALED_CLASS) {
                        warn!("Failed to reveal section {}: {}", index, js_error_message(&e));
                    }
                    observer.unobserve(&target);
                    if tracker.pending() == 0 {
                        debug!("All {} sections revealed", tracker.tracked());
                        observer.disconnect();
                    }
                }
            }
        }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>)
    };

    let init = IntersectionObserverInit::new();
    init.set_threshold(&options.threshold.into());
    init.set_root_margin(&options.root_margin);

    let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
        Ok(observer) => observer,
        Err(e) => {
            warn!("Scroll reveal disabled, content stays visible: {}", js_error_message(&e));
            return None;
        }
    };

    for i in 0..sections.length() {
        let Some(section) = sections.item(i).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        let index = tracker.borrow_mut().track();
        if section.set_attribute(INDEX_ATTRIBUTE, &index.to_string()).is_err()
            || section.class_list().add_1(PENDING_CLASS).is_err()
        {
            continue;
        }
        observer.observe(&section);
    }

    info!("Watching {} sections for scroll reveal", tracker.borrow().tracked());
    Some((observer, callback))
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use wasm_bindgen_test::wasm_bindgen_test;

    use super::*;

    fn mount_sections(class: &str, count: usize) -> Vec<Element> {
        let document = document().expect("tests run in a browser");
        let body = document.body().expect("document has a body");
        (0..count)
            .map(|_| {
                let section = document.create_element("section").expect("create section");
                section.set_class_name(class);
                body.append_child(&section).expect("attach section");
                section
            })
            .collect()
    }

    fn unmount(sections: Vec<Element>) {
        for section in sections {
            section.remove();
        }
    }

    #[wasm_bindgen_test]
    fn failed_observer_setup_leaves_sections_visible() {
        let sections = mount_sections("reveal-fail-open", 2);
        // The observer constructor throws a SyntaxError on an unparsable margin.
        let options = RevealOptions {
            root_margin: "not a margin".to_string(),
            ..RevealOptions::default()
        };

        assert!(observe_sections(".reveal-fail-open", &options).is_none());
        for section in &sections {
            assert!(!section.class_list().contains(PENDING_CLASS));
            assert!(!section.has_attribute(INDEX_ATTRIBUTE));
        }
        unmount(sections);
    }

    #[wasm_bindgen_test]
    fn watched_sections_start_pending() {
        let sections = mount_sections("reveal-watched", 3);

        let observed = observe_sections(".reveal-watched", &RevealOptions::default());
        assert!(observed.is_some());
        for (index, section) in sections.iter().enumerate() {
            assert!(section.class_list().contains(PENDING_CLASS));
            assert_eq!(section.get_attribute(INDEX_ATTRIBUTE), Some(index.to_string()));
        }

        if let Some((observer, _callback)) = observed {
            observer.disconnect();
        }
        unmount(sections);
    }

    #[wasm_bindgen_test]
    fn nothing_to_watch_skips_setup() {
        assert!(observe_sections(".no-such-section", &RevealOptions::default()).is_none());
    }
}

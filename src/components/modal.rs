use std::collections::HashSet;
use std::rc::Rc;

use log::{debug, warn};
use web_sys::{Element, MouseEvent};
use yew::prelude::*;

/// Which modals exist on the page and which of them are showing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModalRegistry {
    known: HashSet<String>,
    active: HashSet<String>,
}

pub enum ModalAction {
    Register(String),
    Unregister(String),
    Open(String),
    Close(String),
}

impl ModalRegistry {
    pub fn is_active(&self, id: &str) -> bool {
        self.active.contains(id)
    }

    #[cfg(test)]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

impl Reducible for ModalRegistry {
    type Action = ModalAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ModalAction::Register(id) => {
                next.known.insert(id);
            }
            ModalAction::Unregister(id) => {
                next.active.remove(&id);
                next.known.remove(&id);
            }
            ModalAction::Open(id) => {
                if !next.known.contains(&id) {
                    warn!("No modal with id '{}' on this page", id);
                    return self;
                }
                debug!("Opening modal '{}'", id);
                next.active.insert(id);
            }
            ModalAction::Close(id) => {
                if !next.active.remove(&id) {
                    return self;
                }
                debug!("Closing modal '{}'", id);
            }
        }
        Rc::new(next)
    }
}

pub type ModalContext = UseReducerHandle<ModalRegistry>;

#[derive(Properties, PartialEq)]
pub struct ModalProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ModalProvider)]
pub fn modal_provider(props: &ModalProviderProps) -> Html {
    let registry = use_reducer(ModalRegistry::default);

    html! {
        <ContextProvider<ModalContext> context={registry}>
            { for props.children.iter() }
        </ContextProvider<ModalContext>>
    }
}

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub id: AttrValue,
    #[prop_or_default]
    pub title: Option<AttrValue>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let registry = use_context::<ModalContext>();

    {
        let registry = registry.clone();
        use_effect_with_deps(
            move |id: &AttrValue| {
                let id = id.to_string();
                if let Some(registry) = &registry {
                    registry.dispatch(ModalAction::Register(id.clone()));
                } else {
                    warn!("Modal '{}' rendered outside a ModalProvider", id);
                }
                move || {
                    if let Some(registry) = registry {
                        registry.dispatch(ModalAction::Unregister(id));
                    }
                }
            },
            props.id.clone(),
        );
    }

    let is_active = registry
        .as_ref()
        .map(|registry| registry.is_active(&props.id))
        .unwrap_or(false);

    // Only clicks landing on the backdrop itself close the modal, not clicks inside the content.
    let on_backdrop = {
        let registry = registry.clone();
        let id = props.id.clone();
        Callback::from(move |e: MouseEvent| {
            let on_backdrop = e
                .target_dyn_into::<Element>()
                .map(|target| target.id() == id.as_str())
                .unwrap_or(false);
            if let (true, Some(registry)) = (on_backdrop, &registry) {
                registry.dispatch(ModalAction::Close(id.to_string()));
            }
        })
    };

    html! {
        <div id={props.id.clone()} class={classes!("modal", is_active.then(|| "active"))} onclick={on_backdrop}>
            <div class="modal-content">
                <ModalClose target={props.id.clone()} />
                {
                    if let Some(title) = &props.title {
                        html! { <h2>{title.clone()}</h2> }
                    } else {
                        html! {}
                    }
                }
                { for props.children.iter() }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ModalTriggerProps {
    /// Id of the modal to open.
    pub target: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ModalTrigger)]
pub fn modal_trigger(props: &ModalTriggerProps) -> Html {
    let registry = use_context::<ModalContext>();

    let onclick = {
        let target = props.target.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            match &registry {
                Some(registry) => registry.dispatch(ModalAction::Open(target.to_string())),
                None => warn!("Modal trigger for '{}' has no ModalProvider", target),
            }
        })
    };

    html! {
        <a href="#" class={props.class.clone()} data-modal-target={props.target.clone()} {onclick}>
            { for props.children.iter() }
        </a>
    }
}

#[derive(Properties, PartialEq)]
pub struct ModalCloseProps {
    /// Id of the modal to close.
    pub target: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ModalClose)]
pub fn modal_close(props: &ModalCloseProps) -> Html {
    let registry = use_context::<ModalContext>();

    let onclick = {
        let target = props.target.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(registry) = &registry {
                registry.dispatch(ModalAction::Close(target.to_string()));
            }
        })
    };

    html! {
        <button class={classes!("modal-close", props.class.clone())} data-modal-close={props.target.clone()} {onclick}>
            {
                if props.children.is_empty() {
                    html! { <>{"×"}</> }
                } else {
                    html! { <>{ for props.children.iter() }</> }
                }
            }
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(ids: &[&str]) -> Rc<ModalRegistry> {
        ids.iter().fold(Rc::new(ModalRegistry::default()), |registry, id| {
            registry.reduce(ModalAction::Register(id.to_string()))
        })
    }

    #[test]
    fn modals_start_closed() {
        let registry = registry_with(&["privacy", "terms"]);
        assert!(!registry.is_active("privacy"));
        assert!(!registry.is_active("terms"));
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn modals_open_independently() {
        let registry = registry_with(&["a", "b"])
            .reduce(ModalAction::Open("a".to_string()))
            .reduce(ModalAction::Open("b".to_string()));
        assert!(registry.is_active("a"));
        assert!(registry.is_active("b"));

        let registry = registry.reduce(ModalAction::Close("b".to_string()));
        assert!(registry.is_active("a"));
        assert!(!registry.is_active("b"));
    }

    #[test]
    fn opening_twice_is_idempotent() {
        let registry = registry_with(&["a"])
            .reduce(ModalAction::Open("a".to_string()))
            .reduce(ModalAction::Open("a".to_string()));
        assert_eq!(registry.active_count(), 1);
    }

    #[test]
    fn unknown_modal_cannot_be_opened() {
        let registry = registry_with(&["a"]);
        let next = registry.clone().reduce(ModalAction::Open("missing".to_string()));
        assert!(Rc::ptr_eq(&registry, &next));
        assert!(!next.is_active("missing"));
    }

    #[test]
    fn closing_inactive_modal_is_a_no_op() {
        let registry = registry_with(&["a"]);
        let next = registry.clone().reduce(ModalAction::Close("a".to_string()));
        assert!(Rc::ptr_eq(&registry, &next));
    }

    #[test]
    fn unregistering_drops_active_state() {
        let registry = registry_with(&["a"])
            .reduce(ModalAction::Open("a".to_string()))
            .reduce(ModalAction::Unregister("a".to_string()));
        assert!(!registry.is_active("a"));
        let registry = registry.reduce(ModalAction::Open("a".to_string()));
        assert!(!registry.is_active("a"));
    }
}

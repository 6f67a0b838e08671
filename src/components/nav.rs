use yew::prelude::*;
use web_sys::MouseEvent;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavState {
    open: bool,
}

impl NavState {
    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn closed() -> Self {
        Self { open: false }
    }

    pub fn is_open(self) -> bool {
        self.open
    }

    /// Close icon while open, hamburger while closed.
    pub fn glyph(self) -> &'static str {
        if self.open {
            "×"
        } else {
            "☰"
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct NavLink {
    pub label: AttrValue,
    pub href: AttrValue,
}

impl NavLink {
    pub fn new(label: &'static str, href: &'static str) -> Self {
        Self {
            label: AttrValue::Static(label),
            href: AttrValue::Static(href),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct NavProps {
    pub brand: AttrValue,
    pub links: Vec<NavLink>,
}

#[function_component(Nav)]
pub fn nav(props: &NavProps) -> Html {
    let menu = use_state(NavState::default);

    let toggle_menu = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| {
            menu.set(menu.toggled());
        })
    };

    // Links keep their default navigation (in-page anchors), only the menu closes.
    let close_menu = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| {
            menu.set(NavState::closed());
        })
    };

    html! {
        <header class="site-header">
            <div class="header-content">
                <a href="#" class="logo">{&props.brand}</a>
                <button class="menu-toggle" aria-label="Toggle menu" onclick={toggle_menu}>
                    {menu.glyph()}
                </button>
                <nav class={classes!(menu.is_open().then(|| "active"))}>
                    {
                        props.links.iter().map(|link| html! {
                            <a href={link.href.clone()} onclick={close_menu.clone()}>
                                {link.label.clone()}
                            </a>
                        }).collect::<Html>()
                    }
                </nav>
            </div>
        </header>
    }
}

use yew::prelude::*;

use crate::components::{
    faq::{FaqAccordion, FaqEntry},
    modal::{Modal, ModalTrigger},
    nav::{Nav, NavLink},
    playground::Playground,
    reveal::ScrollReveal,
};

fn nav_links() -> Vec<NavLink> {
    vec![
        NavLink::new("Features", "#features"),
        NavLink::new("Playground", "#playground"),
        NavLink::new("Gallery", "#gallery"),
        NavLink::new("FAQ", "#faq"),
    ]
}

fn faq_entries() -> Vec<FaqEntry> {
    vec![
        FaqEntry::new(
            "What is Z-Image?",
            "Z-Image turns a single photo into a polished, styled rendition in a few seconds.",
        ),
        FaqEntry::new(
            "Which file types can I upload?",
            "Any common image format your browser understands: PNG, JPEG, WebP and GIF.",
        ),
        FaqEntry::new(
            "Are my images stored?",
            "No. The playground runs entirely in your browser and nothing is uploaded.",
        ),
        FaqEntry::new(
            "Can I use the results commercially?",
            "Yes. Everything you generate is yours to use however you like.",
        ),
    ]
}

#[function_component(Home)]
pub fn home() -> Html {
    html! {
        <>
            <Nav brand="Z-Image" links={nav_links()} />
            <main>
                <section id="hero" class="hero">
                    <div class="container">
                        <h1>{"Turn any photo into art"}</h1>
                        <p class="hero-subtitle">
                            {"Upload an image, press generate and download the result. No account needed."}
                        </p>
                        <div class="hero-actions">
                            <a href="#playground" class="btn btn-primary">{"Try the playground"}</a>
                            <ModalTrigger target="contact" class={classes!("btn", "btn-secondary")}>
                                {"Contact us"}
                            </ModalTrigger>
                        </div>
                    </div>
                </section>

                <section id="features" class="features">
                    <div class="container">
                        <h2 class="section-title">{"Why Z-Image"}</h2>
                        <div class="feature-grid">
                            <div class="feature-card">
                                <h3>{"Fast"}</h3>
                                <p>{"Results in seconds, straight in the browser."}</p>
                            </div>
                            <div class="feature-card">
                                <h3>{"Private"}</h3>
                                <p>{"Your photos never leave your device."}</p>
                            </div>
                            <div class="feature-card">
                                <h3>{"Simple"}</h3>
                                <p>{"Drop an image, click once, done."}</p>
                            </div>
                        </div>
                    </div>
                </section>

                <Playground />

                <section id="gallery" class="gallery">
                    <div class="container">
                        <h2 class="section-title">{"Gallery"}</h2>
                        <div class="gallery-grid">
                            { for (1..=6).map(|i| html! {
                                <img src={format!("images/gallery-{}.jpg", i)} alt={format!("Gallery example {}", i)} loading="lazy" />
                            }) }
                        </div>
                    </div>
                </section>

                <section id="faq" class="faq">
                    <div class="container">
                        <h2 class="section-title">{"Frequently Asked Questions"}</h2>
                        <FaqAccordion entries={faq_entries()} />
                    </div>
                </section>
            </main>

            <footer class="site-footer">
                <div class="container">
                    <p>{"© Z-Image"}</p>
                    <div class="footer-links">
                        <ModalTrigger target="privacy">{"Privacy"}</ModalTrigger>
                        <ModalTrigger target="terms">{"Terms"}</ModalTrigger>
                        <ModalTrigger target="contact">{"Contact"}</ModalTrigger>
                    </div>
                </div>
            </footer>

            <Modal id="privacy" title="Privacy Policy">
                <p>{"The playground processes images locally. We do not collect, store or share your uploads."}</p>
            </Modal>
            <Modal id="terms" title="Terms of Service">
                <p>{"The demo is provided as is. Generated images may be used without restriction."}</p>
            </Modal>
            <Modal id="contact" title="Contact">
                <p>{"Questions or feedback? Write to hello@z-image.example."}</p>
            </Modal>

            <ScrollReveal />
        </>
    }
}

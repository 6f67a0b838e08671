use yew::prelude::*;
use web_sys::MouseEvent;

/// Accordion transition: clicking an item closes all others and flips itself.
pub fn toggle(open: Option<usize>, clicked: usize) -> Option<usize> {
    if open == Some(clicked) {
        None
    } else {
        Some(clicked)
    }
}

#[derive(Clone, PartialEq)]
pub struct FaqEntry {
    pub question: AttrValue,
    pub answer: AttrValue,
}

impl FaqEntry {
    pub fn new(question: &'static str, answer: &'static str) -> Self {
        Self {
            question: AttrValue::Static(question),
            answer: AttrValue::Static(answer),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct FaqAccordionProps {
    pub entries: Vec<FaqEntry>,
}

#[function_component(FaqAccordion)]
pub fn faq_accordion(props: &FaqAccordionProps) -> Html {
    let open = use_state(|| None::<usize>);

    html! {
        <div class="faq-list">
            {
                props.entries.iter().enumerate().map(|(index, entry)| {
                    let onclick = {
                        let open = open.clone();
                        Callback::from(move |e: MouseEvent| {
                            e.prevent_default();
                            open.set(toggle(*open, index));
                        })
                    };
                    let is_open = *open == Some(index);

                    html! {
                        <div class={classes!("faq-item", is_open.then(|| "active"))}>
                            <button class="faq-question" {onclick}>
                                <span class="question-text">{entry.question.clone()}</span>
                                <span class="toggle-icon">{if is_open { "−" } else { "+" }}</span>
                            </button>
                            <div class="faq-answer">
                                <p>{entry.answer.clone()}</p>
                            </div>
                        </div>
                    }
                }).collect::<Html>()
            }
        </div>
    }
}

//! View rendering for the flashcard reviewer.
//!
//! Layout: a header with "Card i of n", the card surface, and the
//! Previous/Next bar. The card shows its front (question, options, "Check
//! Answer") until revealed, then its back (verdict and correct options for
//! choice cards, the reference answer for open cards) with an optional
//! explanation toggle. Clicking the surface only flips open cards.

use common::model::{Flashcard, QuestionType};
use common::review::{ReviewSession, Verdict};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::FlashcardsComponent;

pub fn view(component: &FlashcardsComponent, ctx: &Context<FlashcardsComponent>) -> Html {
    let Some(session) = &component.session else {
        return html! { <p class="empty-deck">{"No flashcards to review."}</p> };
    };
    let link = ctx.link();

    html! {
        <div class="flashcards-root">
            <div class="flashcards-header">
                <h1>{"Flashcards"}</h1>
                <div class="progress">
                    { format!("Card {} of {}", session.position(), session.card_count()) }
                </div>
            </div>

            <div
                class={classes!(
                    "card-surface",
                    (session.current().question_type() == QuestionType::Open).then_some("clickable")
                )}
                onclick={link.callback(|_| Msg::FlipCard)}
            >
                {
                    if session.is_revealed() {
                        build_back(session, link)
                    } else {
                        build_front(session, link)
                    }
                }
            </div>

            { build_navigation(session, link) }
        </div>
    }
}

fn build_front(session: &ReviewSession, link: &Scope<FlashcardsComponent>) -> Html {
    let card = session.current();

    html! {
        <div class="card-face card-front">
            <span class="badge">{ card.question_type().label() }</span>
            <p class="question">{ card.question.clone() }</p>
            {
                if card.question_type().is_choice() {
                    html! {
                        <div class="options">
                            { for card.options().iter().map(|option| {
                                let option_id = option.id.clone();
                                html! {
                                    <button
                                        key={option.id.clone()}
                                        class={classes!("option", session.is_selected(&option.id).then_some("selected"))}
                                        onclick={link.callback(move |e: MouseEvent| {
                                            e.stop_propagation();
                                            Msg::SelectOption(option_id.clone())
                                        })}
                                    >
                                        { option.text.clone() }
                                    </button>
                                }
                            }) }
                            {
                                if session.can_check() {
                                    html! {
                                        <button
                                            class="check-btn"
                                            onclick={link.callback(|e: MouseEvent| {
                                                e.stop_propagation();
                                                Msg::CheckAnswer
                                            })}
                                        >
                                            {"Check Answer"}
                                        </button>
                                    }
                                } else {
                                    html! {}
                                }
                            }
                        </div>
                    }
                } else {
                    html! { <p class="hint">{"Click to reveal answer"}</p> }
                }
            }
        </div>
    }
}

fn build_back(session: &ReviewSession, link: &Scope<FlashcardsComponent>) -> Html {
    let card = session.current();

    html! {
        <div class="card-face card-back">
            {
                match session.verdict() {
                    Some(verdict) => build_verdict(card, verdict),
                    None => html! {
                        <div class="reference-answer">
                            <p class="answer-title">{"Answer:"}</p>
                            <p>{ card.reference_answer().unwrap_or_default().to_string() }</p>
                        </div>
                    },
                }
            }
            { build_explanation(session, link) }
        </div>
    }
}

fn build_verdict(card: &Flashcard, verdict: Verdict) -> Html {
    let plural = if card.question_type() == QuestionType::MultipleChoice { "s" } else { "" };

    html! {
        <>
            <div class={classes!("verdict", if verdict == Verdict::Correct { "correct" } else { "incorrect" })}>
                <p>{ verdict.label() }</p>
            </div>
            <p class="answer-title">{ format!("Correct answer{}:", plural) }</p>
            <ul class="correct-options">
                { for card.correct_options().into_iter().map(|option| html! {
                    <li key={option.id.clone()}>{ option.text.clone() }</li>
                }) }
            </ul>
        </>
    }
}

fn build_explanation(session: &ReviewSession, link: &Scope<FlashcardsComponent>) -> Html {
    let Some(explanation) = session.current().explanation() else {
        return html! {};
    };
    let visible = session.explanation_visible();

    html! {
        <div class="explanation">
            <button
                class="link-btn"
                onclick={link.callback(|e: MouseEvent| {
                    // Keep the click from flipping an open card back over.
                    e.stop_propagation();
                    Msg::ToggleExplanation
                })}
            >
                { if visible { "Hide Explanation" } else { "Show Explanation" } }
            </button>
            {
                if visible {
                    html! { <p class="explanation-text">{ explanation.to_string() }</p> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn build_navigation(session: &ReviewSession, link: &Scope<FlashcardsComponent>) -> Html {
    html! {
        <div class="card-nav">
            <button
                class="nav-btn"
                disabled={!session.has_previous()}
                onclick={link.callback(|_| Msg::Previous)}
            >
                <span class="material-icons">{"chevron_left"}</span>
                <span>{"Previous"}</span>
            </button>
            <button
                class="nav-btn"
                disabled={!session.has_next()}
                onclick={link.callback(|_| Msg::Next)}
            >
                <span>{"Next"}</span>
                <span class="material-icons">{"chevron_right"}</span>
            </button>
        </div>
    }
}

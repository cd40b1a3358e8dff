//! Programming quote of the moment, picked at random on every refresh.

use chrono::{DateTime, Local};
use rand::seq::SliceRandom;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use super::{MountContext, RemoteWidget};
use crate::refresh::FetchError;
use crate::registry::WidgetId;

/// A quote and its author.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Quote text.
    pub text: &'static str,
    /// Attribution.
    pub author: &'static str,
}

const fn q(text: &'static str, author: &'static str) -> Quote {
    Quote { text, author }
}

/// The rotation.
pub const QUOTES: [Quote; 15] = [
    q("The best way to predict the future is to invent it.", "Alan Kay"),
    q("Code is like humor. When you have to explain it, it's bad.", "Cory House"),
    q("First, solve the problem. Then, write the code.", "John Johnson"),
    q("Simplicity is the soul of efficiency.", "Austin Freeman"),
    q("Make it work, make it right, make it fast.", "Kent Beck"),
    q(
        "Any fool can write code that a computer can understand. Good programmers write code that humans can understand.",
        "Martin Fowler",
    ),
    q("Experience is the name everyone gives to their mistakes.", "Oscar Wilde"),
    q(
        "The only way to learn a new programming language is by writing programs in it.",
        "Dennis Ritchie",
    ),
    q(
        "Programming isn't about what you know; it's about what you can figure out.",
        "Chris Pine",
    ),
    q(
        "The most disastrous thing that you can ever learn is your first programming language.",
        "Alan Kay",
    ),
    q(
        "Software is a great combination between artistry and engineering.",
        "Bill Gates",
    ),
    q(
        "Testing leads to failure, and failure leads to understanding.",
        "Burt Rutan",
    ),
    q("Talk is cheap. Show me the code.", "Linus Torvalds"),
    q("Deleted code is debugged code.", "Jeff Sickel"),
    q("Fix the cause, not the symptom.", "Steve Maguire"),
];

/// Picks a random quote.
pub fn pick() -> Result<Quote, FetchError> {
    QUOTES
        .choose(&mut rand::thread_rng())
        .copied()
        .ok_or_else(|| FetchError::Task("quote list is empty".to_string()))
}

/// Starts the rotation for [`WidgetId::TechQuote`].
pub fn mount(ctx: &MountContext<'_>) -> RemoteWidget<Quote> {
    let handle = ctx
        .supervisor
        .mount(WidgetId::TechQuote, pick, ctx.options(WidgetId::TechQuote));
    RemoteWidget::new(handle, render)
}

/// Quote in italics, author underneath.
pub fn render(quote: &Quote, _width: u16, _now: DateTime<Local>) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            format!("\"{}\"", quote.text),
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        Line::from(Span::styled(
            format!("- {}", quote.author),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

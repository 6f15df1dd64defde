//! Text-to-signal grammar.
//!
//! One chat message is scanned for the pattern
//! `<BTO|STC> <ticker> <strike><C|P> <expiration> @<price>`, e.g.
//! `STC INTC 50C 12/31 @.45`. A message must contain exactly one
//! occurrence; zero or two-plus occurrences yield no signal (an ambiguous
//! message is rejected rather than guessed at).

use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;
use trader_api::model::{RawSignal, RawSignalFlags};

lazy_static! {
    // Groups: 1 instruction, 2 ticker, 3 strike, 4 contract type,
    // 5 expiration, 6 contract price. Alternations are ordered so the
    // leftmost-first engine prefers the longer form, as the original
    // grammar does. Separators are 1-2 whitespace chars; `@` may be
    // followed by at most one space.
    static ref SIGNAL_RE: Regex = Regex::new(concat!(
        r"(BTO|STC)\s{1,2}",
        r"([A-Z]{1,5})\s{1,2}",
        r"([0-9]{1,5}\.[0-9]{1,2}|[0-9]{1,5})",
        r"([CP])\s{1,2}",
        r"([0-9]{1,2}/[0-9]{1,2}/[0-9]{4}|[0-9]{1,2}/[0-9]{1,2}/[0-9]{2}|[0-9]{1,2}/[0-9]{1,2})",
        r"\s{1,2}@\s?",
        r"([0-9]{0,3}\.[0-9]{1,2})",
    ))
    .unwrap();

    static ref STOP_LOSS_RE: Regex =
        Regex::new(r"SL\s?@\s?([0-9]{0,4}\.[0-9]{1,2})").unwrap();
}

/// The instruction must not be preceded by a non-whitespace character
/// (no partial-word matches) and the price must not be a prefix of a
/// larger token. The regex crate has no look-around, so both edges are
/// checked against the match span instead; this is equivalent because
/// the assertions sit at the very ends of the pattern.
fn span_is_isolated(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| c.is_whitespace());
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| c.is_whitespace());
    before_ok && after_ok
}

/// Parse one message into a raw signal.
///
/// Returns `None` when the message holds no signal or more than one.
/// Text outside the matched span (prefix then suffix) becomes the
/// comments field; a stop-loss flag is pulled from the comments of BTO
/// signals only.
pub fn parse_signal(text: &str) -> Option<RawSignal> {
    let matches: Vec<regex::Captures<'_>> = SIGNAL_RE
        .captures_iter(text)
        .filter(|caps| {
            let m = caps.get(0).expect("group 0 always present");
            span_is_isolated(text, m.start(), m.end())
        })
        .collect();

    let caps = match matches.len() {
        0 => {
            info!("message did not match signal pattern");
            return None;
        }
        1 => &matches[0],
        n => {
            warn!("{n} signal matches in one message; rejecting as ambiguous");
            return None;
        }
    };

    let span = caps.get(0).expect("group 0 always present");
    let mut comments = String::with_capacity(text.len() - (span.end() - span.start()));
    comments.push_str(&text[..span.start()]);
    comments.push_str(&text[span.end()..]);
    let comments = (!comments.is_empty()).then_some(comments);

    let instruction = caps[1].to_string();
    let stop_loss = if instruction == "BTO" {
        comments.as_deref().and_then(parse_stop_loss)
    } else {
        None
    };

    Some(RawSignal {
        instruction,
        ticker: caps[2].to_string(),
        strike_price: caps[3].to_string(),
        contract_type: caps[4].to_string(),
        expiration: caps[5].to_string(),
        contract_price: caps[6].to_string(),
        comments,
        flags: RawSignalFlags {
            stop_loss,
            risk_level: None,
            reduce: None,
        },
    })
}

/// Extract a suggested stop-loss price from comment text.
///
/// Recognizes `SL @<price>` with at most one space on either side of the
/// `@`. The price may be followed by whitespace, a closing parenthesis or
/// the end of the text; anything else disqualifies the token.
pub fn parse_stop_loss(comments: &str) -> Option<String> {
    for caps in STOP_LOSS_RE.captures_iter(comments) {
        let m = caps.get(0).expect("group 0 always present");
        let tail_ok = comments[m.end()..]
            .chars()
            .next()
            .map_or(true, |c| c.is_whitespace() || c == ')');
        if tail_ok {
            return Some(caps[1].to_string());
        }
    }
    None
}

/// Remove markdown emphasis characters (`_` and `*`) from message text.
pub fn strip_markdown(text: &str) -> String {
    text.chars().filter(|c| *c != '_' && *c != '*').collect()
}

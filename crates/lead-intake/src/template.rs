//! Email bodies for each form kind.
use crate::lead::{FormKind, LeadSubmission};

pub const FALLBACK_SUBJECT: &str = "Hidden PG – Lead";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Renders the notification for a lead.
///
/// Kinds without a dedicated template get the raw payload as pretty-printed JSON, so
/// nothing submitted is lost.
pub fn render(lead: &LeadSubmission) -> RenderedEmail {
    match lead.kind {
        FormKind::Newsletter => newsletter(lead),
        FormKind::Gem => gem_suggestion(lead),
        _ => fallback(lead),
    }
}

fn newsletter(lead: &LeadSubmission) -> RenderedEmail {
    let email = escape_html(&lead.email);
    let source = escape_html(&lead.source);
    RenderedEmail {
        subject: "Newsletter signup (CTA)".to_string(),
        html: format!(
            "<h2>Newsletter signup</h2>\n\
             <p><b>Email:</b> {email}</p>\n\
             <p><b>Source:</b> {source}</p>"
        ),
        text: format!(
            "Newsletter signup\nEmail: {}\nSource: {}\n",
            lead.email, lead.source
        ),
    }
}

fn gem_suggestion(lead: &LeadSubmission) -> RenderedEmail {
    let f = &lead.fields;
    let notes_html = escape_html(&f.notes).replace('\n', "<br/>");
    RenderedEmail {
        subject: "New Hidden Gem suggestion".to_string(),
        html: format!(
            "<h2>Hidden Gem Suggestion</h2>\n\
             <p><b>Place:</b> {}</p>\n\
             <p><b>Location:</b> {}</p>\n\
             <p><b>Link:</b> {}</p>\n\
             <p><b>Notes:</b><br/>{}</p>\n\
             <p><b>Sender email:</b> {}</p>\n\
             <p><b>Source:</b> {}</p>",
            escape_html(&f.place),
            escape_html(&f.location),
            escape_html(&f.link),
            notes_html,
            escape_html(&lead.email),
            escape_html(&lead.source),
        ),
        text: format!(
            "Hidden Gem Suggestion\nPlace: {}\nLocation: {}\nLink: {}\nNotes: {}\nSender email: {}\nSource: {}\n",
            f.place, f.location, f.link, f.notes, lead.email, lead.source
        ),
    }
}

fn fallback(lead: &LeadSubmission) -> RenderedEmail {
    // Serializing a Map<String, Value> cannot fail.
    let dump = serde_json::to_string_pretty(&lead.raw).unwrap_or_else(|_| "{}".to_string());
    RenderedEmail {
        subject: FALLBACK_SUBJECT.to_string(),
        html: format!("<pre>{}</pre>", escape_html(&dump)),
        text: dump,
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

//! Built-in stop words and the support-domain lexicon.

/// English filler that carries no signal in support tickets.
pub fn is_stop_word(word: &str) -> bool {
    matches!(
        word,
        "the"
            | "and"
            | "for"
            | "are"
            | "but"
            | "not"
            | "you"
            | "all"
            | "can"
            | "had"
            | "her"
            | "was"
            | "one"
            | "our"
            | "out"
            | "has"
            | "have"
            | "been"
            | "from"
            | "this"
            | "that"
            | "with"
            | "they"
            | "will"
            | "each"
            | "which"
            | "their"
            | "said"
            | "what"
            | "its"
            | "into"
            | "more"
            | "other"
            | "when"
            | "then"
            | "than"
            | "were"
            | "does"
            | "did"
            | "cant"
            | "wont"
            | "just"
            | "also"
            | "only"
            | "very"
            | "after"
            | "before"
            | "while"
            | "about"
            | "because"
            | "would"
            | "could"
            | "should"
            | "there"
            | "still"
            | "gets"
            | "getting"
    )
}

/// Short domain terms that survive the minimum-length filter. Ticket text
/// leans on abbreviations; dropping these would blind the patterns.
pub fn is_domain_term(word: &str) -> bool {
    matches!(
        word,
        "ui" | "ux"
            | "db"
            | "os"
            | "qr"
            | "vm"
            | "id"
            | "ip"
            | "2fa"
            | "sso"
            | "otp"
            | "api"
            | "app"
            | "ios"
            | "sdk"
            | "url"
            | "ssl"
            | "tls"
            | "cpu"
            | "ram"
            | "pin"
            | "tab"
            | "sms"
            | "pdf"
            | "csv"
            | "crm"
            | "sla"
            | "faq"
    )
}

//! Workbook file names.

use chrono::NaiveDate;

const FILE_PREFIX: &str = "commissao";
const MAX_NAME_CHARS: usize = 50;

/// Entity kind encoded in an entity-scoped file name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Qualifier {
    Seller,
    Contador,
    RenewalPartner,
}

impl Qualifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Qualifier::Seller => "vendedor",
            Qualifier::Contador => "contador",
            Qualifier::RenewalPartner => "parceiro-renovacao",
        }
    }
}

/// Reduces an entity name to something safe in a file name.
///
/// Keeps ASCII alphanumerics, Latin letters in U+00C0..=U+024F, whitespace
/// and `-`; whitespace runs become a single `-`; the result is cut at 50
/// characters.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars().filter(|c| is_kept(*c)) {
        if is_space(c) {
            if !in_whitespace {
                out.push('-');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }
    out.chars().take(MAX_NAME_CHARS).collect()
}

fn is_kept(c: char) -> bool {
    c.is_ascii_alphanumeric() || ('\u{00C0}'..='\u{024F}').contains(&c) || is_space(c) || c == '-'
}

/// Whitespace as browsers match it in a regex: Unicode `Space_Separator`
/// plus the line terminators and the BOM. U+0085 is not included.
fn is_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// `commissao-<YYYY-MM-DD>.xlsx`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("{FILE_PREFIX}-{}.xlsx", date.format("%Y-%m-%d"))
}

/// `commissao-<qualifier>-<sanitized name>-<YYYY-MM-DD>.xlsx`
pub fn entity_file_name(qualifier: Qualifier, name: &str, date: NaiveDate) -> String {
    format!(
        "{FILE_PREFIX}-{}-{}-{}.xlsx",
        qualifier.as_str(),
        sanitize_file_name(name),
        date.format("%Y-%m-%d")
    )
}

//! Document and credential validators: CPF check digits, live-typing masks
//! for CPF/phone/CEP, and the password strength gate applied before an
//! update-password call. All functions are pure and never fail.

use once_cell::sync::Lazy;
use regex::Regex;

// Digit-group patterns for the masks. A partial match renders a partial mask
// (live typing); a cleaned string that fits no grouping is returned untouched.
static CPF_GROUPS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{3})(\d{3})?(\d{3})?(\d{2})?$").unwrap());
static PHONE_GROUPS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{2})(\d{5})?(\d{4})?$").unwrap());
static CEP_GROUPS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{5})(\d{3})?$").unwrap());

// Password clauses, one compiled pattern each; the check is their conjunction.
static PW_LOWER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]").unwrap());
static PW_UPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").unwrap());
static PW_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").unwrap());
static PW_SYMBOL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9A-Za-z]").unwrap());

#[inline]
fn digits_of(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validate a CPF by its two check digits.
///
/// Non-digit characters are stripped before evaluation, the same cleaning the
/// masks apply; whatever digits remain are checked positionally. Exactly 11
/// digits are required and the known-invalid repeated sequences
/// ("000.000.000-00" etc.) are rejected before the checksum runs.
pub fn is_valid_cpf(raw: &str) -> bool {
    let cpf = digits_of(raw);
    if cpf.len() != 11 {
        return false;
    }
    let d: Vec<u32> = cpf.chars().map(|c| c.to_digit(10).unwrap_or(0)).collect();
    if d.iter().all(|&x| x == d[0]) {
        return false;
    }

    let mut sum: u32 = 0;
    for i in 0..9 {
        sum += d[i] * (10 - i as u32);
    }
    let mut first = (sum * 10) % 11;
    if first == 10 {
        first = 0;
    }
    if first != d[9] {
        return false;
    }

    sum = 0;
    for i in 0..10 {
        sum += d[i] * (11 - i as u32);
    }
    let mut second = (sum * 10) % 11;
    if second == 10 {
        second = 0;
    }
    second == d[10]
}

/// Mask a CPF as `AAA.BBB.CCC-DD`, emitting only the separators for groups
/// already present ("123456789" → "123.456.789"). Input whose digits do not
/// fit the grouping comes back unchanged.
pub fn format_cpf(raw: &str) -> String {
    let cleaned = digits_of(raw);
    match CPF_GROUPS.captures(&cleaned) {
        Some(caps) => {
            let mut out = caps[1].to_string();
            if let Some(g) = caps.get(2) {
                out.push('.');
                out.push_str(g.as_str());
            }
            if let Some(g) = caps.get(3) {
                out.push('.');
                out.push_str(g.as_str());
            }
            if let Some(g) = caps.get(4) {
                out.push('-');
                out.push_str(g.as_str());
            }
            out
        }
        None => raw.to_string(),
    }
}

/// Mask a phone number as `(AA) BBBBB-CCCC`. The area-code group always
/// renders with its trailing space, so "11" becomes "(11) ".
pub fn format_phone(raw: &str) -> String {
    let cleaned = digits_of(raw);
    match PHONE_GROUPS.captures(&cleaned) {
        Some(caps) => {
            let mut out = format!("({}) ", &caps[1]);
            if let Some(g) = caps.get(2) {
                out.push_str(g.as_str());
            }
            if let Some(g) = caps.get(3) {
                out.push('-');
                out.push_str(g.as_str());
            }
            out
        }
        None => raw.to_string(),
    }
}

/// Mask a CEP as `AAAAA-BBB`; the dash appears as soon as the first group is
/// complete ("12345" → "12345-").
pub fn format_cep(raw: &str) -> String {
    let cleaned = digits_of(raw);
    match CEP_GROUPS.captures(&cleaned) {
        Some(caps) => {
            let mut out = format!("{}-", &caps[1]);
            if let Some(g) = caps.get(2) {
                out.push_str(g.as_str());
            }
            out
        }
        None => raw.to_string(),
    }
}

/// Password strength gate: at least 8 characters with at least one lowercase
/// letter, one uppercase letter, one digit and one symbol.
pub fn is_strong_password(raw: &str) -> bool {
    raw.chars().count() >= 8
        && PW_LOWER.is_match(raw)
        && PW_UPPER.is_match(raw)
        && PW_DIGIT.is_match(raw)
        && PW_SYMBOL.is_match(raw)
}

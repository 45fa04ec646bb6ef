// Field extraction over the accumulated statement text
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::NOT_IDENTIFIED;

// "Nº do Parcelamento: 12345.678/2020-01", "Processo 10880.000000/2019-11", ...
static PROCESS_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:N[º°o]\.?\s*do\s+Parcelamento|Parcelamento|Processo)\s*(?:n[º°o]\.?)?\s*[:\-]?\s*([0-9][0-9./\-]*)",
    )
    .expect("process number pattern")
});

// Label, anything (newlines included), then the first R$ amount after it.
// Cents are the first two digits after the comma, even if more follow.
static BALANCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)(?:Saldo\s+devedor(?:\s+total)?|D[ií]vida\s+consolidada|Saldo\s+da\s+d[ií]vida).*?R\$\s*([0-9][0-9.\s]*,[0-9]{2})",
    )
    .expect("balance pattern")
});

pub fn process_number(text: &str) -> String {
    PROCESS_NUMBER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end_matches(['.', '-', '/']).to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| NOT_IDENTIFIED.to_string())
}

/// Outstanding balance in reais; 0.0 when absent or unparsable.
pub fn balance(text: &str) -> f64 {
    BALANCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| parse_brl(m.as_str()))
        .unwrap_or(0.0)
}

/// `"1.234,56"` -> `1234.56`. Never fails: bad input is 0.0.
pub fn parse_brl(raw: &str) -> f64 {
    let normalized: String = raw
        .chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => 0.0,
    }
}

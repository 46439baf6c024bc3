//! Reads candidates out of the HTML fragment returned by `/filter`.
//!
//! Only the structured attributes matter: every element whose `class`
//! contains `available-player` is a candidate, described by its `data-id`,
//! `data-price`, `data-position` and `data-team` attributes. The first text
//! inside the element (the first table cell in practice) is its display
//! name.

use engine::{Money, PlayerId, PlayerRef, Position, TeamId};

const CANDIDATE_CLASS: &str = "available-player";

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Start {
        name: &'a str,
        attrs: Vec<(&'a str, String)>,
        self_closing: bool,
    },
    End(&'a str),
    Text(&'a str),
}

pub fn parse_candidates(html: &str) -> Vec<PlayerRef> {
    let mut candidates = Vec::new();
    // (tag name, nesting depth of that tag, attributes, first text)
    let mut open: Option<(&str, usize, Vec<(&str, String)>, Option<String>)> = None;

    for token in tokenize(html) {
        match token {
            Token::Start {
                name,
                attrs,
                self_closing,
            } => {
                if let Some((tag, depth, ..)) = open.as_mut() {
                    if tag.eq_ignore_ascii_case(name) && !self_closing {
                        *depth += 1;
                    }
                    continue;
                }
                if !is_candidate(&attrs) {
                    continue;
                }
                if self_closing {
                    push_candidate(&mut candidates, &attrs, None);
                } else {
                    open = Some((name, 1, attrs, None));
                }
            }
            Token::End(name) => {
                let Some((tag, depth, ..)) = open.as_mut() else {
                    continue;
                };
                if !tag.eq_ignore_ascii_case(name) {
                    continue;
                }
                *depth -= 1;
                if *depth == 0 {
                    if let Some((_, _, attrs, text)) = open.take() {
                        push_candidate(&mut candidates, &attrs, text);
                    }
                }
            }
            Token::Text(text) => {
                if let Some((_, _, _, first)) = open.as_mut() {
                    let trimmed = text.trim();
                    if first.is_none() && !trimmed.is_empty() {
                        *first = Some(decode_entities(trimmed));
                    }
                }
            }
        }
    }

    // Unterminated trailing element.
    if let Some((_, _, attrs, text)) = open {
        push_candidate(&mut candidates, &attrs, text);
    }

    candidates
}

fn is_candidate(attrs: &[(&str, String)]) -> bool {
    attr(attrs, "class")
        .is_some_and(|class| class.split_ascii_whitespace().any(|c| c == CANDIDATE_CLASS))
}

fn attr<'v>(attrs: &'v [(&str, String)], key: &str) -> Option<&'v str> {
    attrs
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, value)| value.as_str())
}

fn push_candidate(out: &mut Vec<PlayerRef>, attrs: &[(&str, String)], name: Option<String>) {
    match candidate_from(attrs, name) {
        Ok(player) => out.push(player),
        Err(reason) => tracing::warn!(%reason, "skipping candidate row"),
    }
}

fn candidate_from(attrs: &[(&str, String)], name: Option<String>) -> Result<PlayerRef, String> {
    let required = |key: &str| {
        attr(attrs, key)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| format!("missing {key}"))
    };

    let id = required("data-id")?;
    let price: Money = required("data-price")?
        .parse()
        .map_err(|err| format!("data-price for {id}: {err}"))?;
    if price.is_negative() {
        return Err(format!("data-price for {id} is negative ({price})"));
    }
    let position: Position = required("data-position")?
        .parse()
        .map_err(|err| format!("data-position for {id}: {err}"))?;
    let team = required("data-team")?;

    Ok(PlayerRef {
        id: PlayerId::new(id),
        name: name.unwrap_or_else(|| id.to_string()),
        price,
        position,
        team: TeamId::new(team),
    })
}

fn tokenize(html: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = html;

    while !rest.is_empty() {
        let Some(lt) = rest.find('<') else {
            tokens.push(Token::Text(rest));
            break;
        };
        if lt > 0 {
            tokens.push(Token::Text(&rest[..lt]));
        }
        rest = &rest[lt..];

        if let Some(after) = rest.strip_prefix("<!--") {
            rest = after.find("-->").map_or("", move |end| &after[end + 3..]);
            continue;
        }
        if rest.starts_with("<!") || rest.starts_with("<?") {
            rest = rest.find('>').map_or("", move |end| &rest[end + 1..]);
            continue;
        }

        let (token, consumed) = parse_tag(rest);
        match token {
            Some(token) => tokens.push(token),
            None => tokens.push(Token::Text(&rest[..consumed])),
        }
        rest = &rest[consumed..];
    }

    tokens
}

/// Parses one tag starting at `<`. Returns the token (or `None` when the
/// `<` does not open a tag) and the number of bytes consumed.
fn parse_tag(input: &str) -> (Option<Token<'_>>, usize) {
    let bytes = input.as_bytes();
    let mut pos = 1;
    let closing = bytes.get(pos) == Some(&b'/');
    if closing {
        pos += 1;
    }

    let name_start = pos;
    while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'-') {
        pos += 1;
    }
    if pos == name_start {
        return (None, 1);
    }
    let name = &input[name_start..pos];

    let mut attrs = Vec::new();
    let mut self_closing = false;
    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        match bytes.get(pos) {
            None => break,
            Some(b'>') => {
                pos += 1;
                break;
            }
            Some(b'/') => {
                self_closing = true;
                pos += 1;
                continue;
            }
            Some(_) => {}
        }

        let key_start = pos;
        while pos < bytes.len() && !matches!(bytes[pos], b'=' | b'>' | b'/') && !bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        let key = &input[key_start..pos];

        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if bytes.get(pos) != Some(&b'=') {
            attrs.push((key, String::new()));
            continue;
        }
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }

        let value = match bytes.get(pos) {
            Some(&quote @ (b'"' | b'\'')) => {
                let start = pos + 1;
                let end = input[start..]
                    .find(quote as char)
                    .map_or(input.len(), |offset| start + offset);
                pos = (end + 1).min(input.len());
                &input[start..end]
            }
            _ => {
                let start = pos;
                while pos < bytes.len() && bytes[pos] != b'>' && !bytes[pos].is_ascii_whitespace() {
                    pos += 1;
                }
                &input[start..pos]
            }
        };
        attrs.push((key, decode_entities(value)));
    }

    let token = if closing {
        Token::End(name)
    } else {
        Token::Start {
            name,
            attrs,
            self_closing,
        }
    };
    (Some(token), pos)
}

fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        // Entity bodies are short; anything longer is a literal `&`.
        let decoded = rest[1..]
            .find(';')
            .filter(|semi| *semi <= 10)
            .and_then(|semi| decode_entity(&rest[1..=semi]).map(|ch| (ch, semi + 2)));
        match decoded {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(body: &str) -> Option<char> {
    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code);
    }
    let ch = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "aring" => 'å',
        "Aring" => 'Å',
        "auml" => 'ä',
        "Auml" => 'Ä',
        "ouml" => 'ö',
        "Ouml" => 'Ö',
        "uuml" => 'ü',
        "Uuml" => 'Ü',
        "oslash" => 'ø',
        "Oslash" => 'Ø',
        "aelig" => 'æ',
        "AElig" => 'Æ',
        "eacute" => 'é',
        "Eacute" => 'É',
        "egrave" => 'è',
        "aacute" => 'á',
        "iacute" => 'í',
        "oacute" => 'ó',
        "uacute" => 'ú',
        "ntilde" => 'ñ',
        "ccedil" => 'ç',
        "szlig" => 'ß',
        _ => return None,
    };
    Some(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAGMENT: &str = r#"
        <!-- rendered by filter.html -->
        <tr class="available-player" data-id="11" data-price="6.5" data-position="Midfielder" data-team="Hammarby">
            <td>Nils &amp; Co</td><td>Midfielder</td><td>6.5</td>
        </tr>
        <tr class='available-player row-dark' data-id=12 data-price="4.00" data-position="Goalkeeper" data-team="AIK">
            <td><span>Berg</span></td>
        </tr>
    "#;

    #[test]
    fn reads_attributes_and_first_cell() {
        let players = parse_candidates(FRAGMENT);
        assert_eq!(players.len(), 2);

        assert_eq!(players[0].id.as_str(), "11");
        assert_eq!(players[0].name, "Nils & Co");
        assert_eq!(players[0].price, Money::from_cents(650));
        assert_eq!(players[0].position, Position::Midfielder);
        assert_eq!(players[0].team.as_str(), "Hammarby");

        assert_eq!(players[1].id.as_str(), "12");
        assert_eq!(players[1].name, "Berg");
        assert_eq!(players[1].position, Position::Goalkeeper);
    }

    #[test]
    fn skips_rows_with_missing_or_bad_attributes() {
        let html = r#"
            <tr class="available-player" data-id="1" data-price="x" data-position="Defender" data-team="A"><td>Bad price</td></tr>
            <tr class="available-player" data-id="2" data-position="Defender" data-team="A"><td>No price</td></tr>
            <tr class="player" data-id="3" data-price="1" data-position="Defender" data-team="A"><td>Owned row</td></tr>
            <tr class="available-player" data-id="4" data-price="1" data-position="Defender" data-team="A"><td>Good</td></tr>
        "#;
        let players = parse_candidates(html);
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Good");
    }

    #[test]
    fn nested_tags_of_same_name_do_not_end_the_row() {
        let html = r#"<div class="available-player" data-id="5" data-price="2" data-position="FW" data-team="B"><div>Inner</div><div>Second</div></div><p>after</p>"#;
        let players = parse_candidates(html);
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Inner");
    }

    #[test]
    fn negative_price_row_is_skipped() {
        let html = r#"
            <tr class="available-player" data-id="9" data-price="-50.00" data-position="GK" data-team="Z"><td>Free</td></tr>
            <tr class="available-player" data-id="10" data-price="0" data-position="GK" data-team="Z"><td>Zero</td></tr>
        "#;
        let players = parse_candidates(html);
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].id.as_str(), "10");
    }

    #[test]
    fn numeric_and_named_entities_are_decoded() {
        assert_eq!(decode_entities("M&#246;ller &#x26; Sj&ouml;berg"), "Möller & Sjöberg");
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("R&D &unknown; 5 & 6"), "R&D &unknown; 5 & 6");
        assert_eq!(decode_entities("&#xZZ;&"), "&#xZZ;&");
    }

    #[test]
    fn empty_fragment_yields_no_candidates() {
        assert!(parse_candidates("").is_empty());
        assert!(parse_candidates("   \n").is_empty());
        assert!(parse_candidates("no rows < here").is_empty());
    }

    #[test]
    fn name_falls_back_to_id() {
        let html = r#"<tr class="available-player" data-id="9" data-price="1" data-position="GK" data-team="C"/>"#;
        let players = parse_candidates(html);
        assert_eq!(players[0].name, "9");
    }
}

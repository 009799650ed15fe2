//! Selector source text to [`ComplexSelector`]s.
//!
//! Each comma-separated alternative is parsed left to right into compounds
//! and the combinators between them, then reversed so the subject (the
//! rightmost compound) comes first.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::{
    AttributeSelector, Combinator, ComplexSelector, CompoundSelector, Position, SelectorError,
    SimpleSelector,
};

type Chars<'a> = Peekable<CharIndices<'a>>;

const fn is_ident_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

const fn is_ident_char(c: char) -> bool {
    is_ident_start_char(c) || c.is_ascii_digit() || c == '-'
}

const fn is_whitespace_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

/// Consume whitespace; true if any was consumed.
fn skip_whitespace(chars: &mut Chars<'_>) -> bool {
    let mut skipped = false;
    while chars.next_if(|&(_, c)| is_whitespace_char(c)).is_some() {
        skipped = true;
    }
    skipped
}

fn take_while(chars: &mut Chars<'_>, accept: impl Fn(char) -> bool) -> String {
    let mut taken = String::new();
    while let Some((_, c)) = chars.next_if(|&(_, c)| accept(c)) {
        taken.push(c);
    }
    taken
}

/// Split on commas that are not inside `[...]`, keeping each piece's offset.
fn split_alternatives(source: &str) -> Vec<(usize, &str)> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut in_brackets = false;
    let mut quote: Option<char> = None;
    for (pos, c) in source.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' if in_brackets => quote = Some(c),
                '[' => in_brackets = true,
                ']' => in_brackets = false,
                ',' if !in_brackets => {
                    pieces.push((start, &source[start..pos]));
                    start = pos + 1;
                }
                _ => {}
            },
        }
    }
    pieces.push((start, &source[start..]));
    pieces
}

/// Parse a full selector list.
pub(crate) fn parse_selector_list(source: &str) -> Result<Vec<ComplexSelector>, SelectorError> {
    split_alternatives(source)
        .into_iter()
        .map(|(offset, piece)| parse_complex(piece, offset))
        .collect()
}

/// Parse one alternative. `offset` is where `raw` starts in the full source.
fn parse_complex(raw: &str, offset: usize) -> Result<ComplexSelector, SelectorError> {
    /// Move the current compound into `compounds`; false if it was empty.
    fn flush_compound(
        compound: &mut Vec<SimpleSelector>,
        compounds: &mut Vec<CompoundSelector>,
    ) -> bool {
        if compound.is_empty() {
            return false;
        }
        compounds.push(CompoundSelector {
            simple_selectors: std::mem::take(compound),
        });
        true
    }

    if raw.trim().is_empty() {
        return Err(SelectorError::Empty);
    }

    let mut compounds: Vec<CompoundSelector> = Vec::new();
    let mut combinators_between: Vec<Combinator> = Vec::new();
    let mut current: Vec<SimpleSelector> = Vec::new();
    let mut last_child_combinator = offset;

    let mut chars = raw.char_indices().peekable();
    let _ = skip_whitespace(&mut chars);

    while let Some((pos, c)) = chars.next() {
        let at = offset + pos;
        match c {
            '.' | '#' => {
                let name = take_while(&mut chars, is_ident_char);
                if name.is_empty() {
                    return Err(SelectorError::MissingName { marker: c, pos: at });
                }
                current.push(if c == '.' {
                    SimpleSelector::Class(name)
                } else {
                    SimpleSelector::Id(name)
                });
            }
            '*' => current.push(SimpleSelector::Universal),
            '[' => {
                let attribute = parse_attribute(&mut chars, offset, at)?;
                current.push(SimpleSelector::Attribute(attribute));
            }
            ':' => current.push(SimpleSelector::Position(parse_position(&mut chars)?)),
            _ if is_whitespace_char(c) => {
                let _ = skip_whitespace(&mut chars);
                // trailing whitespace, or whitespace before an explicit `>`
                if matches!(chars.peek(), None | Some((_, '>'))) {
                    continue;
                }
                if flush_compound(&mut current, &mut compounds) {
                    combinators_between.push(Combinator::Descendant);
                }
            }
            '>' => {
                if !flush_compound(&mut current, &mut compounds) {
                    return Err(SelectorError::DanglingCombinator { pos: at });
                }
                let _ = skip_whitespace(&mut chars);
                combinators_between.push(Combinator::Child);
                last_child_combinator = at;
            }
            _ if current.is_empty() && is_ident_start_char(c) => {
                let mut name = String::from(c);
                name.push_str(&take_while(&mut chars, is_ident_char));
                current.push(SimpleSelector::Type(name.to_ascii_lowercase()));
            }
            _ => return Err(SelectorError::UnexpectedChar { ch: c, pos: at }),
        }
    }

    if !flush_compound(&mut current, &mut compounds) {
        return Err(SelectorError::DanglingCombinator {
            pos: last_child_combinator,
        });
    }

    // "A > B C" gives compounds [A, B, C] and combinators [Child, Descendant].
    // Matching walks up from C, so store [(Descendant, B), (Child, A)].
    let Some(subject) = compounds.pop() else {
        return Err(SelectorError::Empty);
    };
    let combinators = combinators_between
        .into_iter()
        .rev()
        .zip(compounds.into_iter().rev())
        .collect();

    Ok(ComplexSelector {
        subject,
        combinators,
    })
}

/// Parse the inside of `[...]`; the `[` at `start` is already consumed.
fn parse_attribute(
    chars: &mut Chars<'_>,
    offset: usize,
    start: usize,
) -> Result<AttributeSelector, SelectorError> {
    let bad = || SelectorError::BadAttribute { pos: start };

    let _ = skip_whitespace(chars);
    let name = take_while(chars, |c| is_ident_char(c) || c == ':');
    if name.is_empty() {
        return Err(bad());
    }
    let _ = skip_whitespace(chars);

    let operator = match chars.next() {
        Some((_, ']')) => return Ok(AttributeSelector::Exists(name)),
        Some((_, '=')) => '=',
        Some((_, op @ ('!' | '^' | '$' | '*' | '~' | '|'))) => match chars.next() {
            Some((_, '=')) => op,
            _ => return Err(bad()),
        },
        _ => return Err(bad()),
    };

    let value = parse_attr_value(chars, offset)?;
    let _ = skip_whitespace(chars);
    if chars.next().map(|(_, c)| c) != Some(']') {
        return Err(bad());
    }

    Ok(match operator {
        '=' => AttributeSelector::Equals(name, value),
        '!' => AttributeSelector::NotEquals(name, value),
        '^' => AttributeSelector::PrefixMatch(name, value),
        '$' => AttributeSelector::SuffixMatch(name, value),
        '*' => AttributeSelector::SubstringMatch(name, value),
        '~' => AttributeSelector::Includes(name, value),
        _ => AttributeSelector::DashMatch(name, value),
    })
}

/// Quoted (`"v"`, `'v'`) or bare value. A bare value runs to whitespace or `]`.
fn parse_attr_value(chars: &mut Chars<'_>, offset: usize) -> Result<String, SelectorError> {
    let _ = skip_whitespace(chars);

    let Some(&(pos, quote @ ('"' | '\''))) = chars.peek() else {
        return Ok(take_while(chars, |c| !is_whitespace_char(c) && c != ']'));
    };
    let _ = chars.next();

    let mut value = String::new();
    for (_, c) in chars.by_ref() {
        if c == quote {
            return Ok(value);
        }
        value.push(c);
    }
    Err(SelectorError::UnterminatedString { pos: offset + pos })
}

/// Parse a pseudo-selector; the `:` is already consumed.
fn parse_position(chars: &mut Chars<'_>) -> Result<Position, SelectorError> {
    let name = take_while(chars, is_ident_char).to_ascii_lowercase();
    let constructor: fn(usize) -> Position = match name.as_str() {
        "first" => return Ok(Position::First),
        "last" => return Ok(Position::Last),
        "eq" => Position::Eq,
        "gt" => Position::Gt,
        "lt" => Position::Lt,
        _ => return Err(SelectorError::UnknownPseudo(name)),
    };

    let invalid = |argument: String| SelectorError::InvalidIndex {
        name: name.clone(),
        argument,
    };

    if chars.next_if(|&(_, c)| c == '(').is_none() {
        return Err(invalid(String::new()));
    }
    let argument = take_while(chars, |c| c != ')');
    if chars.next().is_none() {
        return Err(invalid(argument));
    }
    match argument.trim().parse::<usize>() {
        Ok(index) => Ok(constructor(index)),
        Err(_) => Err(invalid(argument)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ignores_commas_in_attribute_values() {
        let pieces = split_alternatives("a[title='x,y'], b");
        assert_eq!(pieces, vec![(0, "a[title='x,y']"), (15, " b")]);
    }

    #[test]
    fn test_combinators_stored_right_to_left() {
        let complex = parse_complex("ul > li a", 0).unwrap();
        assert_eq!(
            complex.subject.simple_selectors,
            vec![SimpleSelector::Type("a".to_string())]
        );
        let chain: Vec<Combinator> = complex.combinators.iter().map(|(c, _)| *c).collect();
        assert_eq!(chain, vec![Combinator::Descendant, Combinator::Child]);
        assert_eq!(
            complex.combinators[1].1.simple_selectors,
            vec![SimpleSelector::Type("ul".to_string())]
        );
    }
}

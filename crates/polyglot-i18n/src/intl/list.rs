//! List joining.

use super::conventions::Conventions;

/// Kind of list join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListKind {
    /// `a, b and c`
    Conjunction,
    /// `a, b or c`
    Disjunction,
    /// `a, b, c`
    Unit,
}

pub(crate) fn format_list<S: AsRef<str>>(items: &[S], kind: ListKind, conventions: &Conventions) -> String {
    let word = match kind {
        ListKind::Conjunction => Some(conventions.and),
        ListKind::Disjunction => Some(conventions.or),
        ListKind::Unit => conventions.unit_and,
    };

    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head = init.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ");
            match word {
                Some(word) if init.len() > 1 && conventions.serial_comma => {
                    format!("{head}, {word} {}", last.as_ref())
                }
                Some(word) => format!("{head} {word} {}", last.as_ref()),
                None => format!("{head}, {}", last.as_ref()),
            }
        }
    }
}

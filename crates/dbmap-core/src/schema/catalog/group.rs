use crate::{Error, Result};

use std::fmt;

enum State<K, G> {
    /// No row seen yet.
    Idle,

    /// Rows with `key` are being collected into `group`.
    Open { key: K, group: G },
}

/// Folds a row stream into groups of contiguous rows sharing a key.
///
/// `open` builds an empty group from the first row of each group and `append` adds every
/// row, the first one included, to the open group. The last open group is always flushed,
/// so a non-empty stream never loses its final group and an empty stream yields no groups.
///
/// Returns an error if a key shows up again after its group was closed.
pub fn group_rows<R, K, G>(
    rows: impl IntoIterator<Item = R>,
    key_of: impl Fn(&R) -> K,
    mut open: impl FnMut(&R) -> G,
    mut append: impl FnMut(&mut G, R),
) -> Result<Vec<G>>
where
    K: PartialEq + fmt::Debug,
{
    let mut groups = vec![];
    let mut closed = vec![];
    let mut state = State::Idle;

    for row in rows {
        let key = key_of(&row);

        state = match state {
            State::Open {
                key: open_key,
                group,
            } if open_key == key => State::Open {
                key: open_key,
                group,
            },
            State::Open {
                key: open_key,
                group,
            } => {
                groups.push(group);
                closed.push(open_key);
                start(&closed, key, open(&row))?
            }
            State::Idle => start(&closed, key, open(&row))?,
        };

        if let State::Open { group, .. } = &mut state {
            append(group, row);
        }
    }

    if let State::Open { group, .. } = state {
        groups.push(group);
    }

    Ok(groups)
}

fn start<K, G>(closed: &[K], key: K, group: G) -> Result<State<K, G>>
where
    K: PartialEq + fmt::Debug,
{
    if closed.contains(&key) {
        return Err(Error::invalid_catalog_order(format!("{key:?}")));
    }

    Ok(State::Open { key, group })
}

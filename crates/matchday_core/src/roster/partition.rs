use crate::models::PlayerId;

/// Stable two-group insert over a reserve list.
///
/// Entries for which `is_member` holds form the front group, the rest the
/// back group; the relative order inside each group is preserved and the
/// newcomer lands at the end of its own group. This is the only operation
/// allowed to change the order of a reserve list.
pub fn partition_insert<F>(reserve: &[PlayerId], newcomer: PlayerId, is_member: F) -> Vec<PlayerId>
where
    F: Fn(&str) -> bool,
{
    let mut result = Vec::with_capacity(reserve.len() + 1);
    let mut guests = Vec::new();

    for id in reserve {
        if is_member(id) {
            result.push(id.clone());
        } else {
            guests.push(id.clone());
        }
    }

    if is_member(&newcomer) {
        result.push(newcomer);
    } else {
        guests.push(newcomer);
    }

    result.extend(guests);
    result
}

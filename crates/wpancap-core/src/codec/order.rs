/// Reverse the items inside each contiguous group of `group_size`.
///
/// `None` (or `Some(0)`) treats the whole sequence as one group.
///
/// # Examples
/// ```
/// use wpancap_core::codec::swap_groups;
///
/// assert_eq!(swap_groups(&[2, 3, 5, 7, 11], None), [11, 7, 5, 3, 2]);
/// assert_eq!(swap_groups(&[2, 3, 5, 7, 11], Some(2)), [3, 2, 7, 5, 11]);
/// ```
pub fn swap_groups<T: Clone>(items: &[T], group_size: Option<usize>) -> Vec<T> {
    let size = match group_size {
        Some(size) if size > 0 => size,
        _ => items.len().max(1),
    };
    items
        .chunks(size)
        .flat_map(|group| group.iter().rev().cloned())
        .collect()
}

/// Subtracts `wave` from the matching prefix of `target`. Extra target samples are untouched.
pub fn subtract_prefix(target: &mut [f64], wave: &[f64]) {
    target
        .iter_mut()
        .zip(wave.iter())
        .for_each(|(t, w)| *t -= w);
}

/// Replaces each `None` with the last seen value (or `default` before any value).
/// Returns how many slots were filled.
pub fn fill_forward_mut<T>(data: &mut [Option<T>], default: T) -> u32
where
    T: Clone,
{
    let mut last_value = default;
    let mut total_replaced: u32 = 0;

    for item in data.iter_mut() {
        match item {
            Some(value) => last_value = value.clone(),
            None => {
                *item = Some(last_value.clone());
                total_replaced += 1;
            }
        }
    }
    total_replaced
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_forward_uses_default_then_last_seen() {
        let mut data = vec![None, Some(2.0), None, None, Some(5.0)];
        let replaced = fill_forward_mut(&mut data, 0.0);
        assert_eq!(replaced, 3);
        assert_eq!(data, vec![Some(0.0), Some(2.0), Some(2.0), Some(2.0), Some(5.0)]);
    }

    #[test]
    fn subtract_prefix_leaves_tail() {
        let mut target = vec![5.0, 5.0, 5.0, 5.0];
        subtract_prefix(&mut target, &[1.0, 2.0]);
        assert_eq!(target, vec![4.0, 3.0, 5.0, 5.0]);
    }
}

//! Choosing the winning candidate from scored positions.
//!
//! Selection is deterministic: the strictly highest score wins and ties keep
//! the earliest candidate in enumeration order. Non-finite scores never win.

/// Index and score of the first strictly-highest finite score.
pub fn pick_best<I>(scores: I) -> Option<(usize, f32)>
where
    I: IntoIterator<Item = f32>,
{
    let mut best: Option<(usize, f32)> = None;
    for (index, score) in scores.into_iter().enumerate() {
        if !score.is_finite() {
            continue;
        }
        match best {
            Some((_, current)) if score <= current => {}
            _ => best = Some((index, score)),
        }
    }
    best
}

/// Like [`pick_best`], but scores are computed lazily from the candidates.
pub fn pick_best_by<T, F>(candidates: &[T], mut score: F) -> Option<(usize, f32)>
where
    F: FnMut(&T) -> f32,
{
    pick_best(candidates.iter().map(|c| score(c)))
}

//! Turn raw model heads into text.

pub mod bbox;
pub mod class;
pub mod ctc;

pub use bbox::{BBoxDecoder, BoundingBox};
pub use class::{ClassDecoder, ClassLabels, DEFAULT_LABELS, DEFAULT_UNKNOWN_LABEL};
pub use ctc::{CtcDecoder, Vocabulary, DEFAULT_ALPHABET};

/// Index of the largest value.
///
/// Ties go to the lowest index and NaN never wins. Returns `None` when there
/// is nothing to compare (empty input, or all NaN).
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &value) in values.iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index)
}

use super::argmax;
use crate::InferError;
use transit_base::Tensor;

/// Plate characters the recognizer was trained on.
pub const DEFAULT_ALPHABET: &str = "0123456789АВЕКМНОРСТУХ";

/// Output characters by index. The CTC blank sits right after the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    chars: Vec<char>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHABET)
    }
}

impl Vocabulary {
    pub fn new(alphabet: &str) -> Self {
        Self {
            chars: alphabet.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn blank(&self) -> usize {
        self.chars.len()
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }
}

/// Greedy (best path) CTC decoder.
#[derive(Debug, Clone, Default)]
pub struct CtcDecoder {
    vocabulary: Vocabulary,
}

impl CtcDecoder {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Decode a `(seq_len, vocab_size)` score matrix.
    pub fn decode(&self, char_probs: &Tensor<f32>) -> Result<String, InferError> {
        Ok(self.collapse(&self.best_path(char_probs)?))
    }

    /// Argmax index per time step. Steps with nothing comparable count as blank.
    pub fn best_path(&self, char_probs: &Tensor<f32>) -> Result<Vec<usize>, InferError> {
        let &[steps, classes] = char_probs.shape.as_slice() else {
            return Err(InferError::MalformedShape {
                expected_rank: 2,
                shape: char_probs.shape.clone(),
            });
        };
        if classes == 0 {
            return Ok(vec![self.vocabulary.blank(); steps]);
        }
        Ok(char_probs
            .data
            .chunks_exact(classes)
            .map(|row| argmax(row).unwrap_or(self.vocabulary.blank()))
            .collect())
    }

    /// Collapse a best path: drop repeats, then blanks and out-of-range indices.
    ///
    /// A repeat is judged against the previous raw index, so a blank between
    /// two equal indices keeps both.
    pub fn collapse(&self, indices: &[usize]) -> String {
        let blank = self.vocabulary.blank();
        let mut text = String::new();
        let mut prev: Option<usize> = None;
        for &index in indices {
            if index != blank && Some(index) != prev {
                if let Some(ch) = self.vocabulary.get(index) {
                    text.push(ch);
                }
            }
            prev = Some(index);
        }
        text
    }
}

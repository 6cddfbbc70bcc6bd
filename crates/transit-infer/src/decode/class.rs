use super::argmax;
use transit_base::Tensor;

/// Transport classes in model output order.
pub const DEFAULT_LABELS: [&str; 5] = [
    "Автобус",
    "Троллейбус",
    "Маршрутка",
    "Трамвай",
    "Неизвестный транспорт",
];

/// Label for indices the model knows but the label list does not.
pub const DEFAULT_UNKNOWN_LABEL: &str = "Неизвестный транспорт";

/// Class names indexed from 0, plus the label for everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassLabels {
    names: Vec<String>,
    unknown: String,
}

impl Default for ClassLabels {
    fn default() -> Self {
        Self::new(DEFAULT_LABELS.iter().copied(), DEFAULT_UNKNOWN_LABEL)
    }
}

impl ClassLabels {
    pub fn new<I, S>(names: I, unknown: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            unknown: unknown.into(),
        }
    }

    /// Label for `index`; `None` and unmapped indices give the unknown label.
    pub fn label(&self, index: Option<usize>) -> &str {
        index
            .and_then(|i| self.names.get(i))
            .map_or(self.unknown.as_str(), String::as_str)
    }

    pub fn unknown(&self) -> &str {
        &self.unknown
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Picks the label of the highest-scoring class.
#[derive(Debug, Clone, Default)]
pub struct ClassDecoder {
    labels: ClassLabels,
}

impl ClassDecoder {
    pub fn new(labels: ClassLabels) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &ClassLabels {
        &self.labels
    }

    /// Label for the argmax of `logits`, read as a flat sequence. Never fails.
    pub fn decode(&self, logits: &Tensor<f32>) -> &str {
        self.labels.label(argmax(&logits.data))
    }
}

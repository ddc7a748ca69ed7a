use super::{AttributeDomain, ClassCounts, Dataset, Example};

impl Dataset {
    pub fn new(examples: Vec<Example>, domain: AttributeDomain) -> Self {
        Dataset { examples, domain }
    }

    pub fn nsamples(&self) -> usize {
        self.examples.len()
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    pub fn domain(&self) -> &AttributeDomain {
        &self.domain
    }

    /// Number of positive and negative examples
    pub fn label_counts(&self) -> ClassCounts {
        ClassCounts::of(&self.examples)
    }

    /// Splits the dataset into two parts, the first containing `ratio` of the examples
    pub fn split_with_ratio(self, ratio: f32) -> (Self, Self) {
        let Dataset {
            mut examples,
            domain,
        } = self;
        let n = (examples.len() as f32 * ratio).ceil() as usize;
        let rest = examples.split_off(n.min(examples.len()));

        (
            Dataset::new(examples, domain.clone()),
            Dataset::new(rest, domain),
        )
    }
}

impl From<(Vec<Example>, AttributeDomain)> for Dataset {
    fn from((examples, domain): (Vec<Example>, AttributeDomain)) -> Self {
        Dataset::new(examples, domain)
    }
}

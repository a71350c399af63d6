//! Resolution of variable names to positions inside an observation record.

/// Maps variable names to the index of the matching field in an
/// [`Observation`](crate::observation::Observation).
pub trait VariableContext {
    /// Index of `name`, or `None` if the context does not know it.
    fn variable_index(&self, name: &str) -> Option<usize>;

    fn variable_count(&self) -> usize;
}

/// Ordered list of variable names; a name's index is its position in the list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableNames {
    names: Vec<String>,
}

impl VariableNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        VariableNames {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }
}

impl VariableContext for VariableNames {
    fn variable_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    fn variable_count(&self) -> usize {
        self.names.len()
    }
}

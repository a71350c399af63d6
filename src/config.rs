//! Serializable configuration of a [`PintyAggregator`].
//!
//! ```rust
//! use pinty::config::PintyConfig;
//! use pinty::variables::VariableNames;
//!
//! let config: PintyConfig = serde_json::from_str(
//!     r#"{ "var_name": "lai", "mask_name": "valid", "variance": "welford" }"#,
//! ).unwrap();
//!
//! let vars = VariableNames::new(["lai", "valid"]);
//! let agg = config.create_aggregator(Some(&vars)).unwrap();
//! assert_eq!(agg.mask_index(), Some(1));
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    aggregator::PintyAggregator, constants::DEFAULT_BUFFER_CAPACITY, pinty_errors::PintyError,
    selector::VarianceMethod, variables::VariableContext,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PintyConfig {
    pub var_name: String,
    #[serde(default)]
    pub mask_name: Option<String>,
    #[serde(default)]
    pub variance: VarianceMethod,
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,
}

fn default_initial_capacity() -> usize {
    DEFAULT_BUFFER_CAPACITY
}

impl PintyConfig {
    pub fn new(var_name: &str, mask_name: Option<&str>) -> Self {
        PintyConfig {
            var_name: var_name.to_string(),
            mask_name: mask_name.map(str::to_string),
            variance: VarianceMethod::default(),
            initial_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }

    /// Names of the variables the aggregator reads from each observation.
    pub fn var_names(&self) -> Vec<&str> {
        std::iter::once(self.var_name.as_str())
            .chain(self.mask_name.as_deref())
            .collect()
    }

    pub fn validate(&self) -> Result<(), PintyError> {
        if self.var_name.is_empty() {
            return Err(PintyError::InvalidConfig("var_name must not be empty".into()));
        }
        if self.initial_capacity == 0 {
            return Err(PintyError::InvalidConfig(
                "initial_capacity must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn create_aggregator(
        &self,
        var_ctx: Option<&dyn VariableContext>,
    ) -> Result<PintyAggregator, PintyError> {
        self.validate()?;
        Ok(
            PintyAggregator::new(var_ctx, &self.var_name, self.mask_name.as_deref())?
                .with_variance_method(self.variance)
                .with_initial_capacity(self.initial_capacity),
        )
    }
}

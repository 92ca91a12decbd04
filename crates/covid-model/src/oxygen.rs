//! Supplemental-oxygen observations supplied by the oxygen extractor.
//!
//! The extractor reports three parallel lists (flow rates, device text and a
//! needs-oxygen flag). They are stored here as one list of paired
//! observations so that a length mismatch cannot survive construction.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// One positionally paired oxygen observation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OxygenObservation {
    /// Flow rate in L/min, when one was recorded.
    pub flow_rate: Option<f64>,
    /// Free-text delivery device, when one was recorded.
    pub device: Option<String>,
    /// Whether the note states the patient needs supplemental oxygen.
    pub needs_o2: bool,
}

/// Paired oxygen observations, serialized as the extractor's three lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OxygenLists", into = "OxygenLists")]
pub struct OxygenObservations(Vec<OxygenObservation>);

impl OxygenObservations {
    pub fn new(observations: Vec<OxygenObservation>) -> Self {
        Self(observations)
    }

    /// Pair the extractor's three lists.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MismatchedOxygenLists`] when the lists differ in length.
    pub fn from_lists(
        flow_rates: Vec<Option<f64>>,
        devices: Vec<Option<String>>,
        needs_o2: Vec<bool>,
    ) -> Result<Self> {
        if flow_rates.len() != devices.len() || flow_rates.len() != needs_o2.len() {
            return Err(ModelError::MismatchedOxygenLists {
                flow_rates: flow_rates.len(),
                devices: devices.len(),
                needs_o2: needs_o2.len(),
            });
        }
        let observations = flow_rates
            .into_iter()
            .zip(devices)
            .zip(needs_o2)
            .map(|((flow_rate, device), needs_o2)| OxygenObservation {
                flow_rate,
                device,
                needs_o2,
            })
            .collect();
        Ok(Self(observations))
    }

    pub fn push(&mut self, observation: OxygenObservation) {
        self.0.push(observation);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OxygenObservation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn flow_rates(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.0.iter().map(|o| o.flow_rate)
    }

    pub fn devices(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.0.iter().map(|o| o.device.as_deref())
    }
}

impl<'a> IntoIterator for &'a OxygenObservations {
    type Item = &'a OxygenObservation;
    type IntoIter = std::slice::Iter<'a, OxygenObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Wire form: the three extractor lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct OxygenLists {
    #[serde(default)]
    o2_flow_rate_list: Vec<Option<f64>>,
    #[serde(default)]
    o2_device_list: Vec<Option<String>>,
    #[serde(default)]
    needs_o2_list: Vec<bool>,
}

impl TryFrom<OxygenLists> for OxygenObservations {
    type Error = ModelError;

    fn try_from(lists: OxygenLists) -> Result<Self> {
        Self::from_lists(lists.o2_flow_rate_list, lists.o2_device_list, lists.needs_o2_list)
    }
}

impl From<OxygenObservations> for OxygenLists {
    fn from(observations: OxygenObservations) -> Self {
        let mut lists = OxygenLists::default();
        for observation in observations.0 {
            lists.o2_flow_rate_list.push(observation.flow_rate);
            lists.o2_device_list.push(observation.device);
            lists.needs_o2_list.push(observation.needs_o2);
        }
        lists
    }
}

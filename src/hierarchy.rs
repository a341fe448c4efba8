//! Strategies which rank daemons against each other.
//!
//! A provider turns raw puzzle data into one weight per daemon. Higher weights
//! win: the [`CombinationStore`][crate::CombinationStore] explores combinations
//! containing heavier daemons first.

use serde::{Deserialize, Serialize};

use crate::raw_data::BreachProtocolRawData;

pub type Weight = i64;

pub trait HierarchyProvider {
    /// One weight per daemon in `data.daemons`, in the same order.
    fn provide(&self, data: &BreachProtocolRawData) -> Vec<Weight>;
}

/// Later daemons outrank earlier ones, as the game lists them.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexHierarchyProvider;

impl HierarchyProvider for IndexHierarchyProvider {
    fn provide(&self, data: &BreachProtocolRawData) -> Vec<Weight> {
        (0..data.daemons.len()).map(|idx| idx as Weight).collect()
    }
}

/// Ranks daemons by the position of their type in `priority`.
///
/// `priority` runs from least to most important. Daemons whose type is missing
/// from the list, or which have no recognized type at all, weigh `-1`.
#[derive(Debug, Clone, Default)]
pub struct TypesHierarchyProvider {
    priority: Vec<String>,
}

impl TypesHierarchyProvider {
    pub fn new(priority: Vec<String>) -> Self {
        Self { priority }
    }
}

impl HierarchyProvider for TypesHierarchyProvider {
    fn provide(&self, data: &BreachProtocolRawData) -> Vec<Weight> {
        (0..data.daemons.len())
            .map(|idx| {
                data.types
                    .as_ref()
                    .and_then(|types| types.get(idx))
                    .and_then(|kind| self.priority.iter().position(|p| p == kind))
                    .map_or(-1, |position| position as Weight)
            })
            .collect()
    }
}

/// Forces one daemon to the top, deferring to `inner` for everything else.
#[derive(Debug, Clone)]
pub struct FocusHierarchyProvider<P> {
    index: usize,
    inner: P,
}

impl<P> FocusHierarchyProvider<P> {
    pub fn new(index: usize, inner: P) -> Self {
        Self { index, inner }
    }
}

impl<P: HierarchyProvider> HierarchyProvider for FocusHierarchyProvider<P> {
    fn provide(&self, data: &BreachProtocolRawData) -> Vec<Weight> {
        let mut weights = self.inner.provide(data);
        if let Some(weight) = weights.get_mut(self.index) {
            *weight = Weight::MAX;
        }
        weights
    }
}

/// Serializable choice of provider, for configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HierarchyConfig {
    #[default]
    Index,
    Types {
        priority: Vec<String>,
    },
    Focus {
        index: usize,
        #[serde(default)]
        inner: Box<HierarchyConfig>,
    },
}

impl HierarchyProvider for HierarchyConfig {
    fn provide(&self, data: &BreachProtocolRawData) -> Vec<Weight> {
        match self {
            HierarchyConfig::Index => IndexHierarchyProvider.provide(data),
            HierarchyConfig::Types { priority } => {
                TypesHierarchyProvider::new(priority.clone()).provide(data)
            }
            HierarchyConfig::Focus { index, inner } => {
                FocusHierarchyProvider::new(*index, &**inner).provide(data)
            }
        }
    }
}

impl<P: HierarchyProvider + ?Sized> HierarchyProvider for &P {
    fn provide(&self, data: &BreachProtocolRawData) -> Vec<Weight> {
        (**self).provide(data)
    }
}

impl<P: HierarchyProvider + ?Sized> HierarchyProvider for Box<P> {
    fn provide(&self, data: &BreachProtocolRawData) -> Vec<Weight> {
        (**self).provide(data)
    }
}

// Chart construction: base trace + indicator overlays + shared layout
pub mod builder;
pub mod layout;
pub mod traces;

pub use builder::ChartBuilder;
pub use layout::Layout;
pub use traces::Trace;

use serde::{Serialize, Serializer};

use crate::error::Result;

/// A complete, immutable chart description. Serializes to a Plotly figure:
/// `{"data": [base, overlays...], "layout": {...}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    base: Trace,
    overlays: Vec<Trace>,
    layout: Layout,
}

impl ChartSpec {
    pub(crate) fn new(base: Trace, overlays: Vec<Trace>, layout: Layout) -> Self {
        Self {
            base,
            overlays,
            layout,
        }
    }

    pub fn base(&self) -> &Trace {
        &self.base
    }

    pub fn overlays(&self) -> &[Trace] {
        &self.overlays
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Serialize)]
struct Figure<'a> {
    data: Vec<&'a Trace>,
    layout: &'a Layout,
}

impl Serialize for ChartSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Figure {
            data: std::iter::once(&self.base).chain(&self.overlays).collect(),
            layout: &self.layout,
        }
        .serialize(serializer)
    }
}

use serde::{Deserialize, Serialize};
use treepack::PackOutput;

use super::RectConfig;

/// The result of packing a layout, written out as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    /// The size of the container that every rect was packed into.
    pub size: (u32, u32),

    /// One entry per rect in the layout, in the same order.
    pub items: Vec<SheetItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetItem {
    pub name: String,

    /// The position of the top-left corner of the rect, not including
    /// padding.
    pub position: (u32, u32),

    pub size: (u32, u32),
}

impl Sheet {
    pub fn new(rects: &[RectConfig], output: &PackOutput) -> Self {
        let items = rects
            .iter()
            .zip(output.items())
            .map(|(rect, item)| SheetItem {
                name: rect.name.clone(),
                position: item.position(),
                size: item.size(),
            })
            .collect();

        Self {
            size: output.size(),
            items,
        }
    }
}

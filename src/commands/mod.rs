mod estimate;
mod pack;

pub use estimate::*;
pub use pack::*;

use std::path::Path;

use anyhow::anyhow;

use crate::data::LayoutConfig;

fn read_layout(path: &Path) -> anyhow::Result<LayoutConfig> {
    LayoutConfig::read_from_file(path).map_err(|err| {
        if err.is_not_found() {
            anyhow!("no layout file found at {}", path.display())
        } else {
            err.into()
        }
    })
}
